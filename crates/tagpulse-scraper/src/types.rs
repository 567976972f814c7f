use serde::{Deserialize, Serialize};

/// A single post as scraped from the rendered results feed, prior to any
/// cleaning.
///
/// `id` is non-empty; items without an extractable identifier are dropped
/// at parse time and never reach this type. Engagement counters are already
/// decoded from their abbreviated display forms ("1.2K", "3M"), defaulting
/// to 0 where the page offered nothing parseable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawPost {
    pub id: String,
    pub author: String,
    /// ISO-8601 timestamp exactly as exposed by the page.
    pub posted_at: String,
    /// Raw displayed body text; may be empty.
    pub text: String,
    pub reply_count: u64,
    pub share_count: u64,
    pub like_count: u64,
    /// Hashtag tokens in render order.
    pub tags: Vec<String>,
    /// @-handle tokens in render order.
    pub mentions: Vec<String>,
}
