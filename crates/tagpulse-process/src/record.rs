use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cleaned, deduplicated post. Field order is the table's fixed column
/// order; the table is materialized once per run and never mutated after
/// write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanedRecord {
    pub id: String,
    pub posted_at: DateTime<Utc>,
    pub author: String,
    /// Raw displayed body text, as scraped.
    pub text: String,
    /// `text` with URLs, mentions and hashtags stripped, newlines collapsed
    /// and mojibake repaired.
    pub text_clean: String,
    pub reply_count: u64,
    pub share_count: u64,
    pub like_count: u64,
    pub tags: Vec<String>,
    pub mentions: Vec<String>,
}
