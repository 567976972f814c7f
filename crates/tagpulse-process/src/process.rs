//! The cleaner/normalizer stage: raw scraped posts in, deduplicated typed
//! records out. Performs no network or file I/O; persistence belongs to the
//! caller.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use tagpulse_scraper::RawPost;

use crate::clean::clean_post_text;
use crate::encoding::repair_mojibake;
use crate::error::ProcessError;
use crate::record::CleanedRecord;

/// Clean and normalize a batch of raw posts.
///
/// Deduplicates by id keeping the first occurrence, parses timestamps into
/// typed UTC values, and derives the cleaned text column. An empty input
/// yields an empty output.
///
/// # Errors
///
/// Returns [`ProcessError::InvalidTimestamp`] if any surviving post carries
/// a timestamp that does not parse — a hard error by design, unlike the
/// best-effort engagement counters.
pub fn process_posts(posts: Vec<RawPost>) -> Result<Vec<CleanedRecord>, ProcessError> {
    if posts.is_empty() {
        tracing::warn!("received no posts to process — returning an empty table");
        return Ok(Vec::new());
    }

    let input_len = posts.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::with_capacity(input_len);

    for post in posts {
        if !seen.insert(post.id.clone()) {
            continue;
        }

        let posted_at: DateTime<Utc> = post
            .posted_at
            .parse::<DateTime<Utc>>()
            .map_err(|e| ProcessError::InvalidTimestamp {
                id: post.id.clone(),
                value: post.posted_at.clone(),
                source: e,
            })?;

        let text_clean = repair_mojibake(&clean_post_text(&post.text));

        records.push(CleanedRecord {
            id: post.id,
            posted_at,
            author: post.author,
            text: post.text,
            text_clean,
            reply_count: post.reply_count,
            share_count: post.share_count,
            like_count: post.like_count,
            tags: post.tags,
            mentions: post.mentions,
        });
    }

    tracing::info!(
        unique = records.len(),
        input = input_len,
        "processing complete"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, text: &str) -> RawPost {
        RawPost {
            id: id.to_string(),
            author: "trader123".to_string(),
            posted_at: "2024-05-03T09:15:00.000Z".to_string(),
            text: text.to_string(),
            reply_count: 1,
            share_count: 2,
            like_count: 3,
            tags: vec!["#nifty50".to_string()],
            mentions: vec![],
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(process_posts(Vec::new()).unwrap(), Vec::new());
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut first = raw("1", "first text");
        first.author = "alice".to_string();
        let mut dup = raw("1", "second text");
        dup.author = "bob".to_string();

        let records = process_posts(vec![first, dup, raw("2", "other")]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].author, "alice");
        assert_eq!(records[0].text, "first text");
        assert_eq!(records[1].id, "2");
    }

    #[test]
    fn no_two_rows_share_an_id() {
        let posts = vec![raw("1", "a"), raw("2", "b"), raw("1", "c"), raw("2", "d")];
        let records = process_posts(posts).unwrap();
        let mut ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn timestamp_is_typed_utc() {
        let records = process_posts(vec![raw("1", "x")]).unwrap();
        assert_eq!(records[0].posted_at.to_rfc3339(), "2024-05-03T09:15:00+00:00");
    }

    #[test]
    fn malformed_timestamp_is_a_hard_error() {
        let mut post = raw("9", "x");
        post.posted_at = "yesterday-ish".to_string();
        let err = process_posts(vec![post]).unwrap_err();
        assert!(
            matches!(err, ProcessError::InvalidTimestamp { ref id, .. } if id == "9"),
            "expected InvalidTimestamp for id 9, got: {err}"
        );
    }

    #[test]
    fn cleaned_text_strips_markup() {
        let posts = vec![
            raw("1", "Great day for #nifty50! https://x.example/abc @trader123"),
            raw("1", "duplicate, dropped"),
            raw("2", "plain"),
        ];
        let records = process_posts(posts).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text_clean, "Great day for !");
    }

    #[test]
    fn processing_is_deterministic() {
        let posts = vec![raw("1", "some #tagged text"), raw("2", "more text")];
        let once = process_posts(posts.clone()).unwrap();
        let twice = process_posts(posts).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn mojibake_is_repaired_after_cleaning() {
        let records = process_posts(vec![raw("1", "bulls donâ€™t quit #nifty50")]).unwrap();
        assert_eq!(records[0].text_clean, "bulls don’t quit");
    }
}
