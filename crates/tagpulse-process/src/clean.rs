//! Post-text cleaning.
//!
//! Hashtags and mentions are already extracted into their own columns, so
//! the cleaned text keeps only the prose: URLs, `@` handles and `#` tags are
//! stripped, newlines collapse to spaces, and the result is trimmed.

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+").expect("valid regex"));
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").expect("valid regex"));
static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").expect("valid regex"));

/// Strip URL, mention and hashtag tokens from `text`, collapse newlines to
/// spaces, and trim surrounding whitespace.
#[must_use]
pub fn clean_post_text(text: &str) -> String {
    let no_urls = URL_RE.replace_all(text, "");
    let no_mentions = MENTION_RE.replace_all(&no_urls, "");
    let no_hashtags = HASHTAG_RE.replace_all(&no_mentions, "");
    no_hashtags.replace('\n', " ").trim().to_string()
}
