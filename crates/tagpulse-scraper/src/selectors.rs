//! DOM selectors for the search surface and rendered post items.
//!
//! These are best-effort: the upstream markup can change at any time, and
//! attribute-based selectors are the most stable handle observed in
//! production use.

pub(crate) const HOME_URL: &str = "https://x.com/";

pub(crate) const SEARCH_INPUT: &str = r#"input[data-testid="SearchBox_Search_Input"]"#;

/// The "Latest" tab on the search results page. Located by role and label
/// text, which has outlived several rounds of markup churn. Text matching
/// requires XPath under WebDriver.
pub(crate) const LATEST_TAB: &str = r#"//a[@role="tab"][contains(., "Latest")]"#;

pub(crate) const POST_ARTICLE: &str = r#"article[data-testid="tweet"]"#;

pub(crate) const PERMALINK: &str = r#"a[href*="/status/"]"#;
pub(crate) const AUTHOR: &str = r#"div[data-testid="User-Name"] span"#;
pub(crate) const POST_TEXT: &str = r#"div[data-testid="tweetText"]"#;
pub(crate) const HASHTAG_ANCHOR: &str = r#"a[href*="/hashtag/"]"#;
pub(crate) const MENTION_ANCHOR: &str = r#"a[href*="/"][dir="ltr"]"#;

/// Selector for one engagement counter, e.g. `metric = "reply"`.
pub(crate) fn metric_selector(metric: &str) -> String {
    format!(r#"div[data-testid="{metric}"] span[data-testid="app-text-transition-container"]"#)
}
