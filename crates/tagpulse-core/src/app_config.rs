use std::path::PathBuf;
use std::time::Duration;

/// Everything the pipeline stages need, resolved once at startup and passed
/// in explicitly. Stages hold no ambient configuration state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path to the YAML file holding the hashtag set.
    pub tags_path: PathBuf,
    /// Hashtags loaded from `tags_path`, `#`-prefixed.
    pub hashtags: Vec<String>,
    /// Number of unique posts the collector aims for before stopping.
    pub target_count: usize,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Timeout for the initial page navigation, in milliseconds.
    pub nav_timeout_ms: u64,
    /// WebDriver endpoint the browser session is created against.
    pub webdriver_url: String,
    /// Credential artifact written by `setup` and read by the collector.
    pub auth_state_path: PathBuf,
    /// Directory that holds the table and chart outputs.
    pub output_dir: PathBuf,
    /// Parquet table the cleaned records are persisted to.
    pub table_path: PathBuf,
    /// PNG chart the bucketed sentiment series is rendered to.
    pub chart_path: PathBuf,
    /// Width of one sentiment bucket.
    pub bucket_interval: Duration,
    /// Plain-text log file written alongside console output.
    pub log_path: PathBuf,
}

impl PipelineConfig {
    /// Compose the search query from the hashtag set: any-of-tags OR
    /// semantics, English only, retweets excluded.
    #[must_use]
    pub fn search_query(&self) -> String {
        format!("{} lang:en -is:retweet", self.hashtags.join(" OR "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_tags(tags: &[&str]) -> PipelineConfig {
        PipelineConfig {
            tags_path: PathBuf::from("config/hashtags.yaml"),
            hashtags: tags.iter().map(|t| (*t).to_string()).collect(),
            target_count: 2000,
            headless: false,
            nav_timeout_ms: 120_000,
            webdriver_url: "http://localhost:9515".to_string(),
            auth_state_path: PathBuf::from("auth_state.json"),
            output_dir: PathBuf::from("data"),
            table_path: PathBuf::from("data/tweets.parquet"),
            chart_path: PathBuf::from("data/market_sentiment_analysis.png"),
            bucket_interval: Duration::from_secs(15 * 60),
            log_path: PathBuf::from("tagpulse.log"),
        }
    }

    #[test]
    fn search_query_joins_tags_with_or() {
        let cfg = config_with_tags(&["#nifty50", "#sensex"]);
        assert_eq!(cfg.search_query(), "#nifty50 OR #sensex lang:en -is:retweet");
    }

    #[test]
    fn search_query_single_tag_has_no_or() {
        let cfg = config_with_tags(&["#intraday"]);
        assert_eq!(cfg.search_query(), "#intraday lang:en -is:retweet");
    }
}
