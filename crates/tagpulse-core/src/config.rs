use std::path::PathBuf;
use std::time::Duration;

use crate::app_config::PipelineConfig;
use crate::tags::load_hashtags;
use crate::ConfigError;

/// Load pipeline configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars, then loads and validates the hashtags file.
///
/// # Errors
///
/// Returns `ConfigError` if an env var value is invalid or the hashtags
/// file cannot be loaded.
pub fn load_config() -> Result<PipelineConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load pipeline configuration from environment variables already in the
/// process.
///
/// Unlike [`load_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an env var value is invalid or the hashtags
/// file cannot be loaded.
pub fn load_config_from_env() -> Result<PipelineConfig, ConfigError> {
    let mut cfg = build_config(|key| std::env::var(key))?;
    cfg.hashtags = load_hashtags(&cfg.tags_path)?;
    Ok(cfg)
}

/// Build pipeline configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup. The
/// `hashtags` field is left empty; callers that need it load the tags file
/// separately (see [`load_config_from_env`]).
fn build_config<F>(lookup: F) -> Result<PipelineConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got \"{other}\""),
            }),
        }
    };

    let tags_path = PathBuf::from(or_default("TAGPULSE_TAGS_PATH", "./config/hashtags.yaml"));
    let target_count = parse_usize("TAGPULSE_TARGET_COUNT", "2000")?;
    let headless = parse_bool("TAGPULSE_HEADLESS", "false")?;
    let nav_timeout_ms = parse_u64("TAGPULSE_NAV_TIMEOUT_MS", "120000")?;
    let webdriver_url = or_default("TAGPULSE_WEBDRIVER_URL", "http://localhost:9515");
    let auth_state_path = PathBuf::from(or_default("TAGPULSE_AUTH_STATE", "auth_state.json"));

    let output_dir = PathBuf::from(or_default("TAGPULSE_OUTPUT_DIR", "data"));
    let table_path = match lookup("TAGPULSE_TABLE_PATH") {
        Ok(p) => PathBuf::from(p),
        Err(_) => output_dir.join("tweets.parquet"),
    };
    let chart_path = match lookup("TAGPULSE_CHART_PATH") {
        Ok(p) => PathBuf::from(p),
        Err(_) => output_dir.join("market_sentiment_analysis.png"),
    };

    let interval_raw = or_default("TAGPULSE_BUCKET_INTERVAL", "15min");
    let bucket_interval =
        parse_interval(&interval_raw).map_err(|reason| ConfigError::InvalidEnvVar {
            var: "TAGPULSE_BUCKET_INTERVAL".to_string(),
            reason,
        })?;

    let log_path = PathBuf::from(or_default("TAGPULSE_LOG_PATH", "tagpulse.log"));

    Ok(PipelineConfig {
        tags_path,
        hashtags: Vec::new(),
        target_count,
        headless,
        nav_timeout_ms,
        webdriver_url,
        auth_state_path,
        output_dir,
        table_path,
        chart_path,
        bucket_interval,
        log_path,
    })
}

/// Parse a duration string like `"15min"`, `"90s"` or `"1h"` into a
/// [`Duration`].
///
/// Recognized suffixes: `s`, `min`, `m` (minutes), `h`. Whitespace between
/// the number and the unit is tolerated (`"15 min"`). Zero-length intervals
/// are rejected.
///
/// # Errors
///
/// Returns a human-readable reason string on malformed input.
pub fn parse_interval(raw: &str) -> Result<Duration, String> {
    let s = raw.trim();
    let digits_end = s
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("missing unit suffix in \"{raw}\""))?;
    let (num, unit) = s.split_at(digits_end);

    let value: u64 = num
        .parse()
        .map_err(|_| format!("invalid number in \"{raw}\""))?;
    if value == 0 {
        return Err(format!("interval must be non-zero: \"{raw}\""));
    }

    let secs = match unit.trim() {
        "s" | "sec" | "secs" => value,
        "m" | "min" | "mins" | "minute" | "minutes" => value * 60,
        "h" | "hr" | "hour" | "hours" => value * 3600,
        other => return Err(format!("unknown interval unit \"{other}\"")),
    };
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_config_all_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.target_count, 2000);
        assert!(!cfg.headless);
        assert_eq!(cfg.nav_timeout_ms, 120_000);
        assert_eq!(cfg.webdriver_url, "http://localhost:9515");
        assert_eq!(cfg.auth_state_path, PathBuf::from("auth_state.json"));
        assert_eq!(cfg.table_path, PathBuf::from("data/tweets.parquet"));
        assert_eq!(
            cfg.chart_path,
            PathBuf::from("data/market_sentiment_analysis.png")
        );
        assert_eq!(cfg.bucket_interval, Duration::from_secs(900));
    }

    #[test]
    fn build_config_table_path_follows_output_dir() {
        let mut map = HashMap::new();
        map.insert("TAGPULSE_OUTPUT_DIR", "out");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.table_path, PathBuf::from("out/tweets.parquet"));
        assert_eq!(
            cfg.chart_path,
            PathBuf::from("out/market_sentiment_analysis.png")
        );
    }

    #[test]
    fn build_config_explicit_table_path_wins() {
        let mut map = HashMap::new();
        map.insert("TAGPULSE_OUTPUT_DIR", "out");
        map.insert("TAGPULSE_TABLE_PATH", "elsewhere/posts.parquet");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.table_path, PathBuf::from("elsewhere/posts.parquet"));
    }

    #[test]
    fn build_config_headless_override() {
        let mut map = HashMap::new();
        map.insert("TAGPULSE_HEADLESS", "true");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.headless);
    }

    #[test]
    fn build_config_invalid_bool_rejected() {
        let mut map = HashMap::new();
        map.insert("TAGPULSE_HEADLESS", "maybe");
        let result = build_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAGPULSE_HEADLESS"),
            "expected InvalidEnvVar(TAGPULSE_HEADLESS), got: {result:?}"
        );
    }

    #[test]
    fn build_config_invalid_target_count_rejected() {
        let mut map = HashMap::new();
        map.insert("TAGPULSE_TARGET_COUNT", "lots");
        let result = build_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAGPULSE_TARGET_COUNT"),
            "expected InvalidEnvVar(TAGPULSE_TARGET_COUNT), got: {result:?}"
        );
    }

    #[test]
    fn build_config_invalid_interval_rejected() {
        let mut map = HashMap::new();
        map.insert("TAGPULSE_BUCKET_INTERVAL", "15fortnights");
        let result = build_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAGPULSE_BUCKET_INTERVAL"),
            "expected InvalidEnvVar(TAGPULSE_BUCKET_INTERVAL), got: {result:?}"
        );
    }

    #[test]
    fn parse_interval_minutes() {
        assert_eq!(parse_interval("15min").unwrap(), Duration::from_secs(900));
        assert_eq!(parse_interval("15 min").unwrap(), Duration::from_secs(900));
        assert_eq!(
            parse_interval("15 minutes").unwrap(),
            Duration::from_secs(900)
        );
    }

    #[test]
    fn parse_interval_seconds_and_hours() {
        assert_eq!(parse_interval("90s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_interval("1h").unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn parse_interval_rejects_zero() {
        assert!(parse_interval("0min").is_err());
    }

    #[test]
    fn parse_interval_rejects_missing_unit() {
        assert!(parse_interval("15").is_err());
    }

    #[test]
    fn parse_interval_rejects_unknown_unit() {
        assert!(parse_interval("3weeks").is_err());
    }

    #[test]
    fn parse_interval_rejects_garbage() {
        assert!(parse_interval("soon").is_err());
    }
}
