use thiserror::Error;

mod app_config;
mod config;
mod tags;

pub use app_config::PipelineConfig;
pub use config::{load_config, load_config_from_env, parse_interval};
pub use tags::{load_hashtags, HashtagsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read hashtags file {path}: {source}")]
    TagsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse hashtags file: {0}")]
    TagsFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
