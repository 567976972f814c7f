use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// A record's temporal identity is not negotiable: malformed timestamps
    /// fail the run, unlike best-effort engagement counters.
    #[error("post {id} has an unparseable timestamp \"{value}\": {source}")]
    InvalidTimestamp {
        id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access table file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("table schema mismatch: {0}")]
    Schema(String),
}
