pub mod analyze;
pub mod error;
pub mod plot;
pub mod scorer;
pub mod series;

pub use analyze::analyze;
pub use error::AnalysisError;
pub use scorer::lexicon_score;
pub use series::{bucket_scores, SentimentBucket};
