pub mod collector;
pub mod metrics;
pub mod parse;
pub mod progress;
pub mod selectors;
pub mod types;

pub use collector::collect_posts;
pub use metrics::parse_metric_count;
pub use types::RawPost;
