pub mod clean;
pub mod encoding;
pub mod error;
pub mod process;
pub mod record;
pub mod store;

pub use clean::clean_post_text;
pub use encoding::repair_mojibake;
pub use error::{ProcessError, StoreError};
pub use process::process_posts;
pub use record::CleanedRecord;
pub use store::{read_records, write_records};
