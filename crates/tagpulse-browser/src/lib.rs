//! WebDriver session layer: browser launch/teardown, blocking wait helpers,
//! credential-artifact handling, and the supervised login bootstrapper.
//!
//! The scheduling contract throughout is "block until condition or timeout";
//! the async client is an implementation detail of the WebDriver protocol,
//! not a source of parallelism.

pub mod auth;
pub mod error;
pub mod login;
pub mod session;

pub use auth::{load_auth_state, restore_auth_state, save_auth_state, StoredCookie};
pub use error::BrowserError;
pub use login::run_login_setup;
pub use session::Browser;
