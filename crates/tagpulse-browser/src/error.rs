use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to create WebDriver session: {0}")]
    NewSession(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    #[error("timed out waiting for \"{selector}\"")]
    WaitTimeout { selector: String },

    #[error("credential artifact not found at {path}")]
    MissingAuthState { path: String },

    #[error("failed to access credential artifact {path}: {source}")]
    AuthStateIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("credential artifact is malformed: {0}")]
    AuthStateParse(#[from] serde_json::Error),

    #[error("unexpected script result: {0}")]
    UnexpectedScriptResult(String),
}

impl BrowserError {
    /// True when the error is a condition-wait expiring, which callers in
    /// the scroll loop treat as a soft end-of-stream signal rather than a
    /// hard failure.
    #[must_use]
    pub fn is_wait_timeout(&self) -> bool {
        matches!(self, BrowserError::WaitTimeout { .. })
    }
}
