//! Credential artifact: serialized browser cookies, written once by the
//! login bootstrapper and restored at the start of every collection run.

use std::path::Path;

use fantoccini::cookies::Cookie;
use fantoccini::Client;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::BrowserError;

/// One cookie as persisted in the credential artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub secure: Option<bool>,
    pub http_only: Option<bool>,
    /// Expiry as a Unix timestamp; `None` for session cookies.
    pub expires_unix: Option<i64>,
}

impl StoredCookie {
    fn from_cookie(cookie: &Cookie<'_>) -> Self {
        Self {
            name: cookie.name().to_string(),
            value: cookie.value().to_string(),
            domain: cookie.domain().map(str::to_string),
            path: cookie.path().map(str::to_string),
            secure: cookie.secure(),
            http_only: cookie.http_only(),
            expires_unix: cookie.expires_datetime().map(OffsetDateTime::unix_timestamp),
        }
    }

    fn into_cookie(self) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.name, self.value);
        if let Some(domain) = self.domain {
            cookie.set_domain(domain);
        }
        if let Some(path) = self.path {
            cookie.set_path(path);
        }
        if let Some(secure) = self.secure {
            cookie.set_secure(secure);
        }
        if let Some(http_only) = self.http_only {
            cookie.set_http_only(http_only);
        }
        if let Some(ts) = self.expires_unix {
            if let Ok(dt) = OffsetDateTime::from_unix_timestamp(ts) {
                cookie.set_expires(dt);
            }
        }
        cookie
    }
}

/// Capture the session's cookies and overwrite the artifact at `path`.
///
/// # Errors
///
/// Returns [`BrowserError`] if the cookies cannot be read or the file
/// cannot be written.
pub async fn save_auth_state(client: &Client, path: &Path) -> Result<(), BrowserError> {
    let cookies = client.get_all_cookies().await?;
    let stored: Vec<StoredCookie> = cookies.iter().map(StoredCookie::from_cookie).collect();

    let json = serde_json::to_vec_pretty(&stored)?;
    std::fs::write(path, json).map_err(|e| BrowserError::AuthStateIo {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(
        path = %path.display(),
        cookies = stored.len(),
        "authentication state saved"
    );
    Ok(())
}

/// Read the credential artifact back.
///
/// # Errors
///
/// Returns [`BrowserError::MissingAuthState`] if the artifact does not
/// exist, [`BrowserError::AuthStateIo`] / [`BrowserError::AuthStateParse`]
/// if it cannot be read or decoded.
pub fn load_auth_state(path: &Path) -> Result<Vec<StoredCookie>, BrowserError> {
    if !path.exists() {
        return Err(BrowserError::MissingAuthState {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read(path).map_err(|e| BrowserError::AuthStateIo {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(serde_json::from_slice(&content)?)
}

/// Install stored cookies into a live session.
///
/// The caller must already have navigated to the target origin — WebDriver
/// only accepts cookies for the current document's domain. Cookies the
/// browser rejects (expired, domain mismatch) are logged and skipped rather
/// than failing the restore.
///
/// # Errors
///
/// Does not currently fail; the signature leaves room for stricter modes.
pub async fn restore_auth_state(
    client: &Client,
    cookies: Vec<StoredCookie>,
) -> Result<(), BrowserError> {
    let total = cookies.len();
    let mut installed = 0usize;
    for stored in cookies {
        let name = stored.name.clone();
        match client.add_cookie(stored.into_cookie()).await {
            Ok(()) => installed += 1,
            Err(e) => {
                tracing::warn!(cookie = %name, error = %e, "cookie rejected during restore");
            }
        }
    }
    tracing::debug!(installed, total, "authentication state restored");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<StoredCookie> {
        vec![
            StoredCookie {
                name: "auth_token".to_string(),
                value: "abc123".to_string(),
                domain: Some(".x.com".to_string()),
                path: Some("/".to_string()),
                secure: Some(true),
                http_only: Some(true),
                expires_unix: Some(1_900_000_000),
            },
            StoredCookie {
                name: "guest_id".to_string(),
                value: "v1".to_string(),
                domain: None,
                path: None,
                secure: None,
                http_only: None,
                expires_unix: None,
            },
        ]
    }

    #[test]
    fn load_missing_artifact_is_recognized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth_state.json");
        let err = load_auth_state(&path).unwrap_err();
        assert!(matches!(err, BrowserError::MissingAuthState { .. }));
    }

    #[test]
    fn artifact_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth_state.json");
        let cookies = sample();
        std::fs::write(&path, serde_json::to_vec_pretty(&cookies).unwrap()).unwrap();

        let loaded = load_auth_state(&path).unwrap();
        assert_eq!(loaded, cookies);
    }

    #[test]
    fn malformed_artifact_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth_state.json");
        std::fs::write(&path, b"not json").unwrap();
        let err = load_auth_state(&path).unwrap_err();
        assert!(matches!(err, BrowserError::AuthStateParse(_)));
    }

    #[test]
    fn into_cookie_carries_attributes() {
        let stored = sample().remove(0);
        let cookie = stored.into_cookie();
        assert_eq!(cookie.name(), "auth_token");
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.domain(), Some(".x.com"));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.http_only(), Some(true));
        assert!(cookie.expires_datetime().is_some());
    }
}
