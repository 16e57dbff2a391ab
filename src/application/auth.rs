/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Access token handling
//!
//! The provider keeps a single token slot shared by every clone of it. The slot is
//! written by `login` and read by every authenticated request. Concurrent logins
//! race and the last write wins.

use crate::constants::AUTHORIZATION_SCHEME;
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

const TOKEN_KEYS: [&str; 3] = ["access_token", "AccessToken", "accessToken"];
const ISSUED_KEYS: [&str; 2] = [".issued", "Issued"];
const EXPIRES_KEYS: [&str; 2] = [".expires", "Expires"];

/// Opaque credential returned by login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Token value
    pub access_token: String,
    /// When the token was issued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued: Option<DateTime<Utc>>,
    /// When the token expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a token without expiry metadata
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            issued: None,
            expires: None,
        }
    }

    /// Sets the expiry
    #[must_use]
    pub fn with_expiry(mut self, issued: DateTime<Utc>, expires: DateTime<Utc>) -> Self {
        self.issued = Some(issued);
        self.expires = Some(expires);
        self
    }

    /// Extracts the token from a login response
    ///
    /// Accepts `access_token`, `AccessToken` or `accessToken` for the value and
    /// `.issued` / `.expires` (RFC 3339) for the metadata. Unparseable dates are
    /// ignored.
    ///
    /// # Errors
    /// [`AppError::Decoding`] if no token value is present
    pub fn from_login_response(response: &Value) -> Result<Self, AppError> {
        let access_token = first_str(response, &TOKEN_KEYS)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::Decoding("login response has no access token".to_string()))?;

        Ok(Self {
            access_token: access_token.to_string(),
            issued: first_str(response, &ISSUED_KEYS).and_then(parse_date),
            expires: first_str(response, &EXPIRES_KEYS).and_then(parse_date),
        })
    }

    /// Checks if the token is expired or will expire within `margin_seconds`
    ///
    /// Tokens without expiry metadata never expire.
    #[must_use]
    pub fn is_expired(&self, margin_seconds: i64) -> bool {
        match self.expires {
            Some(expires) => Utc::now() + Duration::seconds(margin_seconds) >= expires,
            None => false,
        }
    }

    /// Value of the `Authorization` header
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("{AUTHORIZATION_SCHEME} {}", self.access_token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.access_token.chars().take(4).collect();
        f.debug_struct("AccessToken")
            .field("access_token", &format!("{visible}***"))
            .field("issued", &self.issued)
            .field("expires", &self.expires)
            .finish()
    }
}

fn first_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| value.get(*k).and_then(Value::as_str))
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .ok()
}

/// Persistence of the single token record
pub trait TokenStore: Send + Sync {
    /// Loads the stored token, if any
    fn load(&self) -> Result<Option<AccessToken>, AppError>;
    /// Replaces the stored token
    fn save(&self, token: &AccessToken) -> Result<(), AppError>;
    /// Removes the stored token
    fn clear(&self) -> Result<(), AppError>;
}

/// Keeps the token for the lifetime of the process only
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<AccessToken>>,
}

impl MemoryTokenStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AccessToken>, AppError> {
        Ok(self
            .token
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone())
    }

    fn save(&self, token: &AccessToken) -> Result<(), AppError> {
        *self.token.write().unwrap_or_else(|p| p.into_inner()) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.token.write().unwrap_or_else(|p| p.into_inner()) = None;
        Ok(())
    }
}

/// Stores the token as a JSON document in a file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store writing to `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the token file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AccessToken>, AppError> {
        match std::fs::read(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &AccessToken) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(token)?)?;
        debug!("Token saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Holds the current access token
#[derive(Clone)]
pub struct AuthTokenProvider {
    slot: Arc<RwLock<Option<AccessToken>>>,
    store: Arc<dyn TokenStore>,
}

impl AuthTokenProvider {
    /// Creates a provider backed by `store`, starting from the token it holds
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let initial = match store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to load stored access token: {}", e);
                None
            }
        };
        if initial.is_some() {
            debug!("Loaded stored access token");
        }
        Self {
            slot: Arc::new(RwLock::new(initial)),
            store,
        }
    }

    /// Creates a provider that keeps the token in memory only
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Stores `token`, replacing the previous one
    ///
    /// The in-memory slot is always updated; the error reports a persistence failure.
    pub fn save(&self, token: AccessToken) -> Result<(), AppError> {
        let result = self.store.save(&token);
        *self.slot.write().unwrap_or_else(|p| p.into_inner()) = Some(token);
        info!("Access token updated");
        result
    }

    /// Returns the last saved token
    #[must_use]
    pub fn current(&self) -> Option<AccessToken> {
        self.slot.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Returns the `Authorization` header value for the current token
    ///
    /// # Errors
    /// [`AppError::Unauthenticated`] if no token is stored
    pub fn authorization_header_value(&self) -> Result<String, AppError> {
        self.current()
            .map(|t| t.authorization_value())
            .ok_or(AppError::Unauthenticated)
    }

    /// Returns true if there is no token or it expires within `margin_seconds`
    #[must_use]
    pub fn needs_refresh(&self, margin_seconds: i64) -> bool {
        self.current()
            .is_none_or(|token| token.is_expired(margin_seconds))
    }

    /// Removes the token from memory and from the store
    pub fn clear(&self) -> Result<(), AppError> {
        *self.slot.write().unwrap_or_else(|p| p.into_inner()) = None;
        info!("Access token cleared");
        self.store.clear()
    }
}

impl fmt::Debug for AuthTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokenProvider")
            .field("token", &self.current())
            .finish()
    }
}

impl Default for AuthTokenProvider {
    fn default() -> Self {
        Self::in_memory()
    }
}
