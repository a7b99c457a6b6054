//! Bearer credential passed explicitly to every store call

use super::error::ApiError;
use std::sync::RwLock;

/// Holds the bearer token for the current run
///
/// Set at login, cleared at logout and whenever the store answers 401.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    /// Session with an optional token; blank tokens count as none
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token.filter(|t| !t.trim().is_empty())),
        }
    }

    /// Session with no credential
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Current token
    ///
    /// # Errors
    /// Returns [`ApiError::NotAuthenticated`] when no token is held
    pub fn token(&self) -> Result<String, ApiError> {
        self.current().ok_or(ApiError::NotAuthenticated)
    }

    /// Current token, if any
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    /// True if a token is held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// Store a new token
    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    /// Drop the token
    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            if slot.take().is_some() {
                logger::debug!("Session credential cleared");
            }
        }
    }
}
