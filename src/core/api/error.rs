//! Failures at the store boundary

use thiserror::Error;

/// Error raised by any store call
#[derive(Debug, Error)]
pub enum ApiError {
    /// No credential in the session; nothing was sent
    #[error("not authenticated: run `gymevo login` first")]
    NotAuthenticated,

    /// The store answered 401; the session has been cleared
    #[error("session expired: log in again")]
    Unauthorized,

    /// Any other non-success status
    #[error("{url} returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
        /// Message extracted from the body, or the status reason
        message: String,
    },

    /// Transport failure (connection refused, DNS, TLS...)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Configured endpoint or derived path is not a valid URL
    #[error("invalid endpoint '{0}'")]
    InvalidEndpoint(String),

    /// Body did not match the expected shape
    #[error("could not decode response from {url}: {source}")]
    Decode {
        /// Requested URL
        url: String,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

impl ApiError {
    /// True for errors that require logging in again
    #[must_use]
    pub const fn needs_login(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::Unauthorized)
    }
}

/// Pull a human message out of an error body
///
/// Looks for `mensagem`, `erro`, `message` or `error` string fields, then
/// falls back to the raw (trimmed) body.
#[must_use]
pub fn extract_message(body: &str) -> Option<String> {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        for key in ["mensagem", "erro", "message", "error"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key) {
                return Some(msg.clone());
            }
        }
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_prefers_known_keys() {
        assert_eq!(
            extract_message(r#"{"mensagem": "Aluno não encontrado"}"#).as_deref(),
            Some("Aluno não encontrado")
        );
        assert_eq!(
            extract_message(r#"{"code": 5, "message": "boom"}"#).as_deref(),
            Some("boom")
        );
        assert_eq!(extract_message("  bad gateway ").as_deref(), Some("bad gateway"));
        assert_eq!(extract_message(""), None);
    }

    #[test]
    fn test_needs_login() {
        assert!(ApiError::Unauthorized.needs_login());
        assert!(!ApiError::InvalidEndpoint("x".into()).needs_login());
    }
}
