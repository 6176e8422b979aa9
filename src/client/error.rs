//! Client error types
//!
//! The `Display` text of every variant is what the player sees in the toast.

use thiserror::Error;

/// Errors surfaced by the view controller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The backend answered with `ok: false` (or no `ok` at all)
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a body
    #[error("Network error, please try again")]
    Transport(String),

    /// The body was not the JSON we expected
    #[error("Unexpected server response")]
    Decode(String),

    /// The host platform has no payment sheet
    #[error("Coin purchases are only available inside Telegram")]
    PaymentUnavailable,
}

impl ClientError {
    pub(crate) fn rejected(error: Option<String>) -> Self {
        ClientError::Rejected(
            error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "Request failed".to_string()),
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_shows_backend_text() {
        let err = ClientError::rejected(Some("Not enough coins".to_string()));
        assert_eq!(err.to_string(), "Not enough coins");
    }

    #[test]
    fn test_rejected_without_text() {
        assert_eq!(ClientError::rejected(None).to_string(), "Request failed");
        assert_eq!(
            ClientError::rejected(Some("  ".to_string())).to_string(),
            "Request failed"
        );
    }

    #[test]
    fn test_causes_are_not_leaked() {
        let err = ClientError::Transport("connection refused".to_string());
        assert!(!err.to_string().contains("refused"));
    }
}
