//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend rejected the payload (400 / 422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Response body did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The same action is already being submitted
    #[error("Another submission is still in progress")]
    Busy,

    /// Client could not be built from its configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Map a failed response to an error, using the backend `message` when present
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::Api { status, message },
        }
    }

    /// Screens render a dedicated "not found" view for these
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    /// Text for a transient notification
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(e) if e.is_timeout() => {
                "The server took too long to respond. Please try again.".to_string()
            }
            ClientError::Http(_) => "Could not reach the server. Please try again.".to_string(),
            ClientError::Api { message, .. }
            | ClientError::NotFound(message)
            | ClientError::Validation(message)
                if !message.is_empty() =>
            {
                message.clone()
            }
            ClientError::Api { .. } => "Something went wrong. Please try again.".to_string(),
            ClientError::NotFound(_) => "The requested record was not found.".to_string(),
            ClientError::Validation(_) => "Some fields are invalid.".to_string(),
            ClientError::Unauthorized => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ClientError::Serialization(_) => "The server sent an unexpected response.".to_string(),
            ClientError::Busy => "Please wait for the current submission to finish.".to_string(),
            ClientError::Config(message) => message.clone(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ClientError::Unauthorized
        ));
        assert!(ClientError::from_status(StatusCode::NOT_FOUND, "gone".into()).is_not_found());
        assert!(matches!(
            ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "bad".into()),
            ClientError::Validation(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::CONFLICT, "dup".into()),
            ClientError::Api { status: StatusCode::CONFLICT, .. }
        ));
    }

    #[test]
    fn test_user_message_prefers_backend_text() {
        let err = ClientError::from_status(StatusCode::CONFLICT, "SKU already exists".into());
        assert_eq!(err.user_message(), "SKU already exists");

        let err = ClientError::from_status(StatusCode::NOT_FOUND, String::new());
        assert_eq!(err.user_message(), "The requested record was not found.");
        assert_eq!(
            ClientError::Busy.user_message(),
            "Please wait for the current submission to finish."
        );
    }
}
