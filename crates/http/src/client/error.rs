//! Client error types

use fitrack_core::CoreError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server rejected the credential; the local session has been cleared
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Payload failed server-side validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Login or registration succeeded at the HTTP level but the response
    /// could not be turned into a session
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Credential persistence failed
    #[error("Credential storage failed: {0}")]
    Storage(#[from] CoreError),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            422 => Self::Validation(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the server reported the session as expired (HTTP 401)
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// HTTP status carried by the error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(422),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_mapping() {
        let err = ClientError::from_status(StatusCode::UNAUTHORIZED, "expired".into());
        assert!(err.is_auth_expired());
        assert_eq!(err.status(), Some(401));

        let err = ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "bad email".into());
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(!err.is_auth_expired());

        let err = ClientError::from_status(StatusCode::SERVICE_UNAVAILABLE, "down".into());
        assert!(matches!(err, ClientError::ServerError { status: 503, .. }));
    }
}
