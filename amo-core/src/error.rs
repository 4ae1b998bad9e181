//! Global error types for the amoCRM client.
//!
//! Every failure the client can surface is a variant of a single `AmoError`
//! enum: HTTP statuses from the API, transport-level failures, and local
//! input-sanity checks. `AmoError::from_status` is the one place where a
//! status code turns into an error kind.

use thiserror::Error;

/// Convenience type alias for Results using AmoError.
pub type AmoResult<T> = Result<T, AmoError>;

/// Unified error type covering all failure categories in the client.
#[derive(Error, Debug)]
pub enum AmoError {
    // -- API errors, mapped from HTTP status codes --
    /// The API rejected the request data (400/422), or a local
    /// input-sanity check failed before any request was sent.
    #[error("validation error: {message}")]
    Validation {
        message: String,
        /// HTTP status, absent for local validation failures.
        status: Option<u16>,
        /// Raw response body, absent for local validation failures.
        body: Option<String>,
    },

    /// Authentication failed (401).
    #[error("authentication failed: {message}")]
    Authentication {
        message: String,
        status: u16,
        body: Option<String>,
    },

    /// The access token has expired and must be re-issued.
    #[error("access token expired: {0}")]
    TokenExpired(String),

    /// The token is valid but lacks access rights (403).
    #[error("access denied: {message}")]
    Authorization {
        message: String,
        status: u16,
        body: Option<String>,
    },

    /// The requested resource does not exist (404).
    #[error("not found: {message}")]
    NotFound {
        message: String,
        status: u16,
        body: Option<String>,
    },

    /// A specific entity was looked up and does not exist.
    #[error("{entity_type} with id {id} not found")]
    EntityNotFound { entity_type: String, id: i64 },

    /// The account request quota was exceeded (429).
    #[error("rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        status: u16,
        body: Option<String>,
    },

    /// The API reported a server-side failure (5xx).
    #[error("server error (status {status}): {message}")]
    Server {
        status: u16,
        message: String,
        body: Option<String>,
    },

    /// Any other HTTP error status without a dedicated kind.
    #[error("api error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<String>,
    },

    /// The account-level quota (storage, seats, ...) is exhausted.
    #[error("account quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The operation is not available for this entity type.
    #[error("operation '{operation}' is not supported for entity type '{entity_type}'")]
    UnsupportedOperation {
        operation: String,
        entity_type: String,
    },

    /// Creating the entity would duplicate an existing one.
    #[error("duplicate entity: {0}")]
    DuplicateEntity(String),

    // -- Transport errors, never conflated with HTTP statuses --
    /// The request never produced an HTTP response (DNS, connect, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out at the transport level.
    #[error("request timeout: {0}")]
    Timeout(String),

    // -- Configuration errors --
    /// Failed to load or parse client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Local errors --
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AmoError {
    /// Build a local validation error (no request was sent).
    pub fn validation(message: impl Into<String>) -> Self {
        AmoError::Validation {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Map an HTTP error status to the matching error kind.
    ///
    /// 400/422 are validation rejections, 401 authentication, 403
    /// authorization, 404 not-found, 429 rate limiting, 5xx server
    /// failures. Every other status falls back to the generic `Api` kind.
    pub fn from_status(status: u16, message: impl Into<String>, body: Option<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => AmoError::Validation {
                message,
                status: Some(status),
                body,
            },
            401 => AmoError::Authentication {
                message,
                status,
                body,
            },
            403 => AmoError::Authorization {
                message,
                status,
                body,
            },
            404 => AmoError::NotFound {
                message,
                status,
                body,
            },
            429 => AmoError::RateLimit {
                message,
                status,
                body,
            },
            500..=599 => AmoError::Server {
                status,
                message,
                body,
            },
            _ => AmoError::Api {
                status,
                message,
                body,
            },
        }
    }

    /// The HTTP status this error carries, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            AmoError::Validation { status, .. } => *status,
            AmoError::Authentication { status, .. }
            | AmoError::Authorization { status, .. }
            | AmoError::NotFound { status, .. }
            | AmoError::RateLimit { status, .. }
            | AmoError::Server { status, .. }
            | AmoError::Api { status, .. } => Some(*status),
            AmoError::EntityNotFound { .. } => Some(404),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AmoError {
    fn from(e: serde_json::Error) -> Self {
        AmoError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for AmoError {
    fn from(e: toml::de::Error) -> Self {
        AmoError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_table() {
        assert!(matches!(
            AmoError::from_status(400, "bad", None),
            AmoError::Validation { status: Some(400), .. }
        ));
        assert!(matches!(
            AmoError::from_status(422, "bad", None),
            AmoError::Validation { status: Some(422), .. }
        ));
        assert!(matches!(
            AmoError::from_status(401, "no", None),
            AmoError::Authentication { status: 401, .. }
        ));
        assert!(matches!(
            AmoError::from_status(403, "no", None),
            AmoError::Authorization { status: 403, .. }
        ));
        assert!(matches!(
            AmoError::from_status(404, "gone", None),
            AmoError::NotFound { status: 404, .. }
        ));
        assert!(matches!(
            AmoError::from_status(429, "slow down", None),
            AmoError::RateLimit { status: 429, .. }
        ));
    }

    #[test]
    fn test_status_mapping_server_range() {
        for status in [500, 502, 503, 504, 599] {
            assert!(
                matches!(
                    AmoError::from_status(status, "boom", None),
                    AmoError::Server { .. }
                ),
                "status {status} should map to Server"
            );
        }
    }

    #[test]
    fn test_status_mapping_fallback() {
        for status in [402, 405, 409, 410, 418] {
            assert!(
                matches!(
                    AmoError::from_status(status, "odd", None),
                    AmoError::Api { .. }
                ),
                "status {status} should fall back to Api"
            );
        }
    }

    #[test]
    fn test_error_carries_status_and_body() {
        let err = AmoError::from_status(422, "field missing", Some(r#"{"detail":"x"}"#.into()));
        assert_eq!(err.status(), Some(422));
        match err {
            AmoError::Validation { body, .. } => assert!(body.unwrap().contains("detail")),
            _ => panic!("expected Validation"),
        }
    }

    #[test]
    fn test_local_validation_has_no_status() {
        let err = AmoError::validation("entity id must be positive");
        assert_eq!(err.status(), None);
        assert_eq!(
            err.to_string(),
            "validation error: entity id must be positive"
        );
    }

    #[test]
    fn test_entity_not_found_display() {
        let err = AmoError::EntityNotFound {
            entity_type: "leads".into(),
            id: 42,
        };
        assert_eq!(err.to_string(), "leads with id 42 not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_unsupported_operation_display() {
        let err = AmoError::UnsupportedOperation {
            operation: "links".into(),
            entity_type: "tasks".into(),
        };
        assert_eq!(
            err.to_string(),
            "operation 'links' is not supported for entity type 'tasks'"
        );
    }
}
