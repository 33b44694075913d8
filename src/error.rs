//! Error types for Blesspets
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Blesspets operations
///
/// This enum encompasses all possible errors that can occur while talking
/// to the remote inventory service, managing the local session, or loading
/// configuration.
#[derive(Error, Debug)]
pub enum BlesspetsError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A retried read operation consumed all of its attempts
    ///
    /// Carries the error from the final attempt as its source; callers that
    /// care about the underlying cause (a 404, a transport failure) inspect
    /// the source chain.
    #[error("all {attempts} attempts failed: {source}")]
    FetchExhausted {
        /// Total attempts issued before giving up
        attempts: u32,
        /// Error from the last attempt
        #[source]
        source: Box<BlesspetsError>,
    },

    /// The service answered 404 for the requested pet
    #[error("pet {id} not found")]
    NotFound {
        /// Identifier that was requested
        id: i64,
    },

    /// Non-success status on a read attempt
    #[error("HTTP {status}")]
    UnexpectedStatus {
        /// HTTP status code returned by the service
        status: u16,
    },

    /// Pet creation rejected by the service
    #[error("failed to create pet (HTTP {status})")]
    CreateFailed {
        /// HTTP status code returned by the service
        status: u16,
    },

    /// Pet update rejected by the service
    #[error("failed to update pet (HTTP {status})")]
    UpdateFailed {
        /// HTTP status code returned by the service
        status: u16,
    },

    /// Pet deletion rejected by the service
    #[error("failed to delete pet (HTTP {status})")]
    DeleteFailed {
        /// HTTP status code returned by the service
        status: u16,
    },

    /// Image upload rejected by the service
    #[error("failed to upload image (HTTP {status})")]
    UploadFailed {
        /// HTTP status code returned by the service
        status: u16,
    },

    /// A successful response whose payload is unusable
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Login credential pair did not match
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Session store read/write failure
    #[error("session store error: {0}")]
    Store(String),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Blesspets operations
pub type Result<T> = std::result::Result<T, BlesspetsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = BlesspetsError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_not_found_display() {
        let error = BlesspetsError::NotFound { id: 42 };
        assert_eq!(error.to_string(), "pet 42 not found");
    }

    #[test]
    fn test_fetch_exhausted_display_includes_last_error() {
        let error = BlesspetsError::FetchExhausted {
            attempts: 3,
            source: Box::new(BlesspetsError::NotFound { id: 7 }),
        };
        let s = error.to_string();
        assert!(s.contains("3 attempts"));
        assert!(s.contains("pet 7 not found"));
    }

    #[test]
    fn test_fetch_exhausted_source_is_inspectable() {
        use std::error::Error as _;

        let error = BlesspetsError::FetchExhausted {
            attempts: 2,
            source: Box::new(BlesspetsError::UnexpectedStatus { status: 500 }),
        };
        let source = error.source().expect("source should be present");
        assert_eq!(source.to_string(), "HTTP 500");
    }

    #[test]
    fn test_write_failures_carry_status() {
        assert_eq!(
            BlesspetsError::CreateFailed { status: 400 }.to_string(),
            "failed to create pet (HTTP 400)"
        );
        assert_eq!(
            BlesspetsError::UpdateFailed { status: 500 }.to_string(),
            "failed to update pet (HTTP 500)"
        );
        assert_eq!(
            BlesspetsError::DeleteFailed { status: 404 }.to_string(),
            "failed to delete pet (HTTP 404)"
        );
        assert_eq!(
            BlesspetsError::UploadFailed { status: 413 }.to_string(),
            "failed to upload image (HTTP 413)"
        );
    }

    #[test]
    fn test_invalid_credentials_display() {
        let error = BlesspetsError::InvalidCredentials;
        assert_eq!(error.to_string(), "invalid credentials");
    }

    #[test]
    fn test_malformed_payload_display() {
        let error = BlesspetsError::MalformedPayload("pet id missing".to_string());
        assert_eq!(error.to_string(), "malformed payload: pet id missing");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: BlesspetsError = io_error.into();
        assert!(matches!(error, BlesspetsError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let error: BlesspetsError = json_error.into();
        assert!(matches!(error, BlesspetsError::Serialization(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BlesspetsError>();
    }
}
