//! Unified application error types.
//!
//! Every crate maps its failures into [`AppError`] so a single error type
//! crosses the service boundary. The transport layer decides the status
//! code from [`ErrorKind`] alone and never inspects the message text.

use std::fmt;
use thiserror::Error;

/// Closed set of error categories.
///
/// `NotFound`, `BadRequest` and `IllegalOperation` are produced by
/// hierarchy validation. The remaining kinds are the opaque internal
/// fallback for store, connectivity and bootstrap failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The entity the operation acts on does not exist.
    NotFound,
    /// A referenced parent or destination does not exist, or the request is malformed.
    BadRequest,
    /// Every referenced entity exists but the operation breaks a structural rule.
    IllegalOperation,
    /// The backing store failed.
    Database,
    /// Configuration could not be loaded or is invalid.
    Configuration,
    /// Any other unclassified failure.
    Internal,
}

impl ErrorKind {
    /// Whether this kind belongs to the opaque internal fallback.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Database | Self::Configuration | Self::Internal)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::IllegalOperation => write!(f, "ILLEGAL_OPERATION"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error.
///
/// Store-specific errors are wrapped with [`AppError::with_source`] so the
/// calling context travels in `message` while the original cause stays
/// reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable, diagnostic-only message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a bad-request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Create an illegal-operation error.
    pub fn illegal_operation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IllegalOperation, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error belongs to the opaque internal fallback.
    pub fn is_internal(&self) -> bool {
        self.kind.is_internal()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
