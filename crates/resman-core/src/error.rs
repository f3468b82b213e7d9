//! Error types for resman operations.
//!
//! Not-found and conflict outcomes are never errors: they travel as
//! [`Option`] or [`Status`](crate::types::Status) values. The variants here
//! cover connection failures, malformed input, store failures and broken
//! undo/redo entries.

use thiserror::Error;

/// Result type alias for resman operations.
pub type ResmanResult<T> = Result<T, ResmanError>;

/// Main error type for all resman operations.
#[derive(Error, Debug)]
pub enum ResmanError {
    /// The backing store could not be reached or is misconfigured.
    ///
    /// Only raised while constructing a backend; later calls assume a
    /// validated connection.
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input validation failed.
    #[error("Validation error: {message}")]
    Validation { message: String, code: ErrorCode },

    /// An undo/redo entry carried an operation tag outside insert/delete/update.
    #[error("Invalid operation in revision history: {operation}")]
    InvalidOperation { operation: String },

    /// No backend is registered under the alias.
    #[error("No session registered for alias '{alias}'")]
    SessionNotFound { alias: String },

    /// Store operation failed after a successful connection.
    #[error("Database error: {message}")]
    Database {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Client type not supported.
    #[error("Client not supported: {client}")]
    UnsupportedClient { client: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Connection (DB_00x)
    DbConnectionFailed,
    DbDatabaseNotFound,
    DbCollectionNotFound,
    DbOperationFailed,

    // Validation (VAL_xxx)
    ValMissingField,
    ValInvalidFormat,
    ValInvalidPath,

    // Revision history (REV_xxx)
    RevInvalidOperation,

    // Session (SES_xxx)
    SesNotFound,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DbConnectionFailed => "DB_001",
            ErrorCode::DbDatabaseNotFound => "DB_002",
            ErrorCode::DbCollectionNotFound => "DB_003",
            ErrorCode::DbOperationFailed => "DB_004",
            ErrorCode::ValMissingField => "VAL_001",
            ErrorCode::ValInvalidFormat => "VAL_002",
            ErrorCode::ValInvalidPath => "VAL_003",
            ErrorCode::RevInvalidOperation => "REV_001",
            ErrorCode::SesNotFound => "SES_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl ResmanError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            code: ErrorCode::DbConnectionFailed,
            source: None,
        }
    }

    /// Create a connection error with a specific code and source.
    pub fn connection_with(
        message: impl Into<String>,
        code: ErrorCode,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            code,
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidFormat,
        }
    }

    /// Create a validation error for a missing mandatory field.
    pub fn missing_field(field: &str) -> Self {
        Self::Validation {
            message: format!("resource is missing string field '{}'", field),
            code: ErrorCode::ValMissingField,
        }
    }

    /// Create an invalid operation error.
    pub fn invalid_operation(operation: impl Into<String>) -> Self {
        Self::InvalidOperation {
            operation: operation.into(),
        }
    }

    /// Create a session not found error.
    pub fn session_not_found(alias: impl Into<String>) -> Self {
        Self::SessionNotFound {
            alias: alias.into(),
        }
    }

    /// Create a database error for a store call that failed after connecting.
    pub fn database(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Database {
            message: message.into(),
            code: ErrorCode::DbOperationFailed,
            source: Some(Box::new(source)),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Connection { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            Self::Database { code, .. } => *code,
            Self::InvalidOperation { .. } => ErrorCode::RevInvalidOperation,
            Self::SessionNotFound { .. } => ErrorCode::SesNotFound,
            _ => ErrorCode::Internal,
        }
    }

    /// Whether this error came from a failed store connection.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { .. } => Some("Please check the MongoDB URI, database and collection names"),
            Self::SessionNotFound { .. } => Some("Please log in again to open a new session"),
            Self::Validation { .. } => Some("Every resource needs string 'id' and 'resource_version' fields"),
            _ => None,
        }
    }
}
