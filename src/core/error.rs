//! Typed error handling for the customer registry
//!
//! Every failure a caller can observe maps to one variant of
//! [`RegistryError`], which knows its HTTP status, a stable error code and
//! how to render itself as a JSON body.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: schema/checksum failures and unreadable bodies
//! - `Conflict` / `NotFound`: key constraints on the customer table
//! - [`LookupError`]: registry passthrough failures
//! - [`StorageError`]: storage backend failures
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get("11222333000181").await {
//!     Ok(record) => println!("Found: {}", record.legal_name),
//!     Err(RegistryError::NotFound { tax_id }) => println!("{tax_id} not found"),
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```

use crate::core::validation::FieldErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Input failed schema validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A customer with this tax identifier already exists
    #[error("customer '{tax_id}' already exists")]
    Conflict { tax_id: String },

    /// No customer with this tax identifier
    #[error("customer '{tax_id}' not found")]
    NotFound { tax_id: String },

    /// Registry lookup failed
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Storage backend failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Should not happen in normal operation
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body
///
/// `error` is always present; `fields` only accompanies validation
/// failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl RegistryError {
    pub fn not_found(tax_id: impl Into<String>) -> Self {
        RegistryError::NotFound {
            tax_id: tax_id.into(),
        }
    }

    pub fn conflict(tax_id: impl Into<String>) -> Self {
        RegistryError::Conflict {
            tax_id: tax_id.into(),
        }
    }

    /// HTTP status code for this error
    ///
    /// Duplicate keys answer 400, the same as any other rejected
    /// submission.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::Validation(_) => StatusCode::BAD_REQUEST,
            RegistryError::Conflict { .. } => StatusCode::BAD_REQUEST,
            RegistryError::NotFound { .. } => StatusCode::NOT_FOUND,
            RegistryError::Lookup(e) => e.status_code(),
            RegistryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RegistryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RegistryError::Validation(e) => e.error_code(),
            RegistryError::Conflict { .. } => "CUSTOMER_ALREADY_EXISTS",
            RegistryError::NotFound { .. } => "CUSTOMER_NOT_FOUND",
            RegistryError::Lookup(e) => e.error_code(),
            RegistryError::Storage(_) => "STORAGE_ERROR",
            RegistryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let fields = match self {
            RegistryError::Validation(ValidationError::Fields(errors)) => Some(errors.clone()),
            _ => None,
        };
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            fields,
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::warn!(code = self.error_code(), "{}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Input rejected before reaching storage
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more field rules failed
    #[error("invalid customer: {0}")]
    Fields(FieldErrors),

    /// Body is not JSON of the expected shape
    #[error("invalid request body: {message}")]
    InvalidBody { message: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::Fields(_) => "VALIDATION_ERROR",
            ValidationError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

impl From<FieldErrors> for ValidationError {
    fn from(errors: FieldErrors) -> Self {
        ValidationError::Fields(errors)
    }
}

impl From<FieldErrors> for RegistryError {
    fn from(errors: FieldErrors) -> Self {
        RegistryError::Validation(ValidationError::Fields(errors))
    }
}

// =============================================================================
// Lookup Errors
// =============================================================================

/// Which registry a lookup targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    TaxId,
    PostalCode,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKind::TaxId => f.write_str("tax ID"),
            LookupKind::PostalCode => f.write_str("postal code"),
        }
    }
}

/// Failures of the registry passthrough
#[derive(Debug, Error)]
pub enum LookupError {
    /// Key does not have the shape the registry expects
    #[error("invalid {kind} '{value}'")]
    InvalidKey { kind: LookupKind, value: String },

    /// Registry answered with a non-success status
    #[error("{kind} registry returned HTTP {status}")]
    UpstreamStatus { kind: LookupKind, status: u16 },

    /// Registry did not answer in time
    #[error("{kind} registry timed out")]
    Timeout { kind: LookupKind },

    /// Registry could not be reached
    #[error("{kind} registry unreachable: {message}")]
    Transport { kind: LookupKind, message: String },

    /// Registry answered with something that is not JSON
    #[error("{kind} registry returned a malformed response: {message}")]
    MalformedResponse { kind: LookupKind, message: String },
}

impl LookupError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::InvalidKey { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            LookupError::InvalidKey { .. } => "INVALID_LOOKUP_KEY",
            _ => "UPSTREAM_FAILURE",
        }
    }

    /// `true` for every failure attributable to the registry itself
    pub fn is_upstream(&self) -> bool {
        !matches!(self, LookupError::InvalidKey { .. })
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to connect to {backend}: {message}")]
    Connection { backend: String, message: String },

    #[error("{backend} query error: {message}")]
    Query { backend: String, message: String },

    #[error("storage lock poisoned: {message}")]
    Poisoned { message: String },
}

/// A specialized Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
