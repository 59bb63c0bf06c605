//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export the transport error type
pub use smartoffer_api::ApiError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A send was requested with no supplier selected.
    #[error("No suppliers selected")]
    NoSuppliersSelected,

    /// A search-derived supplier is selected but no backend job id is
    /// available to correlate delivery statuses.
    #[error("Backend job id required for search-derived recipients")]
    MissingJobId,

    /// A manual supplier entry does not look like an email address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Validation error (bad user input, illegal status transition, etc.)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Settings storage layer error
    #[error("Settings error: {0}")]
    SettingsError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Backend API error (converted from the client crate)
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    /// Whether this is expected behavior (user input, missing resource),
    /// used for log level selection.
    ///
    /// Returns `true` for `warn`-level conditions, `false` for `error`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NoSuppliersSelected
            | Self::MissingJobId
            | Self::InvalidEmail(_)
            | Self::ValidationError(_) => true,
            Self::Api(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
