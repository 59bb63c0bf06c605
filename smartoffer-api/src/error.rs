use serde::Serialize;
use thiserror::Error;

/// Unified error type for all backend API operations.
///
/// All variants are serializable for structured error reporting, tagged by
/// `code` so UI layers can branch on the failure class without string
/// matching.
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// The backend base URL is not configured.
    ///
    /// This is a fatal configuration error and is raised before any network
    /// call is attempted.
    #[error("backend base URL is not configured (set SMARTOFFER_API_BASE_URL)")]
    MissingBaseUrl,

    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, failure reading the response body, etc.).
    #[error("network error: {detail}")]
    Network {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("request timeout: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The backend answered with a non-success HTTP status.
    ///
    /// Carries the raw response body so callers can surface whatever detail
    /// the backend supplied.
    #[error("API error {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// Failed to parse the backend's JSON response.
    #[error("parse error: {detail}")]
    Parse {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    #[error("serialization error: {detail}")]
    Serialization {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ApiError {
    /// Whether this is expected behavior (bad user input, missing resource)
    /// rather than an infrastructure failure, used for log level selection.
    ///
    /// Returns `true` for 4xx HTTP responses; callers should log those at
    /// `warn` and everything else at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Http { status, .. } if (400..500).contains(status))
    }
}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
