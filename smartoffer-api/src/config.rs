//! Backend connection configuration.
//!
//! The base URL and credentials are explicit constructor inputs rather than
//! process-wide state: whoever builds the [`HttpBackend`](crate::HttpBackend)
//! decides where requests go, and tests can inject an entirely different
//! [`BackendApi`](crate::BackendApi) implementation.

use crate::error::{ApiError, Result};

/// Environment variable holding the backend base URL.
pub const ENV_BASE_URL: &str = "SMARTOFFER_API_BASE_URL";

/// Environment variable holding an optional API key.
pub const ENV_API_KEY: &str = "SMARTOFFER_API_KEY";

/// Credentials attached to every backend request.
///
/// Both fields are optional; the backend decides which scheme it requires.
/// An API key is sent as `X-API-Key`, a bearer token as `Authorization`.
#[derive(Debug, Clone, Default)]
pub struct AuthCredentials {
    /// Static API key, if the deployment uses key auth.
    pub api_key: Option<String>,
    /// Bearer token obtained from `/auth/login`.
    pub bearer_token: Option<String>,
}

/// Connection settings for the Smartoffer backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. `http://127.0.0.1:10000`.
    pub base_url: String,
    /// Credentials merged into every request.
    pub auth: AuthCredentials,
}

impl BackendConfig {
    /// Create a configuration with the given base URL and no credentials.
    ///
    /// A trailing slash is trimmed so paths can always start with `/`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ApiError::MissingBaseUrl);
        }
        Ok(Self {
            base_url: trimmed.to_string(),
            auth: AuthCredentials::default(),
        })
    }

    /// Read the configuration from the environment.
    ///
    /// `SMARTOFFER_API_BASE_URL` is required; `SMARTOFFER_API_KEY` is picked
    /// up when present.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(ENV_BASE_URL).map_err(|_| ApiError::MissingBaseUrl)?;
        let mut config = Self::new(base_url)?;
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.trim().is_empty() {
                config.auth.api_key = Some(key);
            }
        }
        Ok(config)
    }

    /// Attach an API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.auth.api_key = Some(api_key.into());
        self
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth.bearer_token = Some(token.into());
        self
    }
}
