//! # smartoffer-api
//!
//! Typed async HTTP client for the Smartoffer supplier-discovery and RFQ
//! backend.
//!
//! The crate exposes the backend contract as the [`BackendApi`] trait plus a
//! reqwest-backed [`HttpBackend`] implementation. Business logic lives in
//! `smartoffer-core`, which only depends on the trait, so tests and offline
//! environments can substitute their own implementation.
//!
//! ## TLS Backend
//!
//! - **`native-tls`** *(default)*: platform native TLS.
//! - **`rustls`**: rustls; recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use smartoffer_api::{BackendApi, BackendConfig, HttpBackend, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BackendConfig::new("http://127.0.0.1:10000")?.with_api_key("key");
//!     let backend = HttpBackend::new(config);
//!
//!     let response = backend
//!         .search(&SearchRequest {
//!             query: "centrifugal pump 30 kW".to_string(),
//!             lang: "ru".to_string(),
//!             top_k: 20,
//!             enrich_emails: true,
//!             yandex_pages_cap: 5,
//!             ddg_pages_cap: 3,
//!         })
//!         .await?;
//!     println!("job {:?}, {} results", response.job_id, response.results.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError). Non-2xx
//! responses become [`ApiError::Http`] carrying the status and raw body;
//! transport failures become [`ApiError::Network`] / [`ApiError::Timeout`].

mod backend;
mod config;
mod error;
mod http;
mod traits;
mod types;

pub use backend::HttpBackend;
pub use config::{AuthCredentials, BackendConfig, ENV_API_KEY, ENV_BASE_URL};
pub use error::{ApiError, Result};
pub use traits::BackendApi;
pub use types::{
    DeliveryState, EmailDeliveryStatus, EmailProviderPreset, EmailSendOut, EmailSendRequest,
    EmailSettingsRequest, HistoryDetailResponse, HistoryJob, HistoryListItem, HistoryListResponse,
    HistoryResult, LoginRequest, QuoteToggleRequest, QuoteToggleResponse, RegisterRequest,
    SearchRequest, SearchResponse, SearchResult, SmtpSecurity, SmtpVerifyRequest,
    SmtpVerifyResponse, TokenResponse, UserProfile,
};
