//! Business logic service layer

mod auth_service;
mod email_setup_service;
mod history_service;
mod search_service;
mod send_service;
mod session_service;
mod settings_service;

pub use auth_service::AuthService;
pub use email_setup_service::EmailSetupService;
pub use history_service::{HistoryDetail, HistoryService};
pub use search_service::{SearchOptions, SearchOutcome, SearchService};
pub use send_service::{PollPolicy, SendService};
pub use session_service::{RfqSession, SendSummary};
pub use settings_service::SettingsService;

use std::sync::Arc;

use smartoffer_api::BackendApi;

use crate::traits::SettingsStore;

/// Service context holding every injected dependency.
///
/// Platform shells construct this with a real [`HttpBackend`]
/// (`smartoffer_api::HttpBackend`) and their settings backend; tests inject
/// mocks.
pub struct ServiceContext {
    /// Backend HTTP contract.
    pub backend: Arc<dyn BackendApi>,
    /// Client-side settings persistence.
    pub settings_store: Arc<dyn SettingsStore>,
}

impl ServiceContext {
    /// Create a service context.
    #[must_use]
    pub fn new(backend: Arc<dyn BackendApi>, settings_store: Arc<dyn SettingsStore>) -> Self {
        Self {
            backend,
            settings_store,
        }
    }
}
