//! Smartoffer Core Library
//!
//! Platform-independent business logic for the Smartoffer RFQ client:
//! - supplier search (Search Service)
//! - RFQ dispatch with optimistic status reconciliation (Send Service)
//! - request history projection (History Service)
//! - interactive session state (RFQ Session)
//! - client settings, SMTP setup and auth
//!
//! The backend HTTP contract and client-side persistence are abstracted
//! through traits, so desktop, web and test shells can each supply their
//! own implementations.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{InMemorySettingsStore, SettingsStore};
