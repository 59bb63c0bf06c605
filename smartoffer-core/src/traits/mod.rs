//! Storage abstraction traits

mod settings_store;

pub use settings_store::{InMemorySettingsStore, SettingsStore};
