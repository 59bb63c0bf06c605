//! Client-side settings persistence.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{AppSettings, SETTINGS_STORAGE_KEY};

/// Settings management service
pub struct SettingsService {
    ctx: Arc<ServiceContext>,
}

impl SettingsService {
    /// Create a settings service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Load settings from the store.
    ///
    /// A missing entry yields defaults. A corrupt entry also yields
    /// defaults so one bad write never locks the user out of the app.
    pub async fn load(&self) -> CoreResult<AppSettings> {
        let raw = self.ctx.settings_store.get(SETTINGS_STORAGE_KEY).await?;

        let Some(raw) = raw else {
            return Ok(AppSettings::default());
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                log::warn!("discarding corrupt settings entry: {e}");
                Ok(AppSettings::default())
            }
        }
    }

    /// Persist settings to the store.
    pub async fn save(&self, settings: &AppSettings) -> CoreResult<()> {
        let json = serde_json::to_string(settings)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        self.ctx.settings_store.set(SETTINGS_STORAGE_KEY, &json).await
    }

    /// Convenience accessor for the stored API key, if any.
    pub async fn api_key(&self) -> CoreResult<Option<String>> {
        let key = self.load().await?.api_key;
        Ok((!key.is_empty()).then_some(key))
    }

    /// The RFQ email template, stored or default.
    pub async fn email_template(&self) -> CoreResult<String> {
        Ok(self.load().await?.email_template)
    }
}
