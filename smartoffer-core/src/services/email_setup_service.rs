//! Outbound email (SMTP) setup.
//!
//! Thin pass-through over the backend's email configuration endpoints with
//! the credential validation the backend itself does not do until delivery
//! time.

use std::sync::Arc;

use smartoffer_api::{
    EmailProviderPreset, EmailSettingsRequest, SmtpVerifyRequest, SmtpVerifyResponse,
};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;

/// Email setup service
pub struct EmailSetupService {
    ctx: Arc<ServiceContext>,
}

impl EmailSetupService {
    /// Create an email setup service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Known SMTP provider presets (Gmail, Yandex, ...).
    pub async fn list_providers(&self) -> CoreResult<Vec<EmailProviderPreset>> {
        Ok(self.ctx.backend.list_email_providers().await?)
    }

    /// Probe SMTP credentials by sending a test message.
    ///
    /// A failed probe is still an `Ok` response; `ok`, `error_code` and
    /// `hint` tell the caller what to show.
    pub async fn verify(&self, request: &SmtpVerifyRequest) -> CoreResult<SmtpVerifyResponse> {
        validate_credentials(&request.smtp_username, &request.smtp_password)?;
        Ok(self.ctx.backend.verify_smtp(request).await?)
    }

    /// Persist SMTP settings server-side.
    pub async fn save_settings(&self, request: &EmailSettingsRequest) -> CoreResult<()> {
        validate_credentials(&request.smtp_username, &request.smtp_password)?;
        Ok(self.ctx.backend.save_email_settings(request).await?)
    }

    /// Currently stored SMTP settings, shape-opaque.
    pub async fn current_settings(&self) -> CoreResult<serde_json::Value> {
        Ok(self.ctx.backend.get_email_settings().await?)
    }
}

fn validate_credentials(username: &str, password: &str) -> CoreResult<()> {
    if username.trim().is_empty() {
        return Err(CoreError::ValidationError(
            "SMTP username is empty".to_string(),
        ));
    }
    if password.is_empty() {
        return Err(CoreError::ValidationError(
            "SMTP password is empty".to_string(),
        ));
    }
    Ok(())
}
