//! Locally persisted application settings.

use serde::{Deserialize, Serialize};

/// Storage key under which [`AppSettings`] is persisted.
pub const SETTINGS_STORAGE_KEY: &str = "smartoffer_settings";

/// Storage key under which the auth bearer token is persisted.
pub const AUTH_TOKEN_STORAGE_KEY: &str = "smartoffer_auth_token";

/// Default RFQ email template shown to the user before any customization.
pub const DEFAULT_EMAIL_TEMPLATE: &str = "\
Hello!

Please send us a quote for the following equipment:

{EQUIPMENT}

Technical specifications / part numbers / quantities:
{SPECS}

Best regards,
{SENDER_NAME}";

/// User-editable settings, persisted through the
/// [`SettingsStore`](crate::traits::SettingsStore) port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// API key attached to backend requests.
    pub api_key: String,
    /// RFQ body template with `{EQUIPMENT}`, `{SPECS}` and `{SENDER_NAME}`
    /// placeholders.
    pub email_template: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            email_template: DEFAULT_EMAIL_TEMPLATE.to_string(),
        }
    }
}

/// Values substituted into the email template before display or send.
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    pub equipment: String,
    pub specs: String,
    pub sender_name: String,
}

impl AppSettings {
    /// Substitute placeholder tokens in the stored template.
    ///
    /// Unknown tokens are left untouched so a hand-edited template never
    /// loses text.
    #[must_use]
    pub fn render_template(&self, vars: &TemplateVars) -> String {
        self.email_template
            .replace("{EQUIPMENT}", &vars.equipment)
            .replace("{SPECS}", &vars.specs)
            .replace("{SENDER_NAME}", &vars.sender_name)
    }
}
