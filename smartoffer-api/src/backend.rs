//! Reqwest-backed implementation of [`BackendApi`].

use async_trait::async_trait;

use crate::config::{AuthCredentials, BackendConfig};
use crate::error::Result;
use crate::traits::BackendApi;
use crate::types::{
    EmailProviderPreset, EmailProvidersResponse, EmailSendOut, EmailSendRequest,
    EmailSettingsRequest, HistoryDetailResponse, HistoryListResponse, LoginRequest,
    QuoteToggleRequest, QuoteToggleResponse, RegisterRequest, SearchRequest, SearchResponse,
    SmtpVerifyRequest, SmtpVerifyResponse, TokenResponse, UserProfile,
};

/// Production [`BackendApi`] implementation speaking to a Smartoffer backend
/// over HTTP.
pub struct HttpBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend client from a validated configuration.
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a backend client from the environment (see
    /// [`BackendConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(BackendConfig::from_env()?))
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub(crate) fn auth(&self) -> &AuthCredentials {
        &self.config.auth
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.post("/search", request).await
    }

    async fn send_email(&self, request: &EmailSendRequest) -> Result<EmailSendOut> {
        self.post("/email/send", request).await
    }

    async fn list_history(&self, limit: u32, offset: u32) -> Result<HistoryListResponse> {
        self.get(&format!("/history?limit={limit}&offset={offset}"))
            .await
    }

    async fn history_detail(&self, job_id: i64) -> Result<HistoryDetailResponse> {
        self.get(&format!("/history/{job_id}")).await
    }

    async fn toggle_quote(&self, result_id: i64, received: bool) -> Result<QuoteToggleResponse> {
        self.post(
            &format!("/history/results/{result_id}/quote"),
            &QuoteToggleRequest { received },
        )
        .await
    }

    async fn list_email_providers(&self) -> Result<Vec<EmailProviderPreset>> {
        let response: EmailProvidersResponse = self.get("/email/providers").await?;
        Ok(response
            .providers
            .into_iter()
            .filter(|p| !p.id.trim().is_empty())
            .collect())
    }

    async fn verify_smtp(&self, request: &SmtpVerifyRequest) -> Result<SmtpVerifyResponse> {
        self.post("/email/verify", request).await
    }

    async fn save_email_settings(&self, request: &EmailSettingsRequest) -> Result<()> {
        // Response shape is backend-version dependent; only the status matters.
        let _: serde_json::Value = self.post("/email/settings", request).await?;
        Ok(())
    }

    async fn get_email_settings(&self) -> Result<serde_json::Value> {
        self.get("/email/settings").await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile> {
        self.post("/auth/register", request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse> {
        self.post("/auth/login", request).await
    }

    async fn me(&self) -> Result<UserProfile> {
        self.get("/auth/me").await
    }
}
