use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    EmailProviderPreset, EmailSendOut, EmailSendRequest, EmailSettingsRequest,
    HistoryDetailResponse, HistoryListResponse, LoginRequest, QuoteToggleResponse, RegisterRequest,
    SearchRequest, SearchResponse, SmtpVerifyRequest, SmtpVerifyResponse, TokenResponse,
    UserProfile,
};

/// The backend HTTP contract, one method per endpoint.
///
/// [`HttpBackend`](crate::HttpBackend) is the production implementation;
/// tests and offline environments inject their own. Swapping implementations
/// at construction time replaces the old process-wide mock/real mode switch.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `POST /search`: run a supplier search with email enrichment.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;

    /// `POST /email/send`: enqueue an RFQ batch.
    ///
    /// The backend delivers asynchronously; a success here means the batch
    /// was queued, not that any message has been sent.
    async fn send_email(&self, request: &EmailSendRequest) -> Result<EmailSendOut>;

    /// `GET /history?limit=&offset=`: page through past search jobs.
    async fn list_history(&self, limit: u32, offset: u32) -> Result<HistoryListResponse>;

    /// `GET /history/{job_id}`: one job with per-result delivery statuses.
    async fn history_detail(&self, job_id: i64) -> Result<HistoryDetailResponse>;

    /// `POST /history/results/{result_id}/quote`: toggle the
    /// "quote received" marker on a search result.
    async fn toggle_quote(&self, result_id: i64, received: bool) -> Result<QuoteToggleResponse>;

    /// `GET /email/providers`: SMTP provider presets.
    ///
    /// Presets without an id are dropped; they cannot be referenced in later
    /// settings calls.
    async fn list_email_providers(&self) -> Result<Vec<EmailProviderPreset>>;

    /// `POST /email/verify`: probe SMTP credentials.
    async fn verify_smtp(&self, request: &SmtpVerifyRequest) -> Result<SmtpVerifyResponse>;

    /// `POST /email/settings`: persist SMTP settings server-side.
    async fn save_email_settings(&self, request: &EmailSettingsRequest) -> Result<()>;

    /// `GET /email/settings`: currently stored SMTP settings, shape-opaque.
    async fn get_email_settings(&self) -> Result<serde_json::Value>;

    /// `POST /auth/register`.
    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile>;

    /// `POST /auth/login`.
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse>;

    /// `GET /auth/me`.
    async fn me(&self) -> Result<UserProfile>;
}
