//! Wire types for the Smartoffer backend API.
//!
//! The backend payloads are loosely typed and have drifted across versions,
//! so response structs are deliberately defensive: optional and defaulted
//! fields wherever the backend may omit a value, plus `alias` attributes for
//! fields that were renamed (`title` used to arrive as `name`).

use serde::{Deserialize, Deserializer, Serialize};

// ─── Search ────────────────────────────────────────────────

/// Request body for `POST /search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Free-text equipment description.
    pub query: String,
    /// Search language code.
    pub lang: String,
    /// Maximum number of results to return.
    pub top_k: u32,
    /// Ask the backend to extract contact emails for each result.
    pub enrich_emails: bool,
    /// Page cap for the Yandex crawler.
    pub yandex_pages_cap: u32,
    /// Page cap for the DuckDuckGo crawler.
    pub ddg_pages_cap: u32,
}

/// One raw search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Backend-side result id. Absent for rows the backend did not persist;
    /// such rows can never be correlated to per-result delivery status.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub score: f64,
}

/// Response body of `POST /search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Backend job id correlating this search with later delivery statuses.
    /// May be null when the backend did not persist the job.
    #[serde(default)]
    pub job_id: Option<i64>,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

// ─── Email send ────────────────────────────────────────────

/// Request body for `POST /email/send`.
///
/// The call only enqueues delivery server-side; it returns as soon as the
/// jobs are queued and does **not** await completion.
#[derive(Debug, Clone, Serialize)]
pub struct EmailSendRequest {
    pub search_job_id: Option<i64>,
    /// Backend result ids of search-derived recipients, or `None` if the
    /// batch is manual-only.
    pub search_result_ids: Option<Vec<i64>>,
    /// Raw addresses of manually added recipients, or `None`.
    pub manual_emails: Option<Vec<String>>,
    pub subject: String,
    pub body: String,
}

/// Response body of `POST /email/send`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSendOut {
    #[serde(default)]
    pub email_job_ids: Vec<i64>,
    /// Number of messages accepted into the queue.
    #[serde(default)]
    pub queued: u32,
}

// ─── History ───────────────────────────────────────────────

/// One row of `GET /history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryListItem {
    pub id: i64,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub time_ms: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub results_count: Option<u32>,
    /// Aggregate of successfully delivered emails, when the backend tracks it.
    #[serde(default)]
    pub emails_sent: Option<u32>,
    /// Aggregate of failed deliveries, when the backend tracks it.
    #[serde(default)]
    pub emails_failed: Option<u32>,
    /// Subject of the most recent send for this job, if any.
    #[serde(default)]
    pub email_subject: Option<String>,
}

/// Response body of `GET /history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryListResponse {
    #[serde(default)]
    pub items: Vec<HistoryListItem>,
    #[serde(default)]
    pub total: u32,
}

/// Job header inside `GET /history/{job_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryJob {
    pub id: i64,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub time_ms: u64,
    #[serde(default)]
    pub created_at: String,
    /// Subject of the last send for this job.
    #[serde(default)]
    pub email_subject: Option<String>,
    /// Body of the last send for this job.
    #[serde(default)]
    pub email_body: Option<String>,
}

/// Per-address delivery state reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryState {
    Queued,
    Sent,
    Failed,
    /// Any state this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// Delivery status of one email address within one send.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailDeliveryStatus {
    #[serde(default)]
    pub email: String,
    pub status: DeliveryState,
    #[serde(default)]
    pub last_error: Option<String>,
    #[serde(default)]
    pub sent_at: Option<String>,
}

/// One result row inside `GET /history/{job_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResult {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub score: f64,
    /// Per-address delivery statuses. Empty until a send has been dispatched
    /// for this job.
    #[serde(default)]
    pub email_statuses: Vec<EmailDeliveryStatus>,
    #[serde(default)]
    pub quote_received: Option<bool>,
    #[serde(default)]
    pub quote_received_at: Option<String>,
}

/// Response body of `GET /history/{job_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryDetailResponse {
    pub job: HistoryJob,
    #[serde(default)]
    pub results: Vec<HistoryResult>,
}

/// Request body for `POST /history/results/{result_id}/quote`.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteToggleRequest {
    pub received: bool,
}

/// Response body of the quote toggle.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteToggleResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub quote_received: bool,
    #[serde(default)]
    pub quote_received_at: Option<String>,
}

// ─── Email settings ────────────────────────────────────────

/// SMTP transport security.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    #[default]
    Ssl,
    Starttls,
}

/// Anything the backend sends that is not `starttls` collapses to `ssl`,
/// matching the backend's own default.
impl<'de> Deserialize<'de> for SmtpSecurity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("starttls") => Self::Starttls,
            _ => Self::Ssl,
        })
    }
}

/// One SMTP provider preset from `GET /email/providers`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailProviderPreset {
    #[serde(default)]
    pub id: String,
    /// Display name. Older backends sent this field as `name`.
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default)]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_security: SmtpSecurity,
    #[serde(default)]
    pub app_password_url: Option<String>,
}

/// Envelope of `GET /email/providers`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EmailProvidersResponse {
    #[serde(default)]
    pub providers: Vec<EmailProviderPreset>,
}

/// Request body for `POST /email/verify`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SmtpVerifyRequest {
    pub provider_id: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_security: Option<SmtpSecurity>,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: Option<String>,
    /// Address to send the verification probe to.
    pub test_to_email: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// Response body of `POST /email/verify`.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpVerifyResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// Request body for `POST /email/settings`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmailSettingsRequest {
    pub provider_id: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_security: Option<SmtpSecurity>,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: Option<String>,
}

// ─── Auth ──────────────────────────────────────────────────

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response body of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// Response body of `GET /auth/me` and `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}
