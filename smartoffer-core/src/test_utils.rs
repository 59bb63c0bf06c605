//! Shared test doubles.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use smartoffer_api::{
    ApiError, BackendApi, EmailProviderPreset, EmailSendOut, EmailSendRequest,
    EmailSettingsRequest, HistoryDetailResponse, HistoryListResponse, LoginRequest,
    QuoteToggleResponse, RegisterRequest, Result as ApiResult, SearchRequest, SearchResponse,
    SmtpVerifyRequest, SmtpVerifyResponse, TokenResponse, UserProfile,
};

use crate::services::ServiceContext;
use crate::traits::InMemorySettingsStore;
use crate::types::{Supplier, SupplierStatus};

/// Scriptable in-memory [`BackendApi`].
///
/// Responses are set per endpoint before the call under test; requests that
/// mutate backend state are recorded for assertions. `history_detail`
/// responses are a FIFO queue so one test can script a different answer per
/// poll; an empty queue answers with a network error, which the workflows
/// under test must tolerate.
#[derive(Default)]
pub struct MockBackend {
    search_response: RwLock<Option<SearchResponse>>,
    search_error: RwLock<Option<ApiError>>,
    send_error: RwLock<Option<ApiError>>,
    sent_requests: RwLock<Vec<EmailSendRequest>>,
    history_list: RwLock<Option<HistoryListResponse>>,
    history_details: RwLock<VecDeque<ApiResult<HistoryDetailResponse>>>,
    history_detail_calls: RwLock<usize>,
    quote_response: RwLock<Option<QuoteToggleResponse>>,
    email_providers: RwLock<Vec<EmailProviderPreset>>,
    smtp_verify_response: RwLock<Option<SmtpVerifyResponse>>,
    saved_email_settings: RwLock<Vec<EmailSettingsRequest>>,
    login_response: RwLock<Option<TokenResponse>>,
    profile: RwLock<Option<UserProfile>>,
}

impl MockBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_search_response(&self, response: SearchResponse) {
        *self.search_response.write().await = Some(response);
    }

    pub async fn set_search_error(&self, error: ApiError) {
        *self.search_error.write().await = Some(error);
    }

    pub async fn set_send_error(&self, error: ApiError) {
        *self.send_error.write().await = Some(error);
    }

    /// Requests received by `send_email`, in call order.
    pub async fn sent_requests(&self) -> Vec<EmailSendRequest> {
        self.sent_requests.read().await.clone()
    }

    pub async fn set_history_list(&self, response: HistoryListResponse) {
        *self.history_list.write().await = Some(response);
    }

    /// Queue the answer for the next `history_detail` call.
    pub async fn queue_history_detail(&self, response: ApiResult<HistoryDetailResponse>) {
        self.history_details.write().await.push_back(response);
    }

    /// How many times `history_detail` has been called.
    pub async fn history_detail_calls(&self) -> usize {
        *self.history_detail_calls.read().await
    }

    pub async fn set_quote_response(&self, response: QuoteToggleResponse) {
        *self.quote_response.write().await = Some(response);
    }

    pub async fn set_email_providers(&self, providers: Vec<EmailProviderPreset>) {
        *self.email_providers.write().await = providers;
    }

    pub async fn set_smtp_verify_response(&self, response: SmtpVerifyResponse) {
        *self.smtp_verify_response.write().await = Some(response);
    }

    /// Requests received by `save_email_settings`, in call order.
    pub async fn saved_email_settings(&self) -> Vec<EmailSettingsRequest> {
        self.saved_email_settings.read().await.clone()
    }

    pub async fn set_login_response(&self, response: TokenResponse) {
        *self.login_response.write().await = Some(response);
    }

    pub async fn set_profile(&self, profile: UserProfile) {
        *self.profile.write().await = Some(profile);
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn search(&self, _request: &SearchRequest) -> ApiResult<SearchResponse> {
        if let Some(error) = self.search_error.write().await.take() {
            return Err(error);
        }
        Ok(self
            .search_response
            .read()
            .await
            .clone()
            .unwrap_or(SearchResponse {
                job_id: None,
                results: Vec::new(),
            }))
    }

    async fn send_email(&self, request: &EmailSendRequest) -> ApiResult<EmailSendOut> {
        if let Some(error) = self.send_error.write().await.take() {
            return Err(error);
        }
        self.sent_requests.write().await.push(request.clone());
        let queued = request.search_result_ids.as_ref().map_or(0, Vec::len)
            + request.manual_emails.as_ref().map_or(0, Vec::len);
        Ok(EmailSendOut {
            email_job_ids: Vec::new(),
            queued: u32::try_from(queued).unwrap_or(u32::MAX),
        })
    }

    async fn list_history(&self, _limit: u32, _offset: u32) -> ApiResult<HistoryListResponse> {
        Ok(self
            .history_list
            .read()
            .await
            .clone()
            .unwrap_or(HistoryListResponse {
                items: Vec::new(),
                total: 0,
            }))
    }

    async fn history_detail(&self, _job_id: i64) -> ApiResult<HistoryDetailResponse> {
        *self.history_detail_calls.write().await += 1;
        match self.history_details.write().await.pop_front() {
            Some(response) => response,
            None => Err(ApiError::Network {
                detail: "no scripted history detail".to_string(),
            }),
        }
    }

    async fn toggle_quote(&self, _result_id: i64, received: bool) -> ApiResult<QuoteToggleResponse> {
        Ok(self
            .quote_response
            .read()
            .await
            .clone()
            .unwrap_or(QuoteToggleResponse {
                ok: true,
                quote_received: received,
                quote_received_at: None,
            }))
    }

    async fn list_email_providers(&self) -> ApiResult<Vec<EmailProviderPreset>> {
        Ok(self.email_providers.read().await.clone())
    }

    async fn verify_smtp(&self, _request: &SmtpVerifyRequest) -> ApiResult<SmtpVerifyResponse> {
        Ok(self
            .smtp_verify_response
            .read()
            .await
            .clone()
            .unwrap_or(SmtpVerifyResponse {
                ok: true,
                error_code: None,
                message: None,
                hint: None,
            }))
    }

    async fn save_email_settings(&self, request: &EmailSettingsRequest) -> ApiResult<()> {
        self.saved_email_settings.write().await.push(request.clone());
        Ok(())
    }

    async fn get_email_settings(&self) -> ApiResult<serde_json::Value> {
        Ok(serde_json::Value::Null)
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<UserProfile> {
        Ok(self.profile.read().await.clone().unwrap_or(UserProfile {
            id: 1,
            email: request.email.clone(),
            first_name: Some(request.first_name.clone()),
            last_name: Some(request.last_name.clone()),
        }))
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<TokenResponse> {
        Ok(self
            .login_response
            .read()
            .await
            .clone()
            .unwrap_or(TokenResponse {
                access_token: format!("test-token-{}", request.email),
                token_type: "bearer".to_string(),
            }))
    }

    async fn me(&self) -> ApiResult<UserProfile> {
        Ok(self.profile.read().await.clone().unwrap_or(UserProfile {
            id: 1,
            email: "test@example.com".to_string(),
            first_name: None,
            last_name: None,
        }))
    }
}

/// Build a [`ServiceContext`] wired to fresh mocks.
pub fn create_test_context() -> (
    Arc<ServiceContext>,
    Arc<MockBackend>,
    Arc<InMemorySettingsStore>,
) {
    let backend = Arc::new(MockBackend::new());
    let store = Arc::new(InMemorySettingsStore::new());
    let ctx = Arc::new(ServiceContext::new(backend.clone(), store.clone()));
    (ctx, backend, store)
}

/// A selected, search-derived supplier row.
#[must_use]
pub fn search_supplier(id: &str, backend_result_id: i64) -> Supplier {
    Supplier {
        id: id.to_string(),
        request_id: "req-1".to_string(),
        supplier_name: format!("Supplier {backend_result_id}"),
        contact: format!("contact{backend_result_id}@example.com"),
        source_url: String::new(),
        selected: true,
        status: SupplierStatus::Found,
        created_at: Utc::now(),
        error_message: None,
        error_details: None,
        error_code: None,
        backend_result_id: Some(backend_result_id),
        quote_received: None,
    }
}
