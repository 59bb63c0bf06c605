//! One interactive search → curate → send session.
//!
//! The session owns the shared mutable state a UI shell displays: the
//! current [`RfqRequest`], the supplier list and the backend job id. Only
//! one component writes at a time (the session calls the search adapter or
//! the send workflow, never both concurrently), and starting a new search
//! supersedes the previous workflow entirely.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::{SearchService, SendService, ServiceContext};
use crate::types::{RequestStatus, RfqRequest, Supplier, SupplierStatus};

/// Aggregate counts reported after a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendSummary {
    pub sent: usize,
    pub failed: usize,
}

/// Interactive RFQ session state machine.
pub struct RfqSession {
    search: SearchService,
    send: SendService,
    request: RfqRequest,
    suppliers: Vec<Supplier>,
    job_id: Option<i64>,
}

impl RfqSession {
    /// Create a session with default search options and polling policy.
    #[must_use]
    pub fn new(ctx: &Arc<ServiceContext>) -> Self {
        Self::with_services(
            SearchService::new(Arc::clone(ctx)),
            SendService::new(Arc::clone(ctx)),
        )
    }

    /// Create a session from explicitly configured services.
    #[must_use]
    pub fn with_services(search: SearchService, send: SendService) -> Self {
        Self {
            search,
            send,
            request: RfqRequest::new(String::new()),
            suppliers: Vec::new(),
            job_id: None,
        }
    }

    /// Current request state.
    #[must_use]
    pub fn request(&self) -> &RfqRequest {
        &self.request
    }

    /// Current supplier list.
    #[must_use]
    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    /// Backend job id of the last search, if the backend persisted one.
    #[must_use]
    pub fn job_id(&self) -> Option<i64> {
        self.job_id
    }

    /// Number of suppliers currently selected for send.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.suppliers.iter().filter(|s| s.selected).count()
    }

    /// Run a supplier search, replacing any previous session state.
    ///
    /// Returns the number of suppliers found.
    pub async fn start_search(&mut self, query: &str) -> CoreResult<usize> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CoreError::ValidationError(
                "equipment name is empty".to_string(),
            ));
        }

        self.request = RfqRequest::new(query);
        self.suppliers.clear();
        self.job_id = None;
        self.request.transition(RequestStatus::Searching)?;

        let request_id = self.request.id.clone();
        match self.search.search(query, &request_id).await {
            Ok(outcome) => {
                self.job_id = outcome.job_id;
                self.request.backend_job_id = outcome.job_id;
                self.suppliers = outcome.suppliers;
                self.request.transition(RequestStatus::SearchCompleted)?;
                Ok(self.suppliers.len())
            }
            Err(e) => {
                self.request.transition(RequestStatus::Error)?;
                Err(e)
            }
        }
    }

    /// Add a manually entered supplier. Returns its client-local id.
    ///
    /// An idle session moves straight to `SearchCompleted` so the send
    /// controls become available without a search.
    pub fn add_manual_supplier(&mut self, email: &str) -> CoreResult<String> {
        let email = email.trim();
        let plausible = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !plausible {
            return Err(CoreError::InvalidEmail(email.to_string()));
        }

        let supplier = Supplier::manual(self.request.id.clone(), email);
        let id = supplier.id.clone();
        self.suppliers.push(supplier);

        if self.request.status == RequestStatus::Idle {
            self.request.transition(RequestStatus::SearchCompleted)?;
        }
        Ok(id)
    }

    /// Toggle a supplier's selection flag.
    ///
    /// Returns `false` if no supplier with that id exists. A `Sent`
    /// supplier keeps its flag regardless.
    pub fn toggle_selected(&mut self, id: &str) -> bool {
        match self.suppliers.iter_mut().find(|s| s.id == id) {
            Some(supplier) => {
                supplier.set_selected(!supplier.selected);
                true
            }
            None => false,
        }
    }

    /// Remove a supplier from the list.
    ///
    /// Only rows that have not been sent to can be removed; a `Sent` row
    /// records a completed action and stays.
    pub fn remove_supplier(&mut self, id: &str) -> bool {
        let before = self.suppliers.len();
        self.suppliers
            .retain(|s| s.id != id || s.status == SupplierStatus::Sent);
        self.suppliers.len() < before
    }

    /// Dispatch the RFQ to every selected supplier and apply the
    /// reconciled outcomes to the list.
    pub async fn send(&mut self, subject: &str, body: &str) -> CoreResult<SendSummary> {
        let candidates: Vec<Supplier> = self
            .suppliers
            .iter()
            .filter(|s| s.selected && s.status == SupplierStatus::Found)
            .cloned()
            .collect();
        if candidates.is_empty() {
            // surfaced to the user before any network call; session state
            // is untouched so they can fix the selection and retry
            return Err(CoreError::NoSuppliersSelected);
        }

        self.request.email_subject = subject.to_string();
        self.request.rfq_text = body.to_string();
        self.request.transition(RequestStatus::Sending)?;

        match self.send.send_rfq(self.job_id, subject, body, &candidates).await {
            Ok(outcomes) => {
                for supplier in &mut self.suppliers {
                    if let Some(outcome) = outcomes.get(&supplier.id) {
                        supplier.apply_outcome(outcome);
                    }
                }
                let sent = outcomes
                    .values()
                    .filter(|o| o.status == SupplierStatus::Sent)
                    .count();
                let failed = outcomes
                    .values()
                    .filter(|o| o.status == SupplierStatus::Error)
                    .count();

                self.request.sent_at = Some(Utc::now());
                self.request.recipients_count = Some(u32::try_from(sent).unwrap_or(u32::MAX));
                self.request.transition(RequestStatus::Completed)?;
                Ok(SendSummary { sent, failed })
            }
            Err(e) => {
                self.request.transition(RequestStatus::Error)?;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{PollPolicy, SearchService, SendService};
    use crate::test_utils::{MockBackend, create_test_context};
    use smartoffer_api::{ApiError, HistoryDetailResponse, SearchResponse};
    use std::time::Duration;

    fn fast_session(ctx: &Arc<ServiceContext>) -> RfqSession {
        RfqSession::with_services(
            SearchService::new(Arc::clone(ctx)),
            SendService::with_policy(
                Arc::clone(ctx),
                PollPolicy {
                    attempts: 2,
                    interval: Duration::ZERO,
                },
            ),
        )
    }

    async fn seed_search(backend: &MockBackend, job_id: Option<i64>) {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "job_id": job_id,
            "results": [
                { "id": 1, "title": "Acme", "url": "https://acme.com",
                  "domain": "acme.com", "emails": ["sales@acme.com"] },
                { "id": 2, "title": "Bolt", "url": "https://bolt.io",
                  "domain": "bolt.io", "emails": ["rfq@bolt.io"] },
            ],
        }))
        .unwrap();
        backend.set_search_response(response).await;
    }

    #[tokio::test]
    async fn full_session_lifecycle() {
        let (ctx, backend, _) = create_test_context();
        seed_search(&backend, Some(9)).await;
        backend
            .queue_history_detail(Ok(serde_json::from_value::<HistoryDetailResponse>(
                serde_json::json!({
                    "job": { "id": 9 },
                    "results": [
                        { "id": 1, "email_statuses": [
                            { "email": "sales@acme.com", "status": "failed", "last_error": "bounce" } ] },
                        { "id": 2, "email_statuses": [
                            { "email": "rfq@bolt.io", "status": "sent" } ] },
                    ],
                }),
            )
            .unwrap()))
            .await;

        let mut session = fast_session(&ctx);
        assert_eq!(session.request().status, RequestStatus::Idle);

        let found = session.start_search("centrifugal pump").await.unwrap();
        assert_eq!(found, 2);
        assert_eq!(session.request().status, RequestStatus::SearchCompleted);
        assert_eq!(session.job_id(), Some(9));
        assert_eq!(session.selected_count(), 2);

        let manual_id = session.add_manual_supplier("x@y.com").unwrap();
        assert_eq!(session.selected_count(), 3);

        let summary = session.send("subject", "body").await.unwrap();
        assert_eq!(summary, SendSummary { sent: 2, failed: 1 });
        assert_eq!(session.request().status, RequestStatus::Completed);
        assert_eq!(session.request().recipients_count, Some(2));

        let suppliers = session.suppliers();
        assert_eq!(suppliers[0].status, SupplierStatus::Error);
        assert_eq!(suppliers[0].error_message.as_deref(), Some("bounce"));
        assert_eq!(suppliers[1].status, SupplierStatus::Sent);
        let manual = suppliers.iter().find(|s| s.id == manual_id).unwrap();
        assert_eq!(manual.status, SupplierStatus::Sent);
    }

    #[tokio::test]
    async fn search_failure_moves_session_to_error() {
        let (ctx, backend, _) = create_test_context();
        backend
            .set_search_error(ApiError::Network {
                detail: "backend down".to_string(),
            })
            .await;

        let mut session = fast_session(&ctx);
        let result = session.start_search("pump").await;
        assert!(result.is_err());
        assert_eq!(session.request().status, RequestStatus::Error);
    }

    #[tokio::test]
    async fn manual_only_session_sends_without_search() {
        let (ctx, backend, _) = create_test_context();

        let mut session = fast_session(&ctx);
        session.add_manual_supplier("rfq@supplier.ru").unwrap();
        assert_eq!(session.request().status, RequestStatus::SearchCompleted);
        assert_eq!(session.job_id(), None);

        let summary = session.send("subject", "body").await.unwrap();
        assert_eq!(summary, SendSummary { sent: 1, failed: 0 });
        assert_eq!(session.request().status, RequestStatus::Completed);
        // manual-only: no job id, no reconciliation polls
        assert_eq!(backend.history_detail_calls().await, 0);
    }

    #[tokio::test]
    async fn implausible_manual_addresses_are_rejected() {
        let (ctx, _backend, _) = create_test_context();
        let mut session = fast_session(&ctx);

        for bad in ["", "plain", "@no-local.com", "x@nodot"] {
            assert!(
                matches!(
                    session.add_manual_supplier(bad),
                    Err(CoreError::InvalidEmail(_))
                ),
                "accepted {bad:?}"
            );
        }
        assert!(session.suppliers().is_empty());
    }

    #[tokio::test]
    async fn send_with_nothing_selected_keeps_session_state() {
        let (ctx, backend, _) = create_test_context();
        seed_search(&backend, Some(9)).await;

        let mut session = fast_session(&ctx);
        session.start_search("pump").await.unwrap();
        let first_id = session.suppliers()[0].id.clone();
        let second_id = session.suppliers()[1].id.clone();
        assert!(session.toggle_selected(&first_id));
        assert!(session.toggle_selected(&second_id));

        let result = session.send("s", "b").await;
        assert!(matches!(result, Err(CoreError::NoSuppliersSelected)));
        assert_eq!(session.request().status, RequestStatus::SearchCompleted);
        assert!(backend.sent_requests().await.is_empty());
    }

    #[tokio::test]
    async fn curation_removes_and_toggles() {
        let (ctx, backend, _) = create_test_context();
        seed_search(&backend, Some(9)).await;

        let mut session = fast_session(&ctx);
        session.start_search("pump").await.unwrap();
        let id = session.suppliers()[0].id.clone();

        assert!(session.toggle_selected(&id));
        assert!(!session.suppliers()[0].selected);
        assert!(!session.toggle_selected("no-such-id"));

        assert!(session.remove_supplier(&id));
        assert_eq!(session.suppliers().len(), 1);
        assert!(!session.remove_supplier(&id));
    }

    #[tokio::test]
    async fn enqueue_failure_moves_session_to_error() {
        let (ctx, backend, _) = create_test_context();
        seed_search(&backend, Some(9)).await;
        backend
            .set_send_error(ApiError::Http {
                status: 503,
                body: "queue full".to_string(),
            })
            .await;

        let mut session = fast_session(&ctx);
        session.start_search("pump").await.unwrap();
        let result = session.send("s", "b").await;

        assert!(result.is_err());
        assert_eq!(session.request().status, RequestStatus::Error);
        // supplier rows keep their pre-send state
        assert!(
            session
                .suppliers()
                .iter()
                .all(|s| s.status == SupplierStatus::Found)
        );
    }
}
