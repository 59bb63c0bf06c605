//! Client-side view model for suppliers and RFQ sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartoffer_api::{DeliveryState, EmailDeliveryStatus};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Placeholder supplier name when a search hit has neither title nor domain.
pub const UNNAMED_SUPPLIER: &str = "—";

/// Name given to manual entries whose address yields no usable label.
pub const MANUAL_SUPPLIER_NAME: &str = "Added manually";

/// Fallback error message when the backend reports a failure without detail.
pub const DEFAULT_SEND_ERROR: &str = "Delivery failed";

/// Lifecycle state of one supplier row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierStatus {
    /// Discovered by search or added manually; no send attempted yet.
    Found,
    /// An RFQ was dispatched to this supplier (optimistic or confirmed).
    Sent,
    /// The backend confirmed a delivery failure.
    Error,
}

/// Lifecycle state of one RFQ session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Idle,
    Searching,
    SearchCompleted,
    Sending,
    Completed,
    Error,
}

impl RequestStatus {
    /// Position on the linear idle → … → completed track, or `None` for the
    /// error state which sits outside it.
    fn rank(self) -> Option<u8> {
        match self {
            Self::Idle => Some(0),
            Self::Searching => Some(1),
            Self::SearchCompleted => Some(2),
            Self::Sending => Some(3),
            Self::Completed => Some(4),
            Self::Error => None,
        }
    }

    /// Whether a transition to `next` is legal.
    ///
    /// Transitions are monotonic along the track, forward only with skips
    /// allowed (a manual entry moves an idle session straight to
    /// `SearchCompleted`). `Error` is reachable only from the two active
    /// states. `Completed` and `Error` are terminal; a new session starts
    /// a new request.
    #[must_use]
    pub fn can_transition(self, next: Self) -> bool {
        match (self.rank(), next) {
            (None, _) => false,
            (Some(_), Self::Error) => matches!(self, Self::Searching | Self::Sending),
            (Some(from), _) => next.rank().is_some_and(|to| to > from),
        }
    }
}

/// Outcome of one send attempt for one supplier, keyed by the supplier's
/// client-local id in the workflow result map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOutcome {
    pub status: SupplierStatus,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
    pub error_code: Option<String>,
}

impl SendOutcome {
    /// A (possibly optimistic) successful delivery.
    #[must_use]
    pub fn sent() -> Self {
        Self {
            status: SupplierStatus::Sent,
            error_message: None,
            error_details: None,
            error_code: None,
        }
    }

    /// A confirmed delivery failure.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: SupplierStatus::Error,
            error_message: Some(message.into()),
            error_details: None,
            error_code: None,
        }
    }
}

/// Classify a result's per-address delivery statuses into a send outcome.
///
/// `failed` takes precedence over `sent`; a row with only queued (or no)
/// statuses is unresolved and yields `None`. This single rule backs both the
/// live send workflow and history rendering, so the two views can never
/// disagree on a supplier's fate.
#[must_use]
pub fn derive_send_outcome(statuses: &[EmailDeliveryStatus]) -> Option<SendOutcome> {
    if let Some(failed) = statuses.iter().find(|s| s.status == DeliveryState::Failed) {
        let mut outcome = SendOutcome::failed(
            failed
                .last_error
                .clone()
                .unwrap_or_else(|| DEFAULT_SEND_ERROR.to_string()),
        );
        outcome.error_details = failed.last_error.clone();
        return Some(outcome);
    }
    if statuses.iter().any(|s| s.status == DeliveryState::Sent) {
        return Some(SendOutcome::sent());
    }
    None
}

/// A candidate contact, either discovered by search or added manually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    /// Client-local id, unique within a session.
    pub id: String,
    /// Id of the session this supplier belongs to.
    pub request_id: String,
    pub supplier_name: String,
    /// Contact email; may be empty for search hits without extracted emails.
    pub contact: String,
    pub source_url: String,
    /// Whether this supplier is included in the next send.
    pub selected: bool,
    pub status: SupplierStatus,
    pub created_at: DateTime<Utc>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
    pub error_code: Option<String>,
    /// Backend result id; present only for search-derived entries. Without
    /// it a supplier can never be correlated to per-result delivery status.
    pub backend_result_id: Option<i64>,
    /// "Quote received" marker, carried when rendering history detail.
    pub quote_received: Option<bool>,
}

impl Supplier {
    /// Create a manually entered supplier.
    ///
    /// The display name is derived from the first label of the mail domain
    /// (`sales@acme-pumps.ru` → `acme-pumps`), falling back to a generic
    /// label.
    #[must_use]
    pub fn manual(request_id: impl Into<String>, email: impl Into<String>) -> Self {
        let email = email.into();
        let name = email
            .split('@')
            .nth(1)
            .and_then(|domain| domain.split('.').next())
            .filter(|label| !label.is_empty())
            .map_or_else(|| MANUAL_SUPPLIER_NAME.to_string(), ToString::to_string);

        Self {
            id: format!("manual-{}", Uuid::new_v4()),
            request_id: request_id.into(),
            supplier_name: name,
            contact: email,
            source_url: "#".to_string(),
            selected: true,
            status: SupplierStatus::Found,
            created_at: Utc::now(),
            error_message: None,
            error_details: None,
            error_code: None,
            backend_result_id: None,
            quote_received: None,
        }
    }

    /// Change the selection flag.
    ///
    /// Ignored once the supplier is `Sent`: the flag then records a
    /// completed action, not a pending one, and cannot be taken back.
    pub fn set_selected(&mut self, selected: bool) {
        if self.status == SupplierStatus::Sent {
            return;
        }
        self.selected = selected;
    }

    /// Apply a send outcome to this supplier in place.
    pub fn apply_outcome(&mut self, outcome: &SendOutcome) {
        self.status = outcome.status;
        self.error_message.clone_from(&outcome.error_message);
        self.error_details.clone_from(&outcome.error_details);
        self.error_code.clone_from(&outcome.error_code);
    }
}

/// One logical search+send session, also used as the history row shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfqRequest {
    /// Client-local id (`req-…` for live sessions, `job-{id}` when mirrored
    /// from backend history).
    pub id: String,
    pub equipment_name: String,
    pub rfq_text: String,
    pub email_subject: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub recipients_count: Option<u32>,
    /// Backend job id, once a search has been persisted server-side.
    pub backend_job_id: Option<i64>,
}

impl RfqRequest {
    /// Start a new idle session for the given equipment description.
    #[must_use]
    pub fn new(equipment_name: impl Into<String>) -> Self {
        let equipment_name = equipment_name.into();
        Self {
            id: format!("req-{}", Uuid::new_v4()),
            email_subject: default_subject(&equipment_name),
            equipment_name,
            rfq_text: String::new(),
            status: RequestStatus::Idle,
            created_at: Utc::now(),
            sent_at: None,
            recipients_count: None,
            backend_job_id: None,
        }
    }

    /// Move the session to `next`, enforcing the monotonic lifecycle.
    pub fn transition(&mut self, next: RequestStatus) -> CoreResult<()> {
        if !self.status.can_transition(next) {
            return Err(CoreError::ValidationError(format!(
                "illegal status transition: {:?} -> {next:?}",
                self.status
            )));
        }
        self.status = next;
        Ok(())
    }
}

/// Default subject line for an RFQ about the given equipment.
#[must_use]
pub fn default_subject(equipment_name: &str) -> String {
    format!("Request for quote — {equipment_name}").trim().to_string()
}
