//! History projection.
//!
//! The backend is the authority on past search+send sessions; this service
//! normalizes its job/result shapes into the same view model the live
//! workflow uses, so history rendering and live-send rendering are
//! interchangeable.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};

use smartoffer_api::{HistoryListItem, HistoryResult};

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::{
    RequestStatus, RfqRequest, Supplier, SupplierStatus, UNNAMED_SUPPLIER, default_subject,
    derive_send_outcome,
};

/// One past session with its supplier rows.
#[derive(Debug, Clone)]
pub struct HistoryDetail {
    pub request: RfqRequest,
    pub suppliers: Vec<Supplier>,
}

/// History projection service
pub struct HistoryService {
    ctx: Arc<ServiceContext>,
}

impl HistoryService {
    /// Create a history service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List past requests, newest first.
    ///
    /// Statuses are projected from the send aggregates: any failed delivery
    /// marks the session `Error`, otherwise any sent delivery marks it
    /// `Completed`, otherwise it stays at `SearchCompleted`.
    pub async fn list_requests(&self, limit: u32, offset: u32) -> CoreResult<Vec<RfqRequest>> {
        let response = self.ctx.backend.list_history(limit, offset).await?;
        let mut requests: Vec<RfqRequest> = response.items.iter().map(map_item).collect();
        // the server already orders these, but the contract does not promise it
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    /// Fetch one job with its results mapped into supplier rows.
    pub async fn request_detail(&self, job_id: i64) -> CoreResult<HistoryDetail> {
        let detail = self.ctx.backend.history_detail(job_id).await?;
        let job = &detail.job;

        let request = RfqRequest {
            id: format!("job-{}", job.id),
            equipment_name: job.query.clone(),
            rfq_text: job.email_body.clone().unwrap_or_default(),
            email_subject: job
                .email_subject
                .clone()
                .unwrap_or_else(|| default_subject(&job.query)),
            // history rows carry no live workflow state; neutral default
            status: RequestStatus::SearchCompleted,
            created_at: parse_timestamp(&job.created_at),
            sent_at: None,
            recipients_count: None,
            backend_job_id: Some(job.id),
        };

        let request_id = request.id.clone();
        let suppliers = detail
            .results
            .iter()
            .map(|result| map_result(result, &request_id))
            .collect();

        Ok(HistoryDetail { request, suppliers })
    }

    /// Toggle the "quote received" marker on a search result.
    ///
    /// Returns the marker state confirmed by the backend.
    pub async fn set_quote_received(&self, result_id: i64, received: bool) -> CoreResult<bool> {
        let response = self.ctx.backend.toggle_quote(result_id, received).await?;
        Ok(response.quote_received)
    }
}

fn map_item(item: &HistoryListItem) -> RfqRequest {
    let any_failed = item.emails_failed.unwrap_or(0) > 0;
    let any_sent = item.emails_sent.unwrap_or(0) > 0;

    let status = if any_failed {
        RequestStatus::Error
    } else if any_sent {
        RequestStatus::Completed
    } else {
        RequestStatus::SearchCompleted
    };

    let created_at = parse_timestamp(&item.created_at);

    RfqRequest {
        id: format!("job-{}", item.id),
        equipment_name: item.query.clone(),
        rfq_text: String::new(),
        email_subject: item
            .email_subject
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_subject(&item.query)),
        status,
        created_at,
        sent_at: any_sent.then_some(created_at),
        recipients_count: item.emails_sent,
        backend_job_id: Some(item.id),
    }
}

/// Map one history result row into a supplier, deriving status from its
/// delivery statuses with the same rule the send workflow uses.
fn map_result(result: &HistoryResult, request_id: &str) -> Supplier {
    let name = [result.title.trim(), result.domain.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(UNNAMED_SUPPLIER)
        .to_string();

    let mut supplier = Supplier {
        id: format!("result-{}", result.id),
        request_id: request_id.to_string(),
        supplier_name: name,
        contact: result.emails.first().cloned().unwrap_or_default(),
        source_url: result.url.clone(),
        selected: false,
        status: SupplierStatus::Found,
        created_at: Utc::now(),
        error_message: None,
        error_details: None,
        error_code: None,
        backend_result_id: Some(result.id),
        quote_received: result.quote_received,
    };

    if let Some(outcome) = derive_send_outcome(&result.email_statuses) {
        supplier.apply_outcome(&outcome);
    }
    supplier
}

/// Parse a backend timestamp defensively.
///
/// Accepts RFC 3339 and bare `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC);
/// anything else falls back to "now" rather than failing the projection.
fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc();
    }
    Utc::now()
}
