//! Supplier search adapter.
//!
//! Wraps `POST /search` and maps the loosely typed backend rows into
//! [`Supplier`] view-model entries.

use std::sync::Arc;

use chrono::Utc;
use smartoffer_api::{SearchRequest, SearchResult};

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::{Supplier, SupplierStatus, UNNAMED_SUPPLIER};

/// Fixed search parameters sent with every query.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub lang: String,
    pub top_k: u32,
    pub enrich_emails: bool,
    pub yandex_pages_cap: u32,
    pub ddg_pages_cap: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            lang: "ru".to_string(),
            top_k: 20,
            enrich_emails: true,
            yandex_pages_cap: 5,
            ddg_pages_cap: 3,
        }
    }
}

/// Result of one search invocation.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Backend job id; `None` when the backend did not persist the job, in
    /// which case later sends are restricted to manual suppliers.
    pub job_id: Option<i64>,
    pub suppliers: Vec<Supplier>,
}

/// Supplier search service
pub struct SearchService {
    ctx: Arc<ServiceContext>,
    options: SearchOptions,
}

impl SearchService {
    /// Create a search service with default options.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self::with_options(ctx, SearchOptions::default())
    }

    /// Create a search service with explicit options.
    #[must_use]
    pub fn with_options(ctx: Arc<ServiceContext>, options: SearchOptions) -> Self {
        Self { ctx, options }
    }

    /// Run a supplier search for `query` within the session `request_id`.
    ///
    /// Every mapped supplier starts selected with status `Found`. Client
    /// ids are `{request_id}-{index}` so rows stay stable across renders.
    pub async fn search(&self, query: &str, request_id: &str) -> CoreResult<SearchOutcome> {
        let request = SearchRequest {
            query: query.to_string(),
            lang: self.options.lang.clone(),
            top_k: self.options.top_k,
            enrich_emails: self.options.enrich_emails,
            yandex_pages_cap: self.options.yandex_pages_cap,
            ddg_pages_cap: self.options.ddg_pages_cap,
        };

        let response = self.ctx.backend.search(&request).await?;
        log::debug!(
            "search '{query}': job_id={:?}, {} raw results",
            response.job_id,
            response.results.len()
        );

        let suppliers = response
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| map_result(result, request_id, index))
            .collect();

        Ok(SearchOutcome {
            job_id: response.job_id,
            suppliers,
        })
    }
}

/// Map one backend search row into the supplier view model.
///
/// Name falls back title → domain → placeholder; contact takes the first
/// extracted email. Rows without a positive numeric id keep
/// `backend_result_id = None` and behave like manual entries during
/// reconciliation.
fn map_result(result: &SearchResult, request_id: &str, index: usize) -> Supplier {
    let name = [result.title.trim(), result.domain.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(UNNAMED_SUPPLIER)
        .to_string();

    Supplier {
        id: format!("{request_id}-{index}"),
        request_id: request_id.to_string(),
        supplier_name: name,
        contact: result.emails.first().cloned().unwrap_or_default(),
        source_url: result.url.clone(),
        selected: true,
        status: SupplierStatus::Found,
        created_at: Utc::now(),
        error_message: None,
        error_details: None,
        error_code: None,
        backend_result_id: result.id.filter(|id| *id > 0),
        quote_received: None,
    }
}
