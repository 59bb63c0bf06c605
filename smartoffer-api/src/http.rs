//! HTTP request execution for [`HttpBackend`].
//!
//! Unified handling of the request/response cycle: header injection, logging,
//! status mapping and JSON decoding. Endpoint methods live in `backend.rs`
//! and only describe path + body.

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::backend::HttpBackend;
use crate::error::{ApiError, Result};

/// Maximum response body length echoed into debug logs.
const LOG_BODY_LIMIT: usize = 500;

/// Truncate a response body for logging, keeping the log line bounded.
fn truncate_for_log(body: &str) -> String {
    if body.len() <= LOG_BODY_LIMIT {
        body.to_string()
    } else {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < LOG_BODY_LIMIT)
            .last()
            .map_or(0, |(i, c)| i + c.len_utf8());
        format!("{}… ({} bytes total)", &body[..cut], body.len())
    }
}

impl HttpBackend {
    /// Execute a GET request and decode the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url());
        log::debug!("GET {url}");
        let builder = self.with_auth(self.client().get(&url));
        let text = Self::execute(builder, "GET", path).await?;
        Self::parse_body(&text)
    }

    /// Execute a POST request with a JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url());
        let json = serde_json::to_string(body).map_err(|e| ApiError::Serialization {
            detail: e.to_string(),
        })?;
        log::debug!("POST {url}");
        log::debug!("Request Body: {}", truncate_for_log(&json));
        let builder = self
            .with_auth(self.client().post(&url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(json);
        let text = Self::execute(builder, "POST", path).await?;
        Self::parse_body(&text)
    }

    /// Merge configured credentials into a request.
    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        let auth = self.auth();
        let builder = match &auth.api_key {
            Some(key) => builder.header("X-API-Key", key),
            None => builder,
        };
        match &auth.bearer_token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Send the request and return the response body text.
    ///
    /// Any non-success status becomes [`ApiError::Http`] carrying the raw
    /// body; transport failures map to `Timeout`/`Network`.
    async fn execute(builder: RequestBuilder, method: &str, path: &str) -> Result<String> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                ApiError::Network {
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        log::debug!("[{method} {path}] Response Status: {status}");

        let text = response.text().await.map_err(|e| ApiError::Network {
            detail: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            log::warn!("[{method} {path}] HTTP {status}: {}", truncate_for_log(&text));
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        log::debug!("[{method} {path}] Response Body: {}", truncate_for_log(&text));
        Ok(text)
    }

    /// Decode a response body.
    ///
    /// An empty body decodes as JSON `null`, so endpoints declaring
    /// `Option<T>` or `Value` targets get an absent result instead of a
    /// parse error.
    pub(crate) fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T> {
        let effective = if text.trim().is_empty() { "null" } else { text };
        serde_json::from_str(effective).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(text));
            ApiError::Parse {
                detail: e.to_string(),
            }
        })
    }
}
