//! Generic HTTP client tools
//!
//! Provides the shared request execution path for vendor adapters. Each
//! vendor keeps full signing flexibility and builds its own
//! `RequestBuilder`; this module owns the transport-level concerns:
//! sending, logging, timeout/network classification, rate-limit detection,
//! concurrency-token extraction, and body reading.
//!
//! Requests are single-attempt by design. Transient failures surface as
//! retryable [`VendorError`] variants and retry policy belongs to the
//! caller.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::VendorError;
use crate::utils::log_sanitizer::truncate_for_log;

/// The transport-level pieces of a vendor API response.
#[derive(Debug, Clone)]
pub struct HttpResponseParts {
    /// HTTP status code.
    pub status: u16,
    /// Concurrency token from the `ETag` header, surrounding quotes stripped.
    pub etag: Option<String>,
    /// Response body text.
    pub body: String,
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request once and returns status, `ETag` and body.
    ///
    /// Unified processing: sending requests, logging, transport error
    /// classification.
    ///
    /// # Errors
    /// * [`VendorError::Timeout`] when the request times out
    /// * [`VendorError::NetworkError`] for connection failures and HTTP 502-504
    /// * [`VendorError::RateLimited`] for HTTP 429 (with `Retry-After` if present)
    ///
    /// Other non-success statuses are returned to the caller for
    /// vendor-specific error mapping.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        vendor_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<HttpResponseParts, VendorError> {
        log::debug!("[{vendor_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                VendorError::Timeout {
                    vendor: vendor_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                VendorError::NetworkError {
                    vendor: vendor_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{vendor_name}] Response Status: {status}");

        // Extract headers before consuming the response body
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let etag = response
            .headers()
            .get("etag")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_matches('"').to_string());

        if status == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{vendor_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(VendorError::RateLimited {
                vendor: vendor_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        // 502/503/504 are transient gateway failures, classified as retryable
        if matches!(status, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{vendor_name}] Server error (HTTP {status})");
            return Err(VendorError::NetworkError {
                vendor: vendor_name.to_string(),
                detail: format!("HTTP {status}: {body}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| VendorError::NetworkError {
                vendor: vendor_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[{vendor_name}] Response Body: {}", truncate_for_log(&body));

        Ok(HttpResponseParts { status, etag, body })
    }

    /// Parse a JSON response body.
    ///
    /// # Errors
    /// * [`VendorError::ParseError`] when deserialization fails
    pub fn parse_json<T>(response_text: &str, vendor_name: &str) -> Result<T, VendorError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{vendor_name}] JSON parse failed: {e}");
            log::error!(
                "[{vendor_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            VendorError::ParseError {
                vendor: vendor_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
