//! CloudFront HTTP layer: SigV4-signed request construction and response
//! error handling over the shared HTTP utilities.

use super::types::ErrorResponse;
use super::{CLOUDFRONT_API_HOST, CloudfrontVendor, error::CloudfrontErrorMapper, sign};
use crate::error::{Result, VendorError};
use crate::http_client::{HttpResponseParts, HttpUtils};
use crate::traits::{ErrorContext, RawApiError, VendorErrorMapper};
use chrono::Utc;
use serde::de::DeserializeOwned;

impl CloudfrontVendor {
    /// Executes one signed request against the control plane.
    ///
    /// Single-attempt: transient failures surface as retryable errors and
    /// retry policy stays with the caller.
    pub(super) async fn request_raw(
        &self,
        method: &str,
        path: &str,
        query: &[(String, String)],
        payload: &str,
        if_match: Option<&str>,
        ctx: &ErrorContext,
    ) -> Result<HttpResponseParts> {
        let amz_date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let authorization = sign::sign(
            &self.access_key_id,
            &self.secret_access_key,
            &self.region,
            method,
            path,
            query,
            payload,
            &amz_date,
        );

        let mut url = format!("https://{CLOUDFRONT_API_HOST}{path}");
        if !query.is_empty() {
            let query_string = query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query_string);
        }

        let mut builder = self
            .client
            .request(
                method.parse().map_err(|_| VendorError::InvalidParameter {
                    vendor: CloudfrontErrorMapper::vendor_name().to_string(),
                    param: "method".to_string(),
                    detail: format!("invalid HTTP method '{method}'"),
                })?,
                &url,
            )
            .header("Host", CLOUDFRONT_API_HOST)
            .header("X-Amz-Date", &amz_date)
            .header("X-Amz-Content-Sha256", sign::payload_hash(payload))
            .header("Authorization", authorization);

        if let Some(token) = if_match {
            builder = builder.header("If-Match", token);
        }
        if !payload.is_empty() {
            builder = builder
                .header("Content-Type", "application/json")
                .body(payload.to_string());
        }

        let parts = HttpUtils::execute_request(
            builder,
            CloudfrontErrorMapper::vendor_name(),
            method,
            path,
        )
        .await?;

        if parts.status >= 400 {
            return Err(Self::handle_response_error(&parts, ctx));
        }

        Ok(parts)
    }

    /// Maps a non-success response to a [`VendorError`], preferring the
    /// structured error body when one parses.
    fn handle_response_error(parts: &HttpResponseParts, ctx: &ErrorContext) -> VendorError {
        let raw = serde_json::from_str::<ErrorResponse>(&parts.body).map_or_else(
            |_| {
                RawApiError::new(format!(
                    "HTTP {}: {}",
                    parts.status,
                    if parts.body.is_empty() {
                        "<empty body>"
                    } else {
                        parts.body.as_str()
                    }
                ))
            },
            |e| RawApiError {
                code: e.error.code,
                message: e.error.message.unwrap_or_default(),
            },
        );
        CloudfrontErrorMapper::map_error(raw, ctx)
    }

    /// GET returning a parsed JSON body.
    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        ctx: &ErrorContext,
    ) -> Result<T> {
        let parts = self.request_raw("GET", path, query, "", None, ctx).await?;
        HttpUtils::parse_json(&parts.body, CloudfrontErrorMapper::vendor_name())
    }

    /// GET returning the parsed body plus the `ETag` concurrency token.
    pub(super) async fn get_with_etag<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: &ErrorContext,
    ) -> Result<(T, String)> {
        let parts = self.request_raw("GET", path, &[], "", None, ctx).await?;
        let etag = parts.etag.clone().ok_or_else(|| {
            CloudfrontErrorMapper::parse_error("response is missing the ETag header")
        })?;
        let body = HttpUtils::parse_json(&parts.body, CloudfrontErrorMapper::vendor_name())?;
        Ok((body, etag))
    }

    /// POST with a JSON payload, returning the parsed body.
    pub(super) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &str,
        ctx: &ErrorContext,
    ) -> Result<T> {
        let parts = self
            .request_raw("POST", path, &[], payload, None, ctx)
            .await?;
        HttpUtils::parse_json(&parts.body, CloudfrontErrorMapper::vendor_name())
    }

    /// PUT with a JSON payload under `If-Match`, returning the parsed body.
    pub(super) async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &str,
        if_match: &str,
        ctx: &ErrorContext,
    ) -> Result<T> {
        let parts = self
            .request_raw("PUT", path, &[], payload, Some(if_match), ctx)
            .await?;
        HttpUtils::parse_json(&parts.body, CloudfrontErrorMapper::vendor_name())
    }

    /// DELETE under `If-Match`.
    pub(super) async fn delete_with_match(
        &self,
        path: &str,
        if_match: &str,
        ctx: &ErrorContext,
    ) -> Result<()> {
        self.request_raw("DELETE", path, &[], "", Some(if_match), ctx)
            .await?;
        Ok(())
    }
}
