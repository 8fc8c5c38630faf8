//! AWS CloudFront vendor adapter.
//!
//! Talks to the CloudFront control plane over SigV4-signed HTTPS. Mutating
//! operations follow CloudFront's optimistic concurrency scheme: read the
//! distribution config (capturing the `ETag` token), modify it locally, and
//! write it back with `If-Match`. A stale token surfaces as
//! [`VendorError::PreconditionFailed`](crate::error::VendorError::PreconditionFailed);
//! the caller re-reads and retries.

mod config;
mod distribution;
mod error;
mod http;
mod sign;
mod types;

use crate::vendors::common::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, create_http_client,
};
use std::time::Duration;

/// CloudFront control-plane endpoint. The service is global; the region only
/// enters the credential scope of the request signature.
pub(crate) const CLOUDFRONT_API_HOST: &str = "cloudfront.amazonaws.com";
/// API version segment used in request paths.
pub(crate) const CLOUDFRONT_API_VERSION: &str = "2020-05-31";
/// Service name in the SigV4 credential scope.
pub(crate) const CLOUDFRONT_SERVICE: &str = "cloudfront";
/// Page size for list requests.
pub(crate) const MAX_LIST_ITEMS: u32 = 100;

/// CloudFront vendor adapter.
pub struct CloudfrontVendor {
    client: reqwest::Client,
    access_key_id: String,
    secret_access_key: String,
    region: String,
}

/// Builder for [`CloudfrontVendor`], with configurable HTTP timeouts.
pub struct CloudfrontVendorBuilder {
    access_key_id: String,
    secret_access_key: String,
    region: String,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl CloudfrontVendorBuilder {
    /// Connection establishment timeout. Default: 10s.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Overall per-request timeout. Default: 30s.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn build(self) -> CloudfrontVendor {
        CloudfrontVendor {
            client: create_http_client(self.connect_timeout, self.request_timeout),
            access_key_id: self.access_key_id,
            secret_access_key: self.secret_access_key,
            region: self.region,
        }
    }
}

impl CloudfrontVendor {
    /// Creates an adapter with default timeouts.
    #[must_use]
    pub fn new(access_key_id: String, secret_access_key: String, region: String) -> Self {
        Self::builder(access_key_id, secret_access_key, region).build()
    }

    /// Starts a builder for timeout customization.
    #[must_use]
    pub fn builder(
        access_key_id: String,
        secret_access_key: String,
        region: String,
    ) -> CloudfrontVendorBuilder {
        CloudfrontVendorBuilder {
            access_key_id,
            secret_access_key,
            region,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
