//! Shared helpers for vendor adapters: HTTP client construction, HMAC, and
//! normalization of operator-supplied option strings.

use crate::error::{Result, VendorError};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;

/// Default connect timeout for vendor API clients.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default overall request timeout for vendor API clients.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the shared `reqwest` client for a vendor adapter.
///
/// # Panics
///
/// Panics if the TLS backend cannot be initialized, which indicates a broken
/// build environment rather than a runtime condition.
pub fn create_http_client(connect_timeout: Duration, request_timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .expect("Failed to create HTTP client")
}

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256, the primitive under request signing.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

const KNOWN_METHODS: &[&str] = &["GET", "HEAD", "OPTIONS", "PUT", "POST", "PATCH", "DELETE"];
const KNOWN_VERSIONS: &[&str] = &["http1.1", "http2", "http3", "http2and3"];
const KNOWN_PRICE_CLASSES: &[&str] = &["PriceClass_All", "PriceClass_100", "PriceClass_200"];

/// Normalizes an HTTP method name to uppercase, rejecting unknown methods.
pub fn parse_http_method(vendor: &str, method: &str) -> Result<String> {
    let upper = method.to_uppercase();
    if KNOWN_METHODS.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(VendorError::InvalidParameter {
            vendor: vendor.to_string(),
            param: "allowed_methods".to_string(),
            detail: format!("unknown HTTP method '{method}'"),
        })
    }
}

/// Normalizes an HTTP version name to lowercase, rejecting unknown versions.
pub fn parse_http_version(vendor: &str, version: &str) -> Result<String> {
    let lower = version.to_lowercase();
    if KNOWN_VERSIONS.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        Err(VendorError::InvalidParameter {
            vendor: vendor.to_string(),
            param: "supported_http_versions".to_string(),
            detail: format!("unknown HTTP version '{version}'"),
        })
    }
}

/// Validates a price class name, case-insensitively, returning the canonical
/// spelling.
pub fn parse_price_class(vendor: &str, price_class: &str) -> Result<String> {
    KNOWN_PRICE_CLASSES
        .iter()
        .find(|known| known.eq_ignore_ascii_case(price_class))
        .map(|known| (*known).to_string())
        .ok_or_else(|| VendorError::InvalidParameter {
            vendor: vendor.to_string(),
            param: "price_class".to_string(),
            detail: format!("unknown price class '{price_class}'"),
        })
}
