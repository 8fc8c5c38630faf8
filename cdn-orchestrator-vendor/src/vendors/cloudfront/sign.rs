//! AWS Signature Version 4 (`AWS4-HMAC-SHA256`) request signing.
//!
//! Signs requests against the CloudFront control plane. The signed header
//! set is fixed (`host`, `x-amz-content-sha256`, `x-amz-date`); callers must
//! send exactly those headers with the values used here.

use super::{CLOUDFRONT_API_HOST, CLOUDFRONT_SERVICE};
use crate::vendors::common::hmac_sha256;
use sha2::{Digest, Sha256};

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";

/// Lowercase hex SHA-256 of the request payload, also sent as the
/// `x-amz-content-sha256` header.
pub fn payload_hash(payload: &str) -> String {
    hex::encode(Sha256::digest(payload.as_bytes()))
}

/// Builds the canonical query string: keys sorted, both keys and values
/// percent-encoded.
fn canonical_query(query: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| {
            (
                urlencoding::encode(k).into_owned(),
                urlencoding::encode(v).into_owned(),
            )
        })
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Computes the `Authorization` header value for a request.
///
/// # Arguments
/// * `method` - HTTP method, uppercase
/// * `path` - absolute request path, already URI-safe
/// * `query` - query parameters, unencoded
/// * `payload` - request body ("" for bodyless requests)
/// * `amz_date` - timestamp in `YYYYMMDDTHHMMSSZ` form
pub fn sign(
    access_key_id: &str,
    secret_access_key: &str,
    region: &str,
    method: &str,
    path: &str,
    query: &[(String, String)],
    payload: &str,
    amz_date: &str,
) -> String {
    let date = &amz_date[..8];
    let hashed_payload = payload_hash(payload);

    // Step 1: canonical request
    let canonical_headers = format!(
        "host:{CLOUDFRONT_API_HOST}\nx-amz-content-sha256:{hashed_payload}\nx-amz-date:{amz_date}\n"
    );
    let canonical_request = format!(
        "{method}\n{path}\n{}\n{canonical_headers}\n{SIGNED_HEADERS}\n{hashed_payload}",
        canonical_query(query)
    );

    // Step 2: string to sign
    let credential_scope = format!("{date}/{region}/{CLOUDFRONT_SERVICE}/aws4_request");
    let hashed_canonical_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));
    let string_to_sign =
        format!("{ALGORITHM}\n{amz_date}\n{credential_scope}\n{hashed_canonical_request}");

    // Step 3: signing key derivation chain
    let k_date = hmac_sha256(format!("AWS4{secret_access_key}").as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, CLOUDFRONT_SERVICE.as_bytes());
    let k_signing = hmac_sha256(&k_service, b"aws4_request");

    // Step 4: signature
    let signature = hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes()));

    format!(
        "{ALGORITHM} Credential={access_key_id}/{credential_scope}, \
         SignedHeaders={SIGNED_HEADERS}, Signature={signature}"
    )
}
