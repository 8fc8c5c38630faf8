//! CloudFront error mapping.
//!
//! Maps CloudFront error codes to the unified [`VendorError`]. Codes with no
//! mapping rule pass through as `UpstreamRejected` with the raw code and
//! message intact.

use crate::error::VendorError;
use crate::traits::{ErrorContext, RawApiError, VendorErrorMapper};

pub(crate) struct CloudfrontErrorMapper;

impl VendorErrorMapper for CloudfrontErrorMapper {
    fn vendor_name() -> &'static str {
        "cloudfront"
    }

    fn map_error(raw: RawApiError, ctx: &ErrorContext) -> VendorError {
        let vendor = Self::vendor_name().to_string();
        let Some(code) = raw.code.as_deref() else {
            return Self::upstream_rejected(raw);
        };

        match code {
            "InvalidIfMatchVersion" | "PreconditionFailed" => VendorError::PreconditionFailed {
                vendor,
                detail: "concurrency token mismatch, config changed since read".to_string(),
                raw_message: Some(raw.message),
            },
            "DistributionNotDisabled" => VendorError::PreconditionFailed {
                vendor,
                detail: "distribution must be disabled first".to_string(),
                raw_message: Some(raw.message),
            },
            "NoSuchDistribution" | "NoSuchResource" => VendorError::DistributionNotFound {
                vendor,
                domain: ctx
                    .domain
                    .clone()
                    .or_else(|| ctx.distribution_id.clone())
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },
            "AccessDenied" => VendorError::PermissionDenied {
                vendor,
                raw_message: Some(raw.message),
            },
            "UnrecognizedClientException" | "InvalidClientTokenId" | "SignatureDoesNotMatch"
            | "IncompleteSignature" => VendorError::InvalidCredentials {
                vendor,
                raw_message: Some(raw.message),
            },
            "Throttling" | "ThrottlingException" | "TooManyRequests" => VendorError::RateLimited {
                vendor,
                retry_after: None,
                raw_message: Some(raw.message),
            },
            "TooManyDistributions" => VendorError::QuotaExceeded {
                vendor,
                raw_message: Some(raw.message),
            },
            "InvalidArgument" | "ValidationError" => VendorError::InvalidParameter {
                vendor,
                param: "request".to_string(),
                detail: raw.message,
            },
            _ => Self::upstream_rejected(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(code: &str) -> VendorError {
        CloudfrontErrorMapper::map_error(
            RawApiError::with_code(code, "message from api"),
            &ErrorContext::default(),
        )
    }

    #[test]
    fn if_match_mismatch_is_precondition_failed() {
        for code in ["InvalidIfMatchVersion", "PreconditionFailed"] {
            let err = map(code);
            assert!(
                matches!(&err, VendorError::PreconditionFailed { detail, .. }
                    if detail.contains("token mismatch")),
                "unexpected mapping for {code}: {err:?}"
            );
        }
    }

    #[test]
    fn not_disabled_is_precondition_failed() {
        let err = map("DistributionNotDisabled");
        assert!(matches!(
            &err,
            VendorError::PreconditionFailed { detail, .. } if detail.contains("disabled")
        ));
    }

    #[test]
    fn no_such_distribution_uses_context_domain() {
        let err = CloudfrontErrorMapper::map_error(
            RawApiError::with_code("NoSuchDistribution", "not found"),
            &ErrorContext::for_domain("cdn.example.net"),
        );
        assert!(matches!(
            &err,
            VendorError::DistributionNotFound { domain, .. } if domain == "cdn.example.net"
        ));
    }

    #[test]
    fn no_such_distribution_without_context() {
        let err = map("NoSuchDistribution");
        assert!(matches!(
            &err,
            VendorError::DistributionNotFound { domain, .. } if domain == "<unknown>"
        ));
    }

    #[test]
    fn access_denied_is_permission_denied() {
        assert!(matches!(
            map("AccessDenied"),
            VendorError::PermissionDenied { .. }
        ));
    }

    #[test]
    fn signature_errors_are_invalid_credentials() {
        for code in [
            "UnrecognizedClientException",
            "InvalidClientTokenId",
            "SignatureDoesNotMatch",
            "IncompleteSignature",
        ] {
            let err = map(code);
            assert!(
                matches!(&err, VendorError::InvalidCredentials { .. }),
                "unexpected mapping for {code}: {err:?}"
            );
        }
    }

    #[test]
    fn throttling_is_rate_limited() {
        for code in ["Throttling", "ThrottlingException", "TooManyRequests"] {
            assert!(matches!(map(code), VendorError::RateLimited { .. }));
        }
    }

    #[test]
    fn too_many_distributions_is_quota_exceeded() {
        assert!(matches!(
            map("TooManyDistributions"),
            VendorError::QuotaExceeded { .. }
        ));
    }

    #[test]
    fn invalid_argument_is_invalid_parameter() {
        assert!(matches!(
            map("InvalidArgument"),
            VendorError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn unmapped_code_passes_through() {
        let err = map("CNAMEAlreadyExists");
        match err {
            VendorError::UpstreamRejected {
                raw_code,
                raw_message,
                ..
            } => {
                assert_eq!(raw_code.as_deref(), Some("CNAMEAlreadyExists"));
                assert_eq!(raw_message, "message from api");
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn missing_code_passes_through() {
        let err = CloudfrontErrorMapper::map_error(
            RawApiError::new("opaque failure"),
            &ErrorContext::default(),
        );
        assert!(matches!(
            &err,
            VendorError::UpstreamRejected { raw_code: None, .. }
        ));
    }
}
