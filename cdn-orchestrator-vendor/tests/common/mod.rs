//! Shared helpers for the live integration tests.

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use cdn_orchestrator_vendor::{CdnVendor, VendorCredentials, create_vendor};

/// Skips the test when required environment variables are missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Asserts that a `Result` is `Ok` and unwraps it, failing the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Asserts that an `Option` is `Some` and unwraps it, failing the test otherwise.
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Test context wrapping a vendor adapter and the distribution domain the
/// tests operate on.
pub struct TestContext {
    pub vendor: Arc<dyn CdnVendor>,
    pub domain: String,
}

impl TestContext {
    /// Builds a CloudFront test context from the environment.
    ///
    /// Requires `CLOUDFRONT_ACCESS_KEY_ID`, `CLOUDFRONT_SECRET_ACCESS_KEY`,
    /// `CLOUDFRONT_REGION` and `TEST_DISTRIBUTION_DOMAIN` (the edge domain
    /// of an existing distribution that the lifecycle tests may toggle).
    pub fn cloudfront() -> Option<Self> {
        let access_key_id = env::var("CLOUDFRONT_ACCESS_KEY_ID").ok()?;
        let secret_access_key = env::var("CLOUDFRONT_SECRET_ACCESS_KEY").ok()?;
        let region = env::var("CLOUDFRONT_REGION").ok()?;
        let domain = env::var("TEST_DISTRIBUTION_DOMAIN").ok()?;

        let credentials = VendorCredentials::Cloudfront {
            access_key_id,
            secret_access_key,
            region,
        };
        let vendor = create_vendor(credentials).ok()?;

        Some(Self { vendor, domain })
    }
}
