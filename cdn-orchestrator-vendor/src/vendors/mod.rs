//! Vendor adapter implementations.

pub(crate) mod common;

#[cfg(feature = "cloudfront")]
pub mod cloudfront;
