//! # cdn-orchestrator-vendor
//!
//! Vendor-agnostic CDN distribution lifecycle management.
//!
//! Exposes one capability trait, [`CdnVendor`], over the control planes of
//! cloud CDN vendors: create, list, enable, disable, update, and delete
//! distributions keyed by the domain name they serve. Callers hold an
//! `Arc<dyn CdnVendor>` built by the [factory](crate::factory) and never
//! name a concrete adapter.
//!
//! ## Supported vendors
//!
//! | Vendor | Feature flag | Auth |
//! |--------|--------------|------|
//! | AWS CloudFront | `cloudfront` | SigV4 access key pair |
//!
//! ## Feature flags
//!
//! - `all-vendors` (default): every vendor adapter
//! - `cloudfront`: the AWS CloudFront adapter
//! - `native-tls` (default) / `rustls`: TLS backend selection
//!
//! ## Quick start
//!
//! ```no_run
//! use cdn_orchestrator_vendor::{resolve_vendor, CreateDistributionRequest, OriginKind};
//! use std::collections::HashMap;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = HashMap::from([
//!     ("accessKeyId".to_string(), "AKIA...".to_string()),
//!     ("secretAccessKey".to_string(), "...".to_string()),
//!     ("region".to_string(), "us-east-1".to_string()),
//! ]);
//! let vendor = resolve_vendor("cloudfront", &credentials)?;
//!
//! let created = vendor
//!     .create_distribution(&CreateDistributionRequest {
//!         origin_kind: OriginKind::S3,
//!         origin_name: "cdn.example.net".to_string(),
//!         origin_domain: "assets.s3.amazonaws.com".to_string(),
//!         options: Default::default(),
//!     })
//!     .await?;
//!
//! vendor.disable_by_domain(&created.domain_name).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! Every operation returns [`Result<T>`](crate::error::Result) with the
//! unified [`VendorError`]. The adapter never retries: transient failures
//! are marked by [`VendorError::is_retryable`] and retry policy belongs to
//! the caller. Requesting an enable/disable the distribution is already in
//! is not an error; it returns
//! [`TransitionOutcome::AlreadyInState`](crate::types::TransitionOutcome).

pub mod error;
pub mod factory;
pub mod http_client;
pub mod traits;
pub mod types;
pub mod utils;
pub mod vendors;

pub use error::{Result, VendorError};
pub use factory::{create_vendor, get_all_vendor_metadata, resolve_vendor};
pub use traits::CdnVendor;
pub use types::{
    CreateDistributionRequest, CredentialValidationError, Distribution, DistributionOptions,
    DistributionStatus, FieldType, OriginKind, TransitionOutcome, UpdateDistributionOptions,
    VendorCredentialField, VendorCredentials, VendorFeatures, VendorLimits, VendorMetadata,
    VendorType,
};
