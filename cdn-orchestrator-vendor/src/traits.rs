use crate::error::{Result, VendorError};
use crate::types::{
    CreateDistributionRequest, Distribution, TransitionOutcome, UpdateDistributionOptions,
    VendorMetadata,
};
use async_trait::async_trait;

/// Raw error information extracted from a vendor API response, before it is
/// mapped to a [`VendorError`].
#[derive(Debug, Clone)]
pub struct RawApiError {
    /// Vendor-specific error code, if the response carried one.
    pub code: Option<String>,
    /// Human-readable error message.
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Request context carried into error mapping, so mapped errors can name the
/// domain or distribution the failed call was about.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Domain name the operation targeted, if any.
    pub domain: Option<String>,
    /// Distribution id the operation targeted, if any.
    pub distribution_id: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            distribution_id: None,
        }
    }
}

/// Maps vendor-specific API errors to the unified [`VendorError`].
///
/// Each vendor implements this once; the shared HTTP layer calls
/// [`map_error`](Self::map_error) whenever a response indicates failure.
pub(crate) trait VendorErrorMapper {
    /// Vendor name used in error messages.
    fn vendor_name() -> &'static str;

    /// Maps a raw API error to a [`VendorError`], using the request context
    /// to fill in domain/id details where the variant wants them.
    fn map_error(raw: RawApiError, ctx: &ErrorContext) -> VendorError;

    /// Shorthand for a response-parsing failure.
    fn parse_error(detail: impl Into<String>) -> VendorError {
        VendorError::ParseError {
            vendor: Self::vendor_name().to_string(),
            detail: detail.into(),
        }
    }

    /// Opaque passthrough for codes no mapping rule claims.
    fn upstream_rejected(raw: RawApiError) -> VendorError {
        VendorError::UpstreamRejected {
            vendor: Self::vendor_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// The vendor capability contract.
///
/// Every CDN vendor adapter implements this trait; callers hold an
/// `Arc<dyn CdnVendor>` obtained from the [factory](crate::factory) and never
/// name a concrete vendor type.
///
/// Domain-keyed operations (`*_by_domain`) resolve the domain to the vendor's
/// distribution id internally and return
/// [`VendorError::DistributionNotFound`] when no distribution serves the
/// domain.
#[async_trait]
pub trait CdnVendor: Send + Sync {
    /// Stable vendor identifier (e.g. `"cloudfront"`).
    fn id(&self) -> &'static str;

    /// Static vendor description: credential fields, features, limits.
    fn metadata() -> VendorMetadata
    where
        Self: Sized;

    /// Checks whether the configured credentials are accepted by the vendor.
    ///
    /// Returns `Ok(false)` for rejected credentials; errors are reserved for
    /// failures that say nothing about credential validity (network, parse).
    async fn validate_credentials(&self) -> Result<bool>;

    /// Creates a new distribution and returns its vendor-side representation.
    async fn create_distribution(
        &self,
        request: &CreateDistributionRequest,
    ) -> Result<Distribution>;

    /// Resolves a domain name to the vendor's distribution id.
    async fn resolve_distribution_id(&self, domain: &str) -> Result<String>;

    /// Lists all distributions in the account.
    async fn list_distributions(&self) -> Result<Vec<Distribution>>;

    /// Fetches distribution details by domain. Returns `Ok(None)` when no
    /// distribution serves the domain (this read is not an error path).
    async fn distribution_details_by_domain(&self, domain: &str) -> Result<Option<Distribution>>;

    /// Enables the distribution serving `domain`. No-op if already enabled.
    async fn enable_by_domain(&self, domain: &str) -> Result<TransitionOutcome>;

    /// Disables the distribution serving `domain`. No-op if already disabled.
    async fn disable_by_domain(&self, domain: &str) -> Result<TransitionOutcome>;

    /// Deletes the distribution serving `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::PreconditionFailed`] without issuing a delete
    /// if the distribution is still enabled.
    async fn delete_by_domain(&self, domain: &str) -> Result<()>;

    /// Applies a partial configuration update to the distribution serving
    /// `domain`. Unset options keep the remote value.
    async fn update_by_domain(
        &self,
        domain: &str,
        options: &UpdateDistributionOptions,
    ) -> Result<Distribution>;
}
