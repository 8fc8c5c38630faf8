use serde::{Deserialize, Serialize};

/// Unified error type for all CDN vendor operations.
///
/// Each variant includes a `vendor` field identifying which vendor produced the error
/// (except [`UnknownVendor`](Self::UnknownVendor), which is raised before any vendor
/// exists), plus variant-specific context. All variants are serializable for
/// structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — API rate limit exceeded
///
/// The adapter never retries internally; use [`is_retryable()`](Self::is_retryable)
/// to drive a retry loop at the call site. [`PreconditionFailed`](Self::PreconditionFailed)
/// is deliberately *not* retryable as-is: the caller must re-read the distribution
/// config to obtain a fresh concurrency token first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum VendorError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Vendor that produced the error.
        vendor: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Vendor that produced the error.
        vendor: String,
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    RateLimited {
        /// Vendor that produced the error.
        vendor: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// The provided credentials are invalid, expired, or failed signature verification.
    InvalidCredentials {
        /// Vendor that produced the error.
        vendor: String,
        /// Original error message from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated identity lacks permission for the requested operation.
    PermissionDenied {
        /// Vendor that produced the error.
        vendor: String,
        /// Original error message from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// The factory was given a vendor name it does not recognize.
    UnknownVendor {
        /// The unrecognized vendor name, as received.
        name: String,
    },

    /// No distribution matches the given domain name.
    DistributionNotFound {
        /// Vendor that produced the error.
        vendor: String,
        /// Domain name that was not found.
        domain: String,
        /// Original error message from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// A precondition for the operation does not hold.
    ///
    /// Raised when a delete is attempted on an enabled distribution, or when the
    /// concurrency token presented with a mutating call no longer matches the
    /// vendor's current token (the config changed since it was read).
    PreconditionFailed {
        /// Vendor that produced the error.
        vendor: String,
        /// Which precondition failed.
        detail: String,
        /// Original error message from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// The account's distribution quota has been exceeded.
    QuotaExceeded {
        /// Vendor that produced the error.
        vendor: String,
        /// Original error message from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (unknown HTTP method, unrecognized cache
    /// policy name, malformed price class, etc.).
    InvalidParameter {
        /// Vendor that produced the error.
        vendor: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the vendor's API response.
    ParseError {
        /// Vendor that produced the error.
        vendor: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Vendor that produced the error.
        vendor: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// Any other rejection from the vendor API, passed through opaquely.
    ///
    /// The raw code and message are preserved unmodified for diagnosability.
    UpstreamRejected {
        /// Vendor that produced the error.
        vendor: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl VendorError {
    /// Whether this error is expected behavior (bad input, missing resource,
    /// failed precondition), used for log-level selection.
    ///
    /// Returns `true` for `warn`-level errors, `false` for `error`-level ones.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::UnknownVendor { .. }
                | Self::DistributionNotFound { .. }
                | Self::PreconditionFailed { .. }
                | Self::QuotaExceeded { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether the failed call may succeed if repeated as-is.
    ///
    /// Only transient transport-level failures qualify. Token-mismatch
    /// (`PreconditionFailed`) requires a fresh read before retrying and is
    /// therefore excluded.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

impl std::fmt::Display for VendorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { vendor, detail } => {
                write!(f, "[{vendor}] Network error: {detail}")
            }
            Self::Timeout { vendor, detail } => {
                write!(f, "[{vendor}] Request timeout: {detail}")
            }
            Self::RateLimited {
                vendor,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{vendor}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{vendor}] Rate limited")
                }
            }
            Self::InvalidCredentials {
                vendor,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{vendor}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{vendor}] Invalid credentials")
                }
            }
            Self::PermissionDenied {
                vendor,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{vendor}] Permission denied: {msg}")
                } else {
                    write!(f, "[{vendor}] Permission denied")
                }
            }
            Self::UnknownVendor { name } => {
                write!(f, "Unknown vendor: '{name}'")
            }
            Self::DistributionNotFound {
                vendor,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{vendor}] No distribution for domain '{domain}': {msg}")
                } else {
                    write!(f, "[{vendor}] No distribution for domain '{domain}'")
                }
            }
            Self::PreconditionFailed {
                vendor,
                detail,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{vendor}] Precondition failed: {detail}: {msg}")
                } else {
                    write!(f, "[{vendor}] Precondition failed: {detail}")
                }
            }
            Self::QuotaExceeded { vendor, .. } => {
                write!(f, "[{vendor}] Distribution quota exceeded")
            }
            Self::InvalidParameter {
                vendor,
                param,
                detail,
            } => {
                write!(f, "[{vendor}] Invalid parameter '{param}': {detail}")
            }
            Self::ParseError { vendor, detail } => {
                write!(f, "[{vendor}] Parse error: {detail}")
            }
            Self::SerializationError { vendor, detail } => {
                write!(f, "[{vendor}] Serialization error: {detail}")
            }
            Self::UpstreamRejected {
                vendor,
                raw_message,
                ..
            } => {
                write!(f, "[{vendor}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for VendorError {}

/// Convenience type alias for `Result<T, VendorError>`.
pub type Result<T> = std::result::Result<T, VendorError>;
