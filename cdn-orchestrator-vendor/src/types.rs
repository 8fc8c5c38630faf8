use crate::error::{Result, VendorError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Supported CDN vendor types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorType {
    /// AWS CloudFront
    #[cfg(feature = "cloudfront")]
    Cloudfront,
}

impl fmt::Display for VendorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "cloudfront")]
            Self::Cloudfront => write!(f, "cloudfront"),
        }
    }
}

impl VendorType {
    /// Resolves a vendor name to its type, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::UnknownVendor`] if the name does not match any
    /// compiled-in vendor.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            #[cfg(feature = "cloudfront")]
            "cloudfront" => Ok(Self::Cloudfront),
            _ => Err(VendorError::UnknownVendor {
                name: name.to_string(),
            }),
        }
    }
}

/// Deployment status of a distribution at the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistributionStatus {
    /// Fully propagated to the edge.
    Deployed,
    /// A configuration change is still propagating.
    InProgress,
    /// The vendor reported a status this library does not recognize.
    Unknown,
}

/// Outcome of an enable/disable transition.
///
/// Requesting a state the distribution is already in is not an error; no
/// write is issued and `AlreadyInState` is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionOutcome {
    /// The enabled flag was flipped and written back.
    Applied,
    /// The distribution was already in the requested state; nothing was written.
    AlreadyInState,
}

impl TransitionOutcome {
    /// Whether the transition actually modified the distribution.
    #[must_use]
    pub fn changed(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Origin backend kind for a new distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginKind {
    /// An object-storage bucket origin.
    S3,
    /// Any other HTTP(S) origin server.
    Custom,
}

impl OriginKind {
    /// Parses an origin-kind string. `"s3"` (any case) is S3; everything
    /// else is treated as a custom origin.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("s3") {
            Self::S3
        } else {
            Self::Custom
        }
    }
}

/// Request to create a new distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDistributionRequest {
    /// Origin backend kind.
    pub origin_kind: OriginKind,
    /// Domain name the distribution serves (also used as the origin id).
    pub origin_name: String,
    /// Origin server domain name.
    pub origin_domain: String,
    /// Optional tuning knobs; defaults applied by the vendor adapter.
    #[serde(default)]
    pub options: DistributionOptions,
}

/// Optional distribution settings, as raw operator input.
///
/// Values are normalized and validated by the vendor's config mapper, not
/// here. All fields default to `None`, which means "use the vendor default".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistributionOptions {
    /// HTTP methods the distribution accepts. Default: `GET, HEAD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<Vec<String>>,
    /// HTTP versions supported at the edge, in preference order; the first
    /// entry becomes the active version. Default: `http2, http3`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_http_versions: Option<Vec<String>>,
    /// Edge location coverage. Default: all regions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_class: Option<String>,
    /// Managed cache policy name. Mutually exclusive with the TTL fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_policy: Option<String>,
    /// Default cache TTL in seconds. Default: 3600.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<u64>,
    /// Minimum cache TTL in seconds. Default: 60.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_ttl: Option<u64>,
    /// Maximum cache TTL in seconds. Default: 86400.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ttl: Option<u64>,
}

/// Partial-update options. Unset fields keep the remote value.
///
/// Setting `cache_policy` switches the distribution to managed-policy caching
/// (any explicit TTLs are removed); setting any TTL switches it to legacy TTL
/// caching (the policy reference is removed).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDistributionOptions {
    /// New origin server domain name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_domain: Option<String>,
    /// New origin path prefix (e.g. `/static`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_path: Option<String>,
    /// HTTP methods the distribution accepts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<Vec<String>>,
    /// HTTP versions supported at the edge, in preference order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_http_versions: Option<Vec<String>>,
    /// Edge location coverage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_class: Option<String>,
    /// Managed cache policy name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_policy: Option<String>,
    /// Default cache TTL in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<u64>,
    /// Minimum cache TTL in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_ttl: Option<u64>,
    /// Maximum cache TTL in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ttl: Option<u64>,
}

/// A CDN distribution as seen through the vendor-neutral interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Distribution {
    /// Vendor-assigned distribution id.
    pub id: String,
    /// Domain name the distribution serves.
    pub domain_name: String,
    /// Vendor that owns this distribution.
    pub vendor: VendorType,
    /// Whether the distribution is currently enabled.
    pub enabled: bool,
    /// Deployment status.
    pub status: DistributionStatus,
    /// Free-form comment attached at the vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Last modification time, if reported by the vendor.
    #[serde(with = "crate::utils::datetime", default)]
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Credential validation failure, raised by `VendorCredentials::from_map`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// A required field is absent from the map.
    MissingField(String),
    /// A required field is present but empty.
    EmptyField(String),
    /// A field value has an invalid format.
    InvalidFormat(String),
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing required field: {field}"),
            Self::EmptyField(field) => write!(f, "Field cannot be empty: {field}"),
            Self::InvalidFormat(msg) => write!(f, "Invalid format: {msg}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

fn get_required_field(
    map: &HashMap<String, String>,
    key: &str,
) -> std::result::Result<String, CredentialValidationError> {
    let value = map
        .get(key)
        .ok_or_else(|| CredentialValidationError::MissingField(key.to_string()))?;
    if value.trim().is_empty() {
        return Err(CredentialValidationError::EmptyField(key.to_string()));
    }
    Ok(value.clone())
}

/// Vendor credentials, one variant per supported vendor.
///
/// Serialized with an external tag so stored credentials remain
/// self-describing:
///
/// ```json
/// { "vendor": "cloudfront", "credentials": { "accessKeyId": "...", ... } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "vendor", content = "credentials", rename_all = "lowercase")]
pub enum VendorCredentials {
    /// AWS CloudFront: access key pair plus signing region.
    #[cfg(feature = "cloudfront")]
    #[serde(rename_all = "camelCase")]
    Cloudfront {
        access_key_id: String,
        secret_access_key: String,
        region: String,
    },
}

impl VendorCredentials {
    /// The vendor these credentials belong to.
    #[must_use]
    pub fn vendor_type(&self) -> VendorType {
        match self {
            #[cfg(feature = "cloudfront")]
            Self::Cloudfront { .. } => VendorType::Cloudfront,
        }
    }

    /// Builds credentials from a flat string map, as stored by callers.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing
    /// or empty.
    pub fn from_map(
        vendor: VendorType,
        map: &HashMap<String, String>,
    ) -> std::result::Result<Self, CredentialValidationError> {
        match vendor {
            #[cfg(feature = "cloudfront")]
            VendorType::Cloudfront => Ok(Self::Cloudfront {
                access_key_id: get_required_field(map, "accessKeyId")?,
                secret_access_key: get_required_field(map, "secretAccessKey")?,
                region: get_required_field(map, "region")?,
            }),
            #[allow(unreachable_patterns)]
            _ => Err(CredentialValidationError::InvalidFormat(format!(
                "Vendor {vendor} is not enabled"
            ))),
        }
    }

    /// Flattens the credentials back into a string map.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        match self {
            #[cfg(feature = "cloudfront")]
            Self::Cloudfront {
                access_key_id,
                secret_access_key,
                region,
            } => HashMap::from([
                ("accessKeyId".to_string(), access_key_id.clone()),
                ("secretAccessKey".to_string(), secret_access_key.clone()),
                ("region".to_string(), region.clone()),
            ]),
        }
    }
}

/// Input widget type for a credential field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked secret input.
    Password,
}

/// Describes one credential field a vendor requires.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorCredentialField {
    /// Key used in the flat credential map.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Input widget type.
    pub field_type: FieldType,
    /// Whether the field must be provided.
    pub required: bool,
}

/// Capabilities a vendor supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorFeatures {
    /// Whether the vendor offers managed cache policies by name.
    pub managed_cache_policies: bool,
    /// Whether the vendor supports edge-coverage price classes.
    pub price_classes: bool,
}

/// Vendor operational limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorLimits {
    /// Maximum page size when listing distributions.
    pub max_list_page_size: u32,
}

/// Static vendor description, for dynamic UIs and capability discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorMetadata {
    /// Vendor type.
    pub vendor_type: VendorType,
    /// Human-readable vendor name.
    pub display_name: &'static str,
    /// Credential fields the vendor requires.
    pub credential_fields: Vec<VendorCredentialField>,
    /// Supported capabilities.
    pub features: VendorFeatures,
    /// Operational limits.
    pub limits: VendorLimits,
}
