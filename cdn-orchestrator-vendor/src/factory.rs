//! Vendor factory.
//!
//! Resolves vendor names and credentials to trait objects, so callers depend
//! only on [`CdnVendor`] and never name a concrete adapter type.

use crate::error::{Result, VendorError};
use crate::traits::CdnVendor;
use crate::types::{VendorCredentials, VendorMetadata, VendorType};
use std::collections::HashMap;
use std::sync::Arc;

/// Creates a vendor adapter from typed credentials.
pub fn create_vendor(credentials: VendorCredentials) -> Result<Arc<dyn CdnVendor>> {
    match credentials {
        #[cfg(feature = "cloudfront")]
        VendorCredentials::Cloudfront {
            access_key_id,
            secret_access_key,
            region,
        } => Ok(Arc::new(
            crate::vendors::cloudfront::CloudfrontVendor::new(
                access_key_id,
                secret_access_key,
                region,
            ),
        )),
    }
}

/// Resolves a vendor by name (case-insensitive) and builds it from a flat
/// credential map.
///
/// # Errors
///
/// - [`VendorError::UnknownVendor`] if the name does not match any
///   compiled-in vendor.
/// - [`VendorError::InvalidParameter`] if the credential map is missing or
///   has empty required fields.
pub fn resolve_vendor(
    name: &str,
    credentials: &HashMap<String, String>,
) -> Result<Arc<dyn CdnVendor>> {
    let vendor_type = VendorType::from_name(name)?;
    let creds = VendorCredentials::from_map(vendor_type, credentials).map_err(|e| {
        VendorError::InvalidParameter {
            vendor: vendor_type.to_string(),
            param: "credentials".to_string(),
            detail: e.to_string(),
        }
    })?;
    create_vendor(creds)
}

/// Metadata for every compiled-in vendor, for capability discovery.
#[must_use]
pub fn get_all_vendor_metadata() -> Vec<VendorMetadata> {
    vec![
        #[cfg(feature = "cloudfront")]
        crate::vendors::cloudfront::CloudfrontVendor::metadata(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "cloudfront")]
    fn cloudfront_creds() -> HashMap<String, String> {
        HashMap::from([
            ("accessKeyId".to_string(), "AKIAEXAMPLE".to_string()),
            ("secretAccessKey".to_string(), "secret".to_string()),
            ("region".to_string(), "us-east-1".to_string()),
        ])
    }

    #[test]
    #[cfg(feature = "cloudfront")]
    fn resolve_known_vendor_case_insensitive() {
        for name in ["cloudfront", "CloudFront", "CLOUDFRONT"] {
            let vendor = resolve_vendor(name, &cloudfront_creds()).unwrap();
            assert_eq!(vendor.id(), "cloudfront");
        }
    }

    #[test]
    fn resolve_unknown_vendor() {
        let err = resolve_vendor("fastly", &HashMap::new()).err().unwrap();
        assert!(matches!(err, VendorError::UnknownVendor { name } if name == "fastly"));
    }

    #[test]
    #[cfg(feature = "cloudfront")]
    fn resolve_missing_credentials() {
        let err = resolve_vendor("cloudfront", &HashMap::new()).err().unwrap();
        assert!(matches!(
            err,
            VendorError::InvalidParameter { param, .. } if param == "credentials"
        ));
    }

    #[test]
    fn all_metadata_nonempty() {
        let metadata = get_all_vendor_metadata();
        assert!(!metadata.is_empty());
        for m in &metadata {
            assert!(!m.credential_fields.is_empty());
        }
    }
}
