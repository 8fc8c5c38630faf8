//! Distribution config mapper.
//!
//! Translates the vendor-neutral request/option types into CloudFront's
//! `DistributionConfig` document: applies defaults, normalizes operator
//! input, and enforces the cache-mode exclusivity rule (managed policy XOR
//! legacy TTLs).

use super::CLOUDFRONT_SERVICE;
use super::types::{
    AllowedMethods, CachedMethods, Cookies, CustomOriginConfig, DefaultCacheBehavior,
    DistributionConfig, ForwardedValues, Origin, Origins, QuantityList, S3OriginConfig,
    TrustedSigners, ViewerCertificate,
};
use crate::error::{Result, VendorError};
use crate::types::{CreateDistributionRequest, OriginKind, UpdateDistributionOptions};
use crate::vendors::common::{parse_http_method, parse_http_version, parse_price_class};

/// Managed cache policy name -> CloudFront policy id.
const CACHE_POLICY_IDS: &[(&str, &str)] = &[
    ("CachingOptimized", "658327ea-f89d-4fab-a63d-7e88639e58f6"),
    ("CachingDisabled", "4135ea2d-6df8-44a3-9df3-4b5a84be39ad"),
    (
        "CachingOptimizedForUncompressedObjects",
        "b2884449-e4de-46a7-ac36-70bc7f1ddd6d",
    ),
    (
        "Elemental-MediaPackage",
        "08627262-05a9-4f76-9ded-b50ca2e3a84f",
    ),
    ("Amplify", "2e54312d-136d-493c-8eb9-b001f22f67d2"),
];

pub const DEFAULT_TTL: u64 = 3600;
pub const DEFAULT_MIN_TTL: u64 = 60;
pub const DEFAULT_MAX_TTL: u64 = 86400;
const DEFAULT_METHODS: &[&str] = &["GET", "HEAD"];
const DEFAULT_VERSIONS: &[&str] = &["http2", "http3"];
const DEFAULT_PRICE_CLASS: &str = "PriceClass_All";
const CALLER_REFERENCE_LEN: usize = 14;

/// Looks up the id of a managed cache policy by name.
fn cache_policy_id(name: &str) -> Option<&'static str> {
    CACHE_POLICY_IDS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, id)| *id)
}

fn unknown_cache_policy(name: &str) -> VendorError {
    VendorError::InvalidParameter {
        vendor: CLOUDFRONT_SERVICE.to_string(),
        param: "cache_policy".to_string(),
        detail: format!("unknown managed cache policy '{name}'"),
    }
}

/// Generates a fresh caller reference: 14 alphanumeric characters.
///
/// CloudFront uses it for create idempotency; here it only needs to avoid
/// collisions between creates, so uuid-derived randomness is enough.
pub fn caller_reference() -> String {
    let mut reference = uuid::Uuid::new_v4().simple().to_string();
    reference.truncate(CALLER_REFERENCE_LEN);
    reference
}

fn normalize_methods(raw: Option<&Vec<String>>) -> Result<Vec<String>> {
    match raw {
        Some(methods) => methods
            .iter()
            .map(|m| parse_http_method(CLOUDFRONT_SERVICE, m))
            .collect(),
        None => Ok(DEFAULT_METHODS.iter().map(|m| (*m).to_string()).collect()),
    }
}

fn normalize_versions(raw: Option<&Vec<String>>) -> Result<Vec<String>> {
    match raw {
        Some(versions) => versions
            .iter()
            .map(|v| parse_http_version(CLOUDFRONT_SERVICE, v))
            .collect(),
        None => Ok(DEFAULT_VERSIONS.iter().map(|v| (*v).to_string()).collect()),
    }
}

fn default_forwarded_values() -> ForwardedValues {
    ForwardedValues {
        query_string: false,
        cookies: Cookies {
            forward: "none".to_string(),
        },
        headers: QuantityList { quantity: 0 },
        query_string_cache_keys: QuantityList { quantity: 0 },
    }
}

fn build_allowed_methods(methods: Vec<String>) -> AllowedMethods {
    // The edge only caches GET/HEAD (and OPTIONS); write methods are
    // passed through to the origin, never cached
    let mut cached: Vec<String> = vec!["GET".to_string(), "HEAD".to_string()];
    if methods.iter().any(|m| m == "OPTIONS") {
        cached.push("OPTIONS".to_string());
    }
    AllowedMethods {
        quantity: u32::try_from(methods.len()).unwrap_or(u32::MAX),
        cached_methods: CachedMethods {
            quantity: u32::try_from(cached.len()).unwrap_or(u32::MAX),
            items: cached,
        },
        items: methods,
    }
}

/// Builds the create-time config from a vendor-neutral request.
///
/// # Errors
///
/// Returns [`VendorError::InvalidParameter`] for unknown HTTP methods,
/// versions, price classes, or cache policy names.
pub fn build_create_config(request: &CreateDistributionRequest) -> Result<DistributionConfig> {
    let opts = &request.options;

    let methods = normalize_methods(opts.allowed_methods.as_ref())?;
    let versions = normalize_versions(opts.supported_http_versions.as_ref())?;
    // The first supported version becomes the active one
    let http_version = versions
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_VERSIONS[0].to_string());
    let price_class = match &opts.price_class {
        Some(pc) => parse_price_class(CLOUDFRONT_SERVICE, pc)?,
        None => DEFAULT_PRICE_CLASS.to_string(),
    };

    let origin = match request.origin_kind {
        OriginKind::S3 => Origin {
            id: request.origin_name.clone(),
            domain_name: request.origin_domain.clone(),
            origin_path: None,
            s3_origin_config: Some(S3OriginConfig {
                origin_access_identity: String::new(),
            }),
            custom_origin_config: None,
        },
        OriginKind::Custom => Origin {
            id: request.origin_name.clone(),
            domain_name: request.origin_domain.clone(),
            origin_path: None,
            s3_origin_config: None,
            custom_origin_config: Some(CustomOriginConfig {
                http_port: 80,
                https_port: 443,
                origin_protocol_policy: "https-only".to_string(),
            }),
        },
    };

    let mut behavior = DefaultCacheBehavior {
        target_origin_id: request.origin_name.clone(),
        trusted_signers: TrustedSigners {
            enabled: false,
            quantity: 0,
        },
        viewer_protocol_policy: "redirect-to-https".to_string(),
        allowed_methods: build_allowed_methods(methods),
        cache_policy_id: None,
        default_ttl: None,
        min_ttl: None,
        max_ttl: None,
        forwarded_values: None,
    };

    // Cache mode: managed policy XOR explicit TTLs, never both
    if let Some(policy_name) = &opts.cache_policy {
        let id = cache_policy_id(policy_name).ok_or_else(|| unknown_cache_policy(policy_name))?;
        behavior.cache_policy_id = Some(id.to_string());
    } else {
        behavior.default_ttl = Some(opts.default_ttl.unwrap_or(DEFAULT_TTL));
        behavior.min_ttl = Some(opts.min_ttl.unwrap_or(DEFAULT_MIN_TTL));
        behavior.max_ttl = Some(opts.max_ttl.unwrap_or(DEFAULT_MAX_TTL));
        behavior.forwarded_values = Some(default_forwarded_values());
    }

    Ok(DistributionConfig {
        caller_reference: caller_reference(),
        comment: format!("CDN Creation for {}", request.origin_domain),
        enabled: true,
        price_class,
        http_version,
        origins: Origins {
            quantity: 1,
            items: vec![origin],
        },
        default_cache_behavior: behavior,
        viewer_certificate: ViewerCertificate {
            cloud_front_default_certificate: true,
        },
    })
}

/// Merges partial update options into an existing config in place.
///
/// Unset options leave the corresponding field untouched, so an empty
/// options value is the identity. Only the first origin is updated; this
/// adapter manages single-origin distributions.
///
/// Cache-mode transitions are enforced in both directions: setting a policy
/// removes the TTL fields and forwarding rules, setting any TTL removes the
/// policy reference and restores legacy fields.
pub fn apply_update(
    config: &mut DistributionConfig,
    options: &UpdateDistributionOptions,
) -> Result<()> {
    if let Some(domain) = &options.origin_domain {
        if let Some(origin) = config.origins.items.first_mut() {
            origin.domain_name = domain.clone();
        }
    }
    if let Some(path) = &options.origin_path {
        if let Some(origin) = config.origins.items.first_mut() {
            origin.origin_path = Some(path.clone());
        }
    }

    if let Some(methods) = &options.allowed_methods {
        let normalized = methods
            .iter()
            .map(|m| parse_http_method(CLOUDFRONT_SERVICE, m))
            .collect::<Result<Vec<_>>>()?;
        config.default_cache_behavior.allowed_methods = build_allowed_methods(normalized);
    }

    if let Some(versions) = &options.supported_http_versions {
        let normalized = versions
            .iter()
            .map(|v| parse_http_version(CLOUDFRONT_SERVICE, v))
            .collect::<Result<Vec<_>>>()?;
        if let Some(active) = normalized.first() {
            config.http_version.clone_from(active);
        }
    }

    if let Some(pc) = &options.price_class {
        config.price_class = parse_price_class(CLOUDFRONT_SERVICE, pc)?;
    }

    let behavior = &mut config.default_cache_behavior;
    if let Some(policy_name) = &options.cache_policy {
        let id = cache_policy_id(policy_name).ok_or_else(|| unknown_cache_policy(policy_name))?;
        // Switching to managed-policy caching: legacy fields must go
        behavior.cache_policy_id = Some(id.to_string());
        behavior.default_ttl = None;
        behavior.min_ttl = None;
        behavior.max_ttl = None;
        behavior.forwarded_values = None;
    } else if options.default_ttl.is_some()
        || options.min_ttl.is_some()
        || options.max_ttl.is_some()
    {
        // Switching to (or staying in) legacy TTL caching: policy must go
        behavior.cache_policy_id = None;
        behavior.default_ttl = Some(
            options
                .default_ttl
                .or(behavior.default_ttl)
                .unwrap_or(DEFAULT_TTL),
        );
        behavior.min_ttl = Some(options.min_ttl.or(behavior.min_ttl).unwrap_or(DEFAULT_MIN_TTL));
        behavior.max_ttl = Some(options.max_ttl.or(behavior.max_ttl).unwrap_or(DEFAULT_MAX_TTL));
        if behavior.forwarded_values.is_none() {
            behavior.forwarded_values = Some(default_forwarded_values());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DistributionOptions;

    fn s3_request() -> CreateDistributionRequest {
        CreateDistributionRequest {
            origin_kind: OriginKind::S3,
            origin_name: "cdn.example.net".to_string(),
            origin_domain: "bucket.s3.amazonaws.com".to_string(),
            options: DistributionOptions::default(),
        }
    }

    fn custom_request() -> CreateDistributionRequest {
        CreateDistributionRequest {
            origin_kind: OriginKind::Custom,
            origin_name: "cdn.example.net".to_string(),
            origin_domain: "origin.example.net".to_string(),
            options: DistributionOptions::default(),
        }
    }

    #[test]
    fn s3_create_defaults() {
        let config = build_create_config(&s3_request()).unwrap();
        assert!(config.enabled);
        assert_eq!(config.price_class, "PriceClass_All");
        assert_eq!(config.http_version, "http2");
        assert_eq!(config.comment, "CDN Creation for bucket.s3.amazonaws.com");
        assert_eq!(config.origins.quantity, 1);

        let origin = &config.origins.items[0];
        assert!(origin.s3_origin_config.is_some());
        assert!(origin.custom_origin_config.is_none());

        let behavior = &config.default_cache_behavior;
        assert_eq!(behavior.allowed_methods.items, vec!["GET", "HEAD"]);
        assert_eq!(behavior.default_ttl, Some(3600));
        assert_eq!(behavior.min_ttl, Some(60));
        assert_eq!(behavior.max_ttl, Some(86400));
        assert!(behavior.cache_policy_id.is_none());
        let fv = behavior.forwarded_values.as_ref().unwrap();
        assert!(!fv.query_string);
        assert_eq!(fv.cookies.forward, "none");
    }

    #[test]
    fn custom_create_origin_block() {
        let config = build_create_config(&custom_request()).unwrap();
        let origin = &config.origins.items[0];
        assert!(origin.s3_origin_config.is_none());
        let custom = origin.custom_origin_config.as_ref().unwrap();
        assert_eq!(custom.http_port, 80);
        assert_eq!(custom.https_port, 443);
        assert_eq!(custom.origin_protocol_policy, "https-only");
    }

    #[test]
    fn create_with_cache_policy_has_no_ttls() {
        let mut request = s3_request();
        request.options.cache_policy = Some("CachingOptimized".to_string());
        let config = build_create_config(&request).unwrap();
        let behavior = &config.default_cache_behavior;
        assert_eq!(
            behavior.cache_policy_id.as_deref(),
            Some("658327ea-f89d-4fab-a63d-7e88639e58f6")
        );
        assert!(behavior.default_ttl.is_none());
        assert!(behavior.min_ttl.is_none());
        assert!(behavior.max_ttl.is_none());
        assert!(behavior.forwarded_values.is_none());
    }

    #[test]
    fn create_unknown_cache_policy_rejected() {
        let mut request = s3_request();
        request.options.cache_policy = Some("SuperFastCaching".to_string());
        let err = build_create_config(&request).unwrap_err();
        assert!(matches!(
            err,
            VendorError::InvalidParameter { param, .. } if param == "cache_policy"
        ));
    }

    #[test]
    fn create_unknown_method_rejected() {
        let mut request = s3_request();
        request.options.allowed_methods = Some(vec!["GET".to_string(), "FETCH".to_string()]);
        let err = build_create_config(&request).unwrap_err();
        assert!(matches!(
            err,
            VendorError::InvalidParameter { param, .. } if param == "allowed_methods"
        ));
    }

    #[test]
    fn create_normalizes_casing() {
        let mut request = s3_request();
        request.options.allowed_methods = Some(vec!["get".to_string(), "head".to_string()]);
        request.options.supported_http_versions =
            Some(vec!["HTTP3".to_string(), "HTTP2".to_string()]);
        let config = build_create_config(&request).unwrap();
        assert_eq!(
            config.default_cache_behavior.allowed_methods.items,
            vec!["GET", "HEAD"]
        );
        // First listed version becomes the active one
        assert_eq!(config.http_version, "http3");
    }

    #[test]
    fn cached_methods_stay_read_only() {
        let mut request = s3_request();
        request.options.allowed_methods = Some(
            ["GET", "HEAD", "OPTIONS", "PUT", "POST", "PATCH", "DELETE"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        );
        let config = build_create_config(&request).unwrap();
        let methods = &config.default_cache_behavior.allowed_methods;
        assert_eq!(methods.quantity, 7);
        // Write methods are allowed through but never cached
        assert_eq!(methods.cached_methods.items, vec!["GET", "HEAD", "OPTIONS"]);
        assert_eq!(methods.cached_methods.quantity, 3);
    }

    #[test]
    fn cached_methods_without_options() {
        let mut request = s3_request();
        request.options.allowed_methods =
            Some(vec!["GET".to_string(), "HEAD".to_string(), "POST".to_string()]);
        let config = build_create_config(&request).unwrap();
        let methods = &config.default_cache_behavior.allowed_methods;
        assert_eq!(methods.items, vec!["GET", "HEAD", "POST"]);
        assert_eq!(methods.cached_methods.items, vec!["GET", "HEAD"]);
    }

    #[test]
    fn comment_names_origin_domain() {
        let config = build_create_config(&custom_request()).unwrap();
        assert_eq!(config.comment, "CDN Creation for origin.example.net");
    }

    #[test]
    fn create_explicit_ttls_kept() {
        let mut request = s3_request();
        request.options.default_ttl = Some(600);
        request.options.max_ttl = Some(1200);
        let config = build_create_config(&request).unwrap();
        let behavior = &config.default_cache_behavior;
        assert_eq!(behavior.default_ttl, Some(600));
        assert_eq!(behavior.min_ttl, Some(60));
        assert_eq!(behavior.max_ttl, Some(1200));
    }

    #[test]
    fn caller_reference_shape() {
        let a = caller_reference();
        let b = caller_reference();
        assert_eq!(a.len(), 14);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn each_create_gets_fresh_caller_reference() {
        let a = build_create_config(&s3_request()).unwrap();
        let b = build_create_config(&s3_request()).unwrap();
        assert_ne!(a.caller_reference, b.caller_reference);
    }

    #[test]
    fn empty_update_is_identity() {
        let mut config = build_create_config(&s3_request()).unwrap();
        let before = config.clone();
        apply_update(&mut config, &UpdateDistributionOptions::default()).unwrap();
        assert_eq!(config, before);
    }

    #[test]
    fn update_origin_domain_and_path() {
        let mut config = build_create_config(&custom_request()).unwrap();
        let options = UpdateDistributionOptions {
            origin_domain: Some("origin2.example.net".to_string()),
            origin_path: Some("/static".to_string()),
            ..Default::default()
        };
        apply_update(&mut config, &options).unwrap();
        assert_eq!(config.origins.items[0].domain_name, "origin2.example.net");
        assert_eq!(config.origins.items[0].origin_path.as_deref(), Some("/static"));
    }

    #[test]
    fn update_ttl_to_policy_strips_legacy_fields() {
        let mut config = build_create_config(&s3_request()).unwrap();
        let options = UpdateDistributionOptions {
            cache_policy: Some("CachingDisabled".to_string()),
            ..Default::default()
        };
        apply_update(&mut config, &options).unwrap();
        let behavior = &config.default_cache_behavior;
        assert_eq!(
            behavior.cache_policy_id.as_deref(),
            Some("4135ea2d-6df8-44a3-9df3-4b5a84be39ad")
        );
        assert!(behavior.default_ttl.is_none());
        assert!(behavior.min_ttl.is_none());
        assert!(behavior.max_ttl.is_none());
        assert!(behavior.forwarded_values.is_none());
    }

    #[test]
    fn update_policy_to_ttl_strips_policy() {
        let mut request = s3_request();
        request.options.cache_policy = Some("CachingOptimized".to_string());
        let mut config = build_create_config(&request).unwrap();

        let options = UpdateDistributionOptions {
            default_ttl: Some(7200),
            ..Default::default()
        };
        apply_update(&mut config, &options).unwrap();
        let behavior = &config.default_cache_behavior;
        assert!(behavior.cache_policy_id.is_none());
        assert_eq!(behavior.default_ttl, Some(7200));
        // Unspecified TTLs fall back to defaults since the policy had none
        assert_eq!(behavior.min_ttl, Some(60));
        assert_eq!(behavior.max_ttl, Some(86400));
        assert!(behavior.forwarded_values.is_some());
    }

    #[test]
    fn partial_ttl_update_preserves_existing_values() {
        let mut request = s3_request();
        request.options.default_ttl = Some(600);
        request.options.min_ttl = Some(30);
        request.options.max_ttl = Some(1200);
        let mut config = build_create_config(&request).unwrap();

        let options = UpdateDistributionOptions {
            max_ttl: Some(2400),
            ..Default::default()
        };
        apply_update(&mut config, &options).unwrap();
        let behavior = &config.default_cache_behavior;
        assert_eq!(behavior.default_ttl, Some(600));
        assert_eq!(behavior.min_ttl, Some(30));
        assert_eq!(behavior.max_ttl, Some(2400));
    }

    #[test]
    fn update_unknown_price_class_rejected() {
        let mut config = build_create_config(&s3_request()).unwrap();
        let options = UpdateDistributionOptions {
            price_class: Some("PriceClass_999".to_string()),
            ..Default::default()
        };
        let err = apply_update(&mut config, &options).unwrap_err();
        assert!(matches!(
            err,
            VendorError::InvalidParameter { param, .. } if param == "price_class"
        ));
    }
}
