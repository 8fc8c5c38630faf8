//! CloudFront distribution lifecycle operations.
//!
//! Implements [`CdnVendor`] over the signed HTTP layer. Every mutating
//! operation follows the same shape: resolve the domain to a distribution
//! id, fetch the current config with its `ETag` token, check or edit the
//! config locally, and write back conditionally. State guards run before
//! any write is built, so no-ops and refusals never touch the wire.

use super::config::{apply_update, build_create_config};
use super::error::CloudfrontErrorMapper;
use super::types::{
    DistributionConfig, DistributionResponse, DistributionSummaryWire, DistributionWire,
    GetDistributionConfigResponse, ListDistributionsResponse,
};
use super::{CLOUDFRONT_API_VERSION, CloudfrontVendor, MAX_LIST_ITEMS};
use crate::error::{Result, VendorError};
use crate::traits::{CdnVendor, ErrorContext, VendorErrorMapper};
use crate::types::{
    CreateDistributionRequest, Distribution, DistributionStatus, FieldType, TransitionOutcome,
    UpdateDistributionOptions, VendorCredentialField, VendorFeatures, VendorLimits, VendorMetadata,
    VendorType,
};
use crate::utils::log_sanitizer::mask_key_id;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

fn parse_status(status: &str) -> DistributionStatus {
    match status {
        "Deployed" => DistributionStatus::Deployed,
        "InProgress" => DistributionStatus::InProgress,
        _ => DistributionStatus::Unknown,
    }
}

fn parse_last_modified(raw: Option<&String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Flips the enabled flag toward `target_enabled`. Returns `AlreadyInState`
/// without touching the config when no change is needed, so the caller can
/// skip the write entirely.
fn transition(config: &mut DistributionConfig, target_enabled: bool) -> TransitionOutcome {
    if config.enabled == target_enabled {
        TransitionOutcome::AlreadyInState
    } else {
        config.enabled = target_enabled;
        TransitionOutcome::Applied
    }
}

/// Delete guard: an enabled distribution must be disabled first.
fn ensure_deletable(config: &DistributionConfig, domain: &str) -> Result<()> {
    if config.enabled {
        return Err(VendorError::PreconditionFailed {
            vendor: CloudfrontErrorMapper::vendor_name().to_string(),
            detail: format!("distribution for '{domain}' is enabled, disable it before deleting"),
            raw_message: None,
        });
    }
    Ok(())
}

impl CloudfrontVendor {
    fn distribution_path(id: &str) -> String {
        format!("/{CLOUDFRONT_API_VERSION}/distribution/{id}")
    }

    fn config_path(id: &str) -> String {
        format!("/{CLOUDFRONT_API_VERSION}/distribution/{id}/config")
    }

    fn serialize_config(config: &DistributionConfig) -> Result<String> {
        serde_json::to_string(config).map_err(|e| VendorError::SerializationError {
            vendor: CloudfrontErrorMapper::vendor_name().to_string(),
            detail: e.to_string(),
        })
    }

    fn from_summary(summary: DistributionSummaryWire) -> Distribution {
        Distribution {
            id: summary.id,
            domain_name: summary.domain_name,
            vendor: VendorType::Cloudfront,
            enabled: summary.enabled,
            status: parse_status(&summary.status),
            comment: summary.comment,
            last_modified: parse_last_modified(summary.last_modified_time.as_ref()),
        }
    }

    fn from_wire(wire: DistributionWire) -> Distribution {
        let enabled = wire
            .distribution_config
            .as_ref()
            .is_some_and(|c| c.enabled);
        Distribution {
            id: wire.id,
            domain_name: wire.domain_name,
            vendor: VendorType::Cloudfront,
            enabled,
            status: parse_status(&wire.status),
            comment: wire.distribution_config.map(|c| c.comment),
            last_modified: parse_last_modified(wire.last_modified_time.as_ref()),
        }
    }

    /// Lists every distribution summary, following pagination markers.
    async fn list_all_summaries(&self) -> Result<Vec<DistributionSummaryWire>> {
        let path = format!("/{CLOUDFRONT_API_VERSION}/distribution");
        let ctx = ErrorContext::default();
        let mut summaries = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut query = vec![("MaxItems".to_string(), MAX_LIST_ITEMS.to_string())];
            if let Some(m) = &marker {
                query.push(("Marker".to_string(), m.clone()));
            }
            let response: ListDistributionsResponse = self.get_json(&path, &query, &ctx).await?;
            let list = response.distribution_list;
            summaries.extend(list.items);
            if list.is_truncated {
                match list.next_marker {
                    Some(next) => marker = Some(next),
                    None => {
                        return Err(CloudfrontErrorMapper::parse_error(
                            "truncated list response without NextMarker",
                        ));
                    }
                }
            } else {
                return Ok(summaries);
            }
        }
    }

    /// Fetches the config document and its concurrency token for a
    /// distribution id.
    async fn get_config(
        &self,
        id: &str,
        domain: &str,
    ) -> Result<(DistributionConfig, String)> {
        let ctx = ErrorContext {
            domain: Some(domain.to_string()),
            distribution_id: Some(id.to_string()),
        };
        let (response, etag): (GetDistributionConfigResponse, String) =
            self.get_with_etag(&Self::config_path(id), &ctx).await?;
        Ok((response.distribution_config, etag))
    }

    /// Writes a config back under `If-Match` and returns the updated
    /// distribution.
    async fn put_config(
        &self,
        id: &str,
        domain: &str,
        config: &DistributionConfig,
        etag: &str,
    ) -> Result<Distribution> {
        let ctx = ErrorContext {
            domain: Some(domain.to_string()),
            distribution_id: Some(id.to_string()),
        };
        let payload = Self::serialize_config(config)?;
        let response: DistributionResponse = self
            .put_json(&Self::config_path(id), &payload, etag, &ctx)
            .await?;
        Ok(Self::from_wire(response.distribution))
    }

    async fn set_enabled_by_domain(
        &self,
        domain: &str,
        target_enabled: bool,
    ) -> Result<TransitionOutcome> {
        let id = self.resolve_distribution_id(domain).await?;
        let (mut config, etag) = self.get_config(&id, domain).await?;

        let outcome = transition(&mut config, target_enabled);
        if outcome == TransitionOutcome::AlreadyInState {
            log::debug!(
                "[cloudfront] Distribution {id} already {}, skipping write",
                if target_enabled { "enabled" } else { "disabled" }
            );
            return Ok(outcome);
        }

        self.put_config(&id, domain, &config, &etag).await?;
        log::info!(
            "[cloudfront] Distribution {id} {}",
            if target_enabled { "enabled" } else { "disabled" }
        );
        Ok(outcome)
    }
}

#[async_trait]
impl CdnVendor for CloudfrontVendor {
    fn id(&self) -> &'static str {
        CloudfrontErrorMapper::vendor_name()
    }

    fn metadata() -> VendorMetadata {
        VendorMetadata {
            vendor_type: VendorType::Cloudfront,
            display_name: "AWS CloudFront",
            credential_fields: vec![
                VendorCredentialField {
                    name: "accessKeyId",
                    label: "Access Key ID",
                    field_type: FieldType::Text,
                    required: true,
                },
                VendorCredentialField {
                    name: "secretAccessKey",
                    label: "Secret Access Key",
                    field_type: FieldType::Password,
                    required: true,
                },
                VendorCredentialField {
                    name: "region",
                    label: "Region",
                    field_type: FieldType::Text,
                    required: true,
                },
            ],
            features: VendorFeatures {
                managed_cache_policies: true,
                price_classes: true,
            },
            limits: VendorLimits {
                max_list_page_size: MAX_LIST_ITEMS,
            },
        }
    }

    async fn validate_credentials(&self) -> Result<bool> {
        let path = format!("/{CLOUDFRONT_API_VERSION}/distribution");
        let query = [("MaxItems".to_string(), "1".to_string())];
        let result: Result<ListDistributionsResponse> = self
            .get_json(&path, &query, &ErrorContext::default())
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(VendorError::InvalidCredentials { .. } | VendorError::PermissionDenied { .. }) => {
                log::warn!(
                    "[cloudfront] Credential validation failed for key {}",
                    mask_key_id(&self.access_key_id)
                );
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn create_distribution(
        &self,
        request: &CreateDistributionRequest,
    ) -> Result<Distribution> {
        let config = build_create_config(request)?;
        let payload = Self::serialize_config(&config)?;
        let path = format!("/{CLOUDFRONT_API_VERSION}/distribution");
        let ctx = ErrorContext::for_domain(&request.origin_name);
        let response: DistributionResponse = self.post_json(&path, &payload, &ctx).await?;
        let distribution = Self::from_wire(response.distribution);
        log::info!(
            "[cloudfront] Created distribution {} for origin {}",
            distribution.id,
            request.origin_name
        );
        Ok(distribution)
    }

    async fn resolve_distribution_id(&self, domain: &str) -> Result<String> {
        // Linear scan over the full list; fine at typical account sizes but
        // O(n) in the number of distributions.
        let summaries = self.list_all_summaries().await?;
        summaries
            .into_iter()
            .find(|s| s.domain_name == domain)
            .map(|s| s.id)
            .ok_or_else(|| VendorError::DistributionNotFound {
                vendor: CloudfrontErrorMapper::vendor_name().to_string(),
                domain: domain.to_string(),
                raw_message: None,
            })
    }

    async fn list_distributions(&self) -> Result<Vec<Distribution>> {
        let summaries = self.list_all_summaries().await?;
        Ok(summaries.into_iter().map(Self::from_summary).collect())
    }

    async fn distribution_details_by_domain(&self, domain: &str) -> Result<Option<Distribution>> {
        let summaries = self.list_all_summaries().await?;
        Ok(summaries
            .into_iter()
            .find(|s| s.domain_name == domain)
            .map(Self::from_summary))
    }

    async fn enable_by_domain(&self, domain: &str) -> Result<TransitionOutcome> {
        self.set_enabled_by_domain(domain, true).await
    }

    async fn disable_by_domain(&self, domain: &str) -> Result<TransitionOutcome> {
        self.set_enabled_by_domain(domain, false).await
    }

    async fn delete_by_domain(&self, domain: &str) -> Result<()> {
        let id = self.resolve_distribution_id(domain).await?;
        let (config, etag) = self.get_config(&id, domain).await?;
        ensure_deletable(&config, domain)?;

        let ctx = ErrorContext {
            domain: Some(domain.to_string()),
            distribution_id: Some(id.clone()),
        };
        self.delete_with_match(&Self::distribution_path(&id), &etag, &ctx)
            .await?;
        log::info!("[cloudfront] Deleted distribution {id}");
        Ok(())
    }

    async fn update_by_domain(
        &self,
        domain: &str,
        options: &UpdateDistributionOptions,
    ) -> Result<Distribution> {
        let id = self.resolve_distribution_id(domain).await?;
        let (mut config, etag) = self.get_config(&id, domain).await?;
        apply_update(&mut config, options)?;
        let distribution = self.put_config(&id, domain, &config, &etag).await?;
        log::info!("[cloudfront] Updated distribution {id}");
        Ok(distribution)
    }
}
