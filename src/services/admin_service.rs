use serde::Serialize;
use std::sync::Arc;

use super::{LookupError, RegionResolver};
use crate::clients::VendorApiClient;
use crate::database::queries;
use crate::database::RowExt;
use crate::types::{DbKind, Region};

/// Billing configuration that keeps an account in trial
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialTarget {
    pub region: Region,
    pub tenant_id: String,
    pub configuration_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialRemoval {
    pub vendor_id: String,
    pub region: Region,
    pub tenant_id: String,
    pub configuration_id: String,
    pub status_code: u16,
    pub success: bool,
}

/// Result of toggling white-label mode on one environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhiteLabelOutcome {
    pub vendor_id: String,
    pub region: Region,
    pub status_code: Option<u16>,
    pub text: Option<String>,
    pub error: Option<String>,
    pub success: bool,
}

/// Administrative mutations against the vendor-management API
#[derive(Clone)]
pub struct AdminService {
    resolver: Arc<RegionResolver>,
    vendor_api: VendorApiClient,
}

impl AdminService {
    pub fn new(resolver: Arc<RegionResolver>, vendor_api: VendorApiClient) -> Self {
        Self { resolver, vendor_api }
    }

    /// vendor -> account (`accountTenantId`) -> tenant configuration
    pub async fn trial_target(&self, vendor_id: &str, region: Option<Region>) -> Result<TrialTarget, LookupError> {
        let vendor = self
            .resolver
            .resolve_one(region, DbKind::General, &queries::vendor_by_id(vendor_id))
            .await?
            .ok_or_else(|| LookupError::not_found(format!("vendor {}", vendor_id)))?;
        let region = vendor.region;

        let account_id = vendor
            .value
            .string("accountId")
            .ok_or_else(|| LookupError::not_found(format!("account of vendor {}", vendor_id)))?;
        let account_tenant_id = self
            .resolver
            .fetch_in(region, DbKind::General, &queries::account_by_id(&account_id))
            .await?
            .and_then(|account| account.string("accountTenantId"))
            .ok_or_else(|| LookupError::not_found(format!("account tenant of account {}", account_id)))?;

        let configuration = self
            .resolver
            .fetch_in(
                region,
                DbKind::General,
                &queries::tenant_configuration_by_tenant_id(&account_tenant_id),
            )
            .await?
            .ok_or_else(|| LookupError::not_found(format!("tenant configuration of {}", account_tenant_id)))?;

        let configuration_id = configuration
            .string("id")
            .ok_or_else(|| LookupError::not_found(format!("tenant configuration of {}", account_tenant_id)))?;
        let tenant_id = configuration.string("tenantId").unwrap_or(account_tenant_id);

        Ok(TrialTarget {
            region,
            tenant_id,
            configuration_id,
        })
    }

    /// Move the account's billing configuration off the trial plan. A non-2xx
    /// answer is reported in the result, not raised.
    pub async fn remove_trial(&self, vendor_id: &str, region: Option<Region>) -> Result<TrialRemoval, LookupError> {
        let target = self.trial_target(vendor_id, region).await?;

        let token = self.vendor_api.authenticate().await?;
        let outcome = self
            .vendor_api
            .update_tenant_configuration(&token, &target.tenant_id, &target.configuration_id)
            .await?;

        if outcome.is_success() {
            tracing::info!("Removed trial for vendor {} (tenant {})", vendor_id, target.tenant_id);
        } else {
            tracing::warn!(
                "Trial removal for vendor {} returned {}: {}",
                vendor_id,
                outcome.status_code,
                outcome.text
            );
        }

        Ok(TrialRemoval {
            vendor_id: vendor_id.to_string(),
            region: target.region,
            tenant_id: target.tenant_id,
            configuration_id: target.configuration_id,
            status_code: outcome.status_code,
            success: outcome.is_success(),
        })
    }

    /// Toggle white-label mode on the vendor, or on every environment of its
    /// account. Authenticates once; each environment gets its own outcome.
    pub async fn set_white_label(
        &self,
        vendor_id: &str,
        enabled: bool,
        all_environments: bool,
        region: Option<Region>,
    ) -> Result<Vec<WhiteLabelOutcome>, LookupError> {
        let vendor = self
            .resolver
            .resolve_one(region, DbKind::General, &queries::vendor_by_id(vendor_id))
            .await?
            .ok_or_else(|| LookupError::not_found(format!("vendor {}", vendor_id)))?;
        let region = vendor.region;

        let environment_ids = if all_environments {
            let account_id = vendor
                .value
                .string("accountId")
                .ok_or_else(|| LookupError::not_found(format!("account of vendor {}", vendor_id)))?;
            self.resolver.environment_ids_by_account_id(&account_id, region).await?
        } else {
            vec![vendor_id.to_string()]
        };

        let token = self.vendor_api.authenticate().await?;

        let mut outcomes = Vec::with_capacity(environment_ids.len());
        for environment_id in environment_ids {
            let outcome = match self
                .vendor_api
                .set_white_label(&token, region, &environment_id, enabled)
                .await
            {
                Ok(put) => WhiteLabelOutcome {
                    vendor_id: environment_id,
                    region,
                    success: put.is_success(),
                    status_code: Some(put.status_code),
                    text: Some(put.text),
                    error: None,
                },
                Err(e) => {
                    tracing::error!("White-label update for {} failed: {}", environment_id, e);
                    WhiteLabelOutcome {
                        vendor_id: environment_id,
                        region,
                        status_code: None,
                        text: None,
                        error: Some(e.to_string()),
                        success: false,
                    }
                }
            };
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
