use serde::Serialize;
use std::sync::Arc;

use super::{Located, LookupError, RegionResolver};
use crate::clients::{ClientError, TicketingClient};
use crate::config::IdentityConfig;
use crate::database::models::{Account, SamlGroup, SsoConfig, Tenant, Vendor};
use crate::database::queries;
use crate::database::{Row, RowExt};
use crate::types::{DbKind, Region};
use crate::validation::{is_valid_email, is_valid_ticket_id};

/// SSO state of one vendor domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainSso {
    pub domain: String,
    pub sso_config_ids: Vec<String>,
    pub sso_configs: Vec<SsoConfig>,
    pub saml_groups: Vec<SamlGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorSsoReport {
    pub vendor_id: String,
    pub region: Region,
    pub vendor: Row,
    pub domains: Vec<DomainSso>,
}

/// Walks the vendor -> account -> tenant -> SSO chain to build snapshots
#[derive(Clone)]
pub struct AccountService {
    resolver: Arc<RegionResolver>,
    identity: IdentityConfig,
    ticketing: TicketingClient,
}

impl AccountService {
    pub fn new(resolver: Arc<RegionResolver>, identity: IdentityConfig, ticketing: TicketingClient) -> Self {
        Self {
            resolver,
            identity,
            ticketing,
        }
    }

    pub async fn account_by_vendor_id(&self, vendor_id: &str, region: Option<Region>) -> Result<Account, LookupError> {
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
        let account = self
            .resolver
            .fetch_in(region, DbKind::General, &queries::account_by_id(&account_id))
            .await?
            .ok_or_else(|| LookupError::not_found(format!("account {}", account_id)))?;

        let vendors = self.vendors_of_account(region, &account_id).await?;
        tracing::info!(
            "Assembled account {} from {} with {} environments",
            account_id,
            region,
            vendors.len()
        );

        Ok(Account::from_row(&account, region, vendors))
    }

    pub async fn account_by_tenant_id(&self, tenant_id: &str, region: Option<Region>) -> Result<Account, LookupError> {
        let tenant = self
            .resolver
            .resolve_one(region, DbKind::General, &queries::tenant_by_id(tenant_id))
            .await?
            .ok_or_else(|| LookupError::not_found(format!("tenant {}", tenant_id)))?;

        let vendor_id = tenant
            .value
            .string("vendorId")
            .ok_or_else(|| LookupError::not_found(format!("vendor of tenant {}", tenant_id)))?;

        self.account_by_vendor_id(&vendor_id, Some(tenant.region)).await
    }

    /// Customer email -> account-tenant id -> account -> first environment
    pub async fn vendor_id_by_email(&self, email: &str, region: Option<Region>) -> Result<Located<String>, LookupError> {
        if !is_valid_email(email) {
            return Err(LookupError::InvalidInput(format!("'{}' is not a valid email", email)));
        }
        let prod_vendor_id = self
            .identity
            .prod_vendor_id
            .as_deref()
            .ok_or(LookupError::ConfigMissing("PROD_VENDOR_ID"))?;

        let user = self
            .resolver
            .resolve_one(region, DbKind::Identity, &queries::user_tenant_by_email(email, prod_vendor_id))
            .await?
            .ok_or_else(|| LookupError::not_found(format!("user {}", email)))?;
        // The identity region pins the rest of the chain
        let region = user.region;

        let account_tenant_id = user
            .value
            .string("tenantId")
            .ok_or_else(|| LookupError::not_found(format!("account tenant of {}", email)))?;
        let account = self
            .resolver
            .fetch_in(region, DbKind::General, &queries::account_by_account_tenant_id(&account_tenant_id))
            .await?
            .ok_or_else(|| LookupError::not_found(format!("account with tenant {}", account_tenant_id)))?;

        let account_id = account
            .string("id")
            .ok_or_else(|| LookupError::not_found(format!("account with tenant {}", account_tenant_id)))?;
        let vendor_id = self
            .resolver
            .fetch_in(region, DbKind::General, &queries::vendors_by_account_id(&account_id))
            .await?
            .and_then(|vendor| vendor.string("id"))
            .ok_or_else(|| LookupError::not_found(format!("environments of account {}", account_id)))?;

        Ok(Located::new(region, vendor_id))
    }

    pub async fn account_by_email(&self, email: &str, region: Option<Region>) -> Result<Account, LookupError> {
        let vendor = self.vendor_id_by_email(email, region).await?;
        self.account_by_vendor_id(&vendor.value, Some(vendor.region)).await
    }

    /// First customer on the ticket whose email resolves to an environment.
    /// A customer whose lookup hit a down region is skipped; if nobody
    /// resolves, those regions are reported instead of a plain miss.
    pub async fn vendor_id_by_ticket(&self, ticket: &str) -> Result<Located<String>, LookupError> {
        if !is_valid_ticket_id(ticket) {
            return Err(LookupError::InvalidInput(format!("'{}' is not a valid ticket number", ticket)));
        }

        let emails = self.ticketing.ticket_emails(ticket).await.map_err(|e| match e {
            ClientError::UnexpectedStatus { status: 404, .. } => LookupError::not_found(format!("ticket {}", ticket)),
            other => LookupError::Client(other),
        })?;

        let mut unavailable: Vec<Region> = Vec::new();
        for email in &emails.customers {
            match self.vendor_id_by_email(email, None).await {
                Ok(found) => return Ok(found),
                Err(LookupError::NotFound(what)) => {
                    tracing::debug!("Ticket {} customer {} did not resolve: {} not found", ticket, email, what);
                }
                Err(LookupError::RegionsUnavailable(regions)) => {
                    tracing::warn!("Ticket {} customer {} lookup incomplete, trying next customer", ticket, email);
                    for region in regions {
                        if !unavailable.contains(&region) {
                            unavailable.push(region);
                        }
                    }
                }
                Err(e) => return Err(e),
            }
        }

        if !unavailable.is_empty() {
            return Err(LookupError::RegionsUnavailable(unavailable));
        }
        Err(LookupError::not_found(format!("account for any customer on ticket {}", ticket)))
    }

    pub async fn account_by_ticket(&self, ticket: &str) -> Result<Account, LookupError> {
        let vendor = self.vendor_id_by_ticket(ticket).await?;
        self.account_by_vendor_id(&vendor.value, Some(vendor.region)).await
    }

    /// Vendor row plus, per SSO domain, the configs and SAML groups it points at
    pub async fn vendor_sso_report(&self, vendor_id: &str) -> Result<VendorSsoReport, LookupError> {
        let vendor = self
            .resolver
            .find_first(DbKind::General, &queries::vendor_by_id(vendor_id))
            .await?
            .ok_or_else(|| LookupError::not_found(format!("vendor {}", vendor_id)))?;
        let region = vendor.region;

        let domain_rows = self
            .resolver
            .fetch_all_in(region, DbKind::General, &queries::sso_domains_by_vendor_id(vendor_id))
            .await?;
        let mut domain_names: Vec<String> = Vec::new();
        for name in domain_rows.iter().filter_map(|row| row.string("domain")) {
            if !domain_names.contains(&name) {
                domain_names.push(name);
            }
        }

        let mut domains = Vec::with_capacity(domain_names.len());
        for domain in domain_names {
            let rows = self
                .resolver
                .fetch_all_in(
                    region,
                    DbKind::General,
                    &queries::sso_domains_by_vendor_and_domain(vendor_id, &domain),
                )
                .await?;
            let sso_config_ids = distinct_config_ids(&rows);
            let (sso_configs, saml_groups) = self.sso_for_config_ids(region, &sso_config_ids).await?;
            domains.push(DomainSso {
                domain,
                sso_config_ids,
                sso_configs,
                saml_groups,
            });
        }

        Ok(VendorSsoReport {
            vendor_id: vendor_id.to_string(),
            region,
            vendor: vendor.value,
            domains,
        })
    }

    /// Role keys a user holds in a tenant; empty when the user has no roles
    pub async fn user_roles(
        &self,
        user_id: &str,
        tenant_id: &str,
        region: Option<Region>,
    ) -> Result<Located<Vec<String>>, LookupError> {
        let link = self
            .resolver
            .resolve_one(
                region,
                DbKind::Identity,
                &queries::user_tenant_by_user_and_tenant(user_id, tenant_id),
            )
            .await?
            .ok_or_else(|| LookupError::not_found(format!("user {} in tenant {}", user_id, tenant_id)))?;
        let region = link.region;

        let user_tenant_id = link
            .value
            .string("id")
            .ok_or_else(|| LookupError::not_found(format!("user {} in tenant {}", user_id, tenant_id)))?;
        let assignments = self
            .resolver
            .fetch_all_in(region, DbKind::Identity, &queries::roles_by_user_tenant_id(&user_tenant_id))
            .await?;

        let mut keys = Vec::new();
        for role_id in assignments.iter().filter_map(|row| row.string("roleId")) {
            let role = self
                .resolver
                .fetch_in(region, DbKind::Identity, &queries::role_by_id(&role_id))
                .await?;
            match role.and_then(|r| r.string("key")) {
                Some(key) => keys.push(key),
                None => tracing::warn!("Role {} assigned to user-tenant {} has no key", role_id, user_tenant_id),
            }
        }

        Ok(Located::new(region, keys))
    }

    async fn vendors_of_account(&self, region: Region, account_id: &str) -> Result<Vec<Vendor>, LookupError> {
        let rows = self
            .resolver
            .fetch_all_in(region, DbKind::General, &queries::vendors_by_account_id(account_id))
            .await?;

        let mut vendors = Vec::with_capacity(rows.len());
        for row in &rows {
            let tenants = match row.string("id") {
                Some(vendor_id) => self.tenants_of_vendor(region, &vendor_id).await?,
                None => Vec::new(),
            };
            vendors.push(Vendor::from_row(row, tenants));
        }
        Ok(vendors)
    }

    async fn tenants_of_vendor(&self, region: Region, vendor_id: &str) -> Result<Vec<Tenant>, LookupError> {
        let rows = self
            .resolver
            .fetch_all_in(region, DbKind::General, &queries::tenants_by_vendor_id(vendor_id))
            .await?;

        let mut tenants = Vec::with_capacity(rows.len());
        for row in &rows {
            let (sso_configs, saml_groups) = match row.string("accountId") {
                Some(tenant_id) => self.sso_for_tenant(region, &tenant_id).await?,
                None => (Vec::new(), Vec::new()),
            };
            tenants.push(Tenant::from_row(row, sso_configs, saml_groups));
        }
        Ok(tenants)
    }

    /// SSO configs for every domain of the tenant, and the SAML groups of
    /// each of those configs
    pub async fn sso_for_tenant(
        &self,
        region: Region,
        tenant_id: &str,
    ) -> Result<(Vec<SsoConfig>, Vec<SamlGroup>), LookupError> {
        let domains = self
            .resolver
            .fetch_all_in(region, DbKind::General, &queries::sso_domains_by_tenant_id(tenant_id))
            .await?;
        let config_ids = distinct_config_ids(&domains);
        self.sso_for_config_ids(region, &config_ids).await
    }

    async fn sso_for_config_ids(
        &self,
        region: Region,
        config_ids: &[String],
    ) -> Result<(Vec<SsoConfig>, Vec<SamlGroup>), LookupError> {
        let mut configs = Vec::new();
        let mut groups = Vec::new();

        for config_id in config_ids {
            let config_rows = self
                .resolver
                .fetch_all_in(region, DbKind::General, &queries::sso_config_by_id(config_id))
                .await?;
            configs.extend(config_rows.iter().map(SsoConfig::from_row));

            let group_rows = self
                .resolver
                .fetch_all_in(region, DbKind::General, &queries::saml_groups_by_config_id(config_id))
                .await?;
            groups.extend(group_rows.iter().map(SamlGroup::from_row));
        }

        Ok((configs, groups))
    }
}

fn distinct_config_ids(domain_rows: &[Row]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in domain_rows.iter().filter_map(|row| row.string("ssoConfigId")) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
