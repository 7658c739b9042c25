//! Parameterised lookups against the regional clusters.
//!
//! Every statement uses `?` placeholders; identifiers are bound, never
//! formatted into the SQL text.

/// A statement plus its string bind values, in placeholder order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupQuery {
    pub sql: &'static str,
    pub binds: Vec<String>,
}

impl LookupQuery {
    pub fn new(sql: &'static str, binds: Vec<String>) -> Self {
        Self { sql, binds }
    }

    fn one(sql: &'static str, value: &str) -> Self {
        Self::new(sql, vec![value.to_string()])
    }
}

pub mod sql {
    // frontegg_vendors
    pub const VENDOR_BY_ID: &str = "SELECT v.* FROM frontegg_vendors.vendors v WHERE v.id = ?";
    pub const VENDORS_BY_ACCOUNT_ID: &str = "SELECT v.* FROM frontegg_vendors.vendors v WHERE v.accountId = ?";
    pub const ACCOUNT_BY_ID: &str = "SELECT a.* FROM frontegg_vendors.accounts a WHERE a.id = ?";
    pub const ACCOUNT_BY_ACCOUNT_TENANT_ID: &str =
        "SELECT a.* FROM frontegg_vendors.accounts a WHERE a.accountTenantId = ?";

    // frontegg_backoffice
    pub const TENANT_BY_ID: &str = "SELECT t.* FROM frontegg_backoffice.accounts t WHERE t.accountId = ?";
    pub const TENANTS_BY_VENDOR_ID: &str = "SELECT t.* FROM frontegg_backoffice.accounts t WHERE t.vendorId = ?";

    // frontegg_subscriptions
    pub const TENANT_CONFIGURATION_BY_TENANT_ID: &str =
        "SELECT c.* FROM frontegg_subscriptions.tenant_configurations c WHERE c.tenantId = ?";

    // frontegg_team_management
    pub const SSO_DOMAINS_BY_VENDOR_ID: &str =
        "SELECT sd.* FROM frontegg_team_management.sso_domains sd WHERE sd.vendorId = ?";
    pub const SSO_DOMAINS_BY_TENANT_ID: &str =
        "SELECT sd.* FROM frontegg_team_management.sso_domains sd WHERE sd.tenantId = ?";
    pub const SSO_DOMAINS_BY_VENDOR_AND_DOMAIN: &str =
        "SELECT sd.* FROM frontegg_team_management.sso_domains sd WHERE sd.vendorId = ? AND sd.domain = ?";
    pub const SSO_CONFIG_BY_ID: &str = "SELECT sc.* FROM frontegg_team_management.sso_configs sc WHERE sc.id = ?";
    pub const SAML_GROUPS_BY_CONFIG_ID: &str =
        "SELECT sg.* FROM frontegg_team_management.saml_groups sg WHERE sg.samlConfigId = ?";

    // frontegg_identity
    pub const USER_TENANT_BY_EMAIL_AND_VENDOR: &str = "SELECT ut.tenantId, ut.userId, u.email \
         FROM frontegg_identity.users u \
         JOIN frontegg_identity.users_tenants ut ON ut.userId = u.id \
         WHERE u.email = ? AND u.vendorId = ? \
         LIMIT 1";
    pub const USER_TENANT_BY_USER_AND_TENANT: &str =
        "SELECT ut.* FROM frontegg_identity.users_tenants ut WHERE ut.userId = ? AND ut.tenantId = ?";
    pub const ROLES_BY_USER_TENANT_ID: &str =
        "SELECT utr.* FROM frontegg_identity.users_tenants_roles utr WHERE utr.userTenantId = ?";
    pub const ROLE_BY_ID: &str = "SELECT r.* FROM frontegg_identity.roles r WHERE r.id = ?";
}

pub fn vendor_by_id(vendor_id: &str) -> LookupQuery {
    LookupQuery::one(sql::VENDOR_BY_ID, vendor_id)
}

pub fn vendors_by_account_id(account_id: &str) -> LookupQuery {
    LookupQuery::one(sql::VENDORS_BY_ACCOUNT_ID, account_id)
}

pub fn account_by_id(account_id: &str) -> LookupQuery {
    LookupQuery::one(sql::ACCOUNT_BY_ID, account_id)
}

pub fn account_by_account_tenant_id(account_tenant_id: &str) -> LookupQuery {
    LookupQuery::one(sql::ACCOUNT_BY_ACCOUNT_TENANT_ID, account_tenant_id)
}

pub fn tenant_by_id(tenant_id: &str) -> LookupQuery {
    LookupQuery::one(sql::TENANT_BY_ID, tenant_id)
}

pub fn tenants_by_vendor_id(vendor_id: &str) -> LookupQuery {
    LookupQuery::one(sql::TENANTS_BY_VENDOR_ID, vendor_id)
}

pub fn tenant_configuration_by_tenant_id(tenant_id: &str) -> LookupQuery {
    LookupQuery::one(sql::TENANT_CONFIGURATION_BY_TENANT_ID, tenant_id)
}

pub fn sso_domains_by_vendor_id(vendor_id: &str) -> LookupQuery {
    LookupQuery::one(sql::SSO_DOMAINS_BY_VENDOR_ID, vendor_id)
}

pub fn sso_domains_by_tenant_id(tenant_id: &str) -> LookupQuery {
    LookupQuery::one(sql::SSO_DOMAINS_BY_TENANT_ID, tenant_id)
}

pub fn sso_domains_by_vendor_and_domain(vendor_id: &str, domain: &str) -> LookupQuery {
    LookupQuery::new(
        sql::SSO_DOMAINS_BY_VENDOR_AND_DOMAIN,
        vec![vendor_id.to_string(), domain.to_string()],
    )
}

pub fn sso_config_by_id(config_id: &str) -> LookupQuery {
    LookupQuery::one(sql::SSO_CONFIG_BY_ID, config_id)
}

pub fn saml_groups_by_config_id(config_id: &str) -> LookupQuery {
    LookupQuery::one(sql::SAML_GROUPS_BY_CONFIG_ID, config_id)
}

pub fn user_tenant_by_email(email: &str, vendor_id: &str) -> LookupQuery {
    LookupQuery::new(
        sql::USER_TENANT_BY_EMAIL_AND_VENDOR,
        vec![email.to_string(), vendor_id.to_string()],
    )
}

pub fn user_tenant_by_user_and_tenant(user_id: &str, tenant_id: &str) -> LookupQuery {
    LookupQuery::new(
        sql::USER_TENANT_BY_USER_AND_TENANT,
        vec![user_id.to_string(), tenant_id.to_string()],
    )
}

pub fn roles_by_user_tenant_id(user_tenant_id: &str) -> LookupQuery {
    LookupQuery::one(sql::ROLES_BY_USER_TENANT_ID, user_tenant_id)
}

pub fn role_by_id(role_id: &str) -> LookupQuery {
    LookupQuery::one(sql::ROLE_BY_ID, role_id)
}
