use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::row::{Row, RowExt};

/// `frontegg_team_management.sso_configs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoConfig {
    pub id: Option<String>,
    pub vendor_id: Option<String>,
    pub tenant_id: Option<String>,
    pub domain: Option<String>,
    pub validated: Option<bool>,
    pub sso_endpoint: Option<String>,
    pub public_certificate: Option<String>,
    pub sign_request: Option<bool>,
    pub acs_url: Option<String>,
    #[serde(rename = "type")]
    pub sso_type: Option<String>,
    pub sp_entity_id: Option<String>,
    #[serde(rename = "config_metadata")]
    pub config_metadata: Option<Value>,
    pub skip_email_domain_validation: Option<bool>,
    pub override_active_tenant: Option<bool>,
}

impl SsoConfig {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.string("id"),
            vendor_id: row.string("vendorId"),
            tenant_id: row.string("tenantId"),
            domain: row.string("domain"),
            validated: row.boolean("validated"),
            sso_endpoint: row.string("ssoEndpoint"),
            public_certificate: row.string("publicCertificate"),
            sign_request: row.boolean("signRequest"),
            acs_url: row.string("acsUrl"),
            sso_type: row.string("type"),
            sp_entity_id: row.string("spEntityId"),
            config_metadata: row.json("configMetadata").or_else(|| row.json("config_metadata")),
            skip_email_domain_validation: row.boolean("skipEmailDomainValidation"),
            override_active_tenant: row.boolean("overrideActiveTenant"),
        }
    }
}

/// `frontegg_team_management.saml_groups`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlGroup {
    pub id: Option<String>,
    pub saml_config_id: Option<String>,
    pub enabled: Option<bool>,
    pub group: Option<String>,
}

impl SamlGroup {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.string("id"),
            saml_config_id: row.string("samlConfigId"),
            enabled: row.boolean("enabled"),
            group: row.string("group"),
        }
    }
}
