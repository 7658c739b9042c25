use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BuilderConfig, SamlGroup, SsoConfig};
use crate::database::row::{Row, RowExt};

/// End-customer tenant of a vendor (`frontegg_backoffice.accounts`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Option<String>,
    pub name: Option<String>,
    pub meta_data: Option<Value>,
    pub vendor_id: Option<String>,
    pub sso_configs: Vec<SsoConfig>,
    pub saml_groups: Vec<SamlGroup>,
    pub builder_configs: Option<BuilderConfig>,
}

impl Tenant {
    pub fn from_row(row: &Row, sso_configs: Vec<SsoConfig>, saml_groups: Vec<SamlGroup>) -> Self {
        Self {
            id: row.string("accountId"),
            name: row.string("name"),
            meta_data: row.json("metadata"),
            vendor_id: row.string("vendorId"),
            sso_configs,
            saml_groups,
            builder_configs: None,
        }
    }
}
