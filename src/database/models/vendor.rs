use serde::{Deserialize, Serialize};

use super::Tenant;
use crate::database::row::{Row, RowExt};

/// One environment of an account (`frontegg_vendors.vendors`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: Option<String>,
    pub env_name: Option<String>,
    pub app_url: Option<String>,
    pub login_url: Option<String>,
    pub host: Option<String>,
    pub country: Option<String>,
    pub fe_stack: Option<String>,
    pub be_stack: Option<String>,
    pub account_id: Option<String>,
    pub tenants: Vec<Tenant>,
}

impl Vendor {
    pub fn from_row(row: &Row, tenants: Vec<Tenant>) -> Self {
        Self {
            id: row.string("id"),
            env_name: row.string("environmentName"),
            app_url: row.string("appURL"),
            login_url: row.string("loginURL"),
            host: row.string("host"),
            country: row.string("country"),
            fe_stack: row.string("frontendStack"),
            be_stack: row.string("backendStack"),
            account_id: row.string("accountId"),
            tenants,
        }
    }
}
