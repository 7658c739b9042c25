use serde::{Deserialize, Serialize};

use super::Vendor;
use crate::database::row::{Row, RowExt};
use crate::types::Region;

/// Builder configuration slot. Not stored in the regional databases, so it
/// is always empty in snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Full snapshot of a customer account and everything under it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Option<String>,
    pub name: Option<String>,
    pub region: Region,
    pub number_of_environments: usize,
    pub vendors: Vec<Vendor>,
    pub builder_config: Option<BuilderConfig>,
}

impl Account {
    /// Build from a `frontegg_vendors.accounts` row and its environments
    pub fn from_row(row: &Row, region: Region, vendors: Vec<Vendor>) -> Self {
        Self {
            id: row.string("id"),
            name: row.string("name"),
            region,
            number_of_environments: vendors.len(),
            vendors,
            builder_config: None,
        }
    }
}
