/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regional deployment. Each region runs its own GENERAL and IDENTITY clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Eu,
    Us,
    Ca,
    Au,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Eu, Region::Us, Region::Ca, Region::Au];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Eu => "EU",
            Region::Us => "US",
            Region::Ca => "CA",
            Region::Au => "AU",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region '{0}' (expected one of EU, US, CA, AU)")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EU" => Ok(Region::Eu),
            "US" => Ok(Region::Us),
            "CA" => Ok(Region::Ca),
            "AU" => Ok(Region::Au),
            _ => Err(UnknownRegion(s.to_string())),
        }
    }
}

/// Which cluster of a region a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DbKind {
    /// Vendors, accounts, tenants, subscriptions and SSO tables
    General,
    /// Users, user-tenant links and roles
    Identity,
}

impl DbKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbKind::General => "GENERAL",
            DbKind::Identity => "IDENTITY",
        }
    }
}

impl fmt::Display for DbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of identifier accepted by the region check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdType {
    Vendor,
    Tenant,
}

impl FromStr for IdType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "vendor" => Ok(IdType::Vendor),
            "tenant" => Ok(IdType::Tenant),
            other => Err(format!("unsupported id type '{}'", other)),
        }
    }
}
