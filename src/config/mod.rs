use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::types::Region;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    /// Lookup order for region fan-out
    pub regions: Vec<Region>,
    pub database: DatabaseConfig,
    pub vendor_api: VendorApiConfig,
    pub identity: IdentityConfig,
    pub ticketing: TicketingConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub port: u16,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub slow_query_threshold_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalUrls {
    pub eu: String,
    pub us: String,
    pub ca: String,
    pub au: String,
}

impl RegionalUrls {
    pub fn for_region(&self, region: Region) -> &str {
        match region {
            Region::Eu => &self.eu,
            Region::Us => &self.us,
            Region::Ca => &self.ca,
            Region::Au => &self.au,
        }
    }

    fn set(&mut self, region: Region, url: String) {
        match region {
            Region::Eu => self.eu = url,
            Region::Us => self.us = url,
            Region::Ca => self.ca = url,
            Region::Au => self.au = url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorApiConfig {
    pub base_urls: RegionalUrls,
    /// Region whose base URL serves vendor authentication and billing endpoints
    pub auth_region: Region,
    #[serde(default, skip_serializing)]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub secret: Option<String>,
    pub timeout_secs: u64,
    pub trial_provider_type: String,
    pub trial_externally_managed: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Vendor under which customer users are registered
    pub prod_vendor_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketingConfig {
    pub base_url: String,
    #[serde(default, skip_serializing)]
    pub email: Option<String>,
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,
    pub agent_domains: Vec<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    /// Load a full configuration from YAML, then apply env overrides on top
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let config: AppConfig = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the process env in production)
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Regions
        if let Some(v) = lookup("DESK_REGIONS") {
            let parsed: Result<Vec<Region>, _> = v
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<Region>())
                .collect();
            match parsed {
                Ok(regions) if !regions.is_empty() => self.regions = regions,
                Ok(_) => tracing::warn!("DESK_REGIONS is empty, keeping {:?}", self.regions),
                Err(e) => tracing::warn!("Ignoring DESK_REGIONS: {}", e),
            }
        }

        // Database overrides
        if let Some(v) = lookup("DB_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Some(v) = lookup("DATABASE_SLOW_QUERY_THRESHOLD_MS") {
            self.database.slow_query_threshold_ms = v.parse().unwrap_or(self.database.slow_query_threshold_ms);
        }

        // Vendor API overrides
        for region in Region::ALL {
            if let Some(v) = lookup(&format!("VENDOR_API_URL_{}", region)) {
                self.vendor_api.base_urls.set(region, v);
            }
        }
        if let Some(v) = lookup("PRODUCTION_CLIENT_ID") {
            self.vendor_api.client_id = Some(v);
        }
        if let Some(v) = lookup("PRODUCTION_SECRET") {
            self.vendor_api.secret = Some(v);
        }
        if let Some(v) = lookup("VENDOR_API_TIMEOUT_SECS") {
            self.vendor_api.timeout_secs = v.parse().unwrap_or(self.vendor_api.timeout_secs);
        }
        if let Some(v) = lookup("TRIAL_PROVIDER_TYPE") {
            self.vendor_api.trial_provider_type = v;
        }
        if let Some(v) = lookup("TRIAL_EXTERNALLY_MANAGED") {
            self.vendor_api.trial_externally_managed = v;
        }

        // Identity
        if let Some(v) = lookup("PROD_VENDOR_ID") {
            self.identity.prod_vendor_id = Some(v);
        }

        // Ticketing
        if let Some(v) = lookup("ZENDESK_URL") {
            self.ticketing.base_url = v;
        }
        if let Some(v) = lookup("ZENDESK_EMAIL_TOKEN") {
            self.ticketing.email = Some(v);
        }
        if let Some(v) = lookup("ZENDESK_API_TOKEN") {
            self.ticketing.api_token = Some(v);
        }
        if let Some(v) = lookup("ZENDESK_AGENT_DOMAINS") {
            self.ticketing.agent_domains = v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
        }

        // API overrides
        if let Some(v) = lookup("DESK_API_PORT").or_else(|| lookup("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.api.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    fn vendor_api_defaults() -> VendorApiConfig {
        VendorApiConfig {
            base_urls: RegionalUrls {
                eu: "https://api.frontegg.com".to_string(),
                us: "https://api.us.frontegg.com".to_string(),
                ca: "https://api.ca.frontegg.com".to_string(),
                au: "https://api.au.frontegg.com".to_string(),
            },
            auth_region: Region::Eu,
            client_id: None,
            secret: None,
            timeout_secs: 30,
            trial_provider_type: "Stripe".to_string(),
            trial_externally_managed: "prod_M81QRPpLeQ8Sea".to_string(),
        }
    }

    fn ticketing_defaults() -> TicketingConfig {
        TicketingConfig {
            base_url: "https://frontegg-help.zendesk.com".to_string(),
            email: None,
            api_token: None,
            agent_domains: vec!["frontegg.com".to_string(), "support.frontegg.com".to_string()],
            timeout_secs: 30,
        }
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            regions: vec![Region::Eu, Region::Us],
            database: DatabaseConfig {
                port: 3306,
                max_connections: 2,
                connection_timeout: 30,
                slow_query_threshold_ms: 100,
            },
            vendor_api: Self::vendor_api_defaults(),
            identity: IdentityConfig { prod_vendor_id: None },
            ticketing: Self::ticketing_defaults(),
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            regions: vec![Region::Eu, Region::Us],
            database: DatabaseConfig {
                port: 3306,
                max_connections: 5,
                connection_timeout: 10,
                slow_query_threshold_ms: 500,
            },
            vendor_api: Self::vendor_api_defaults(),
            identity: IdentityConfig { prod_vendor_id: None },
            ticketing: Self::ticketing_defaults(),
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            regions: vec![Region::Eu, Region::Us, Region::Ca, Region::Au],
            database: DatabaseConfig {
                port: 3306,
                max_connections: 5,
                connection_timeout: 5,
                slow_query_threshold_ms: 1000,
            },
            vendor_api: Self::vendor_api_defaults(),
            identity: IdentityConfig { prod_vendor_id: None },
            ticketing: Self::ticketing_defaults(),
            api: ApiConfig {
                port: 3000,
                enable_request_logging: false,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| match env::var("DESK_CONFIG_FILE") {
    Ok(path) => AppConfig::from_file(&path).unwrap_or_else(|e| {
        tracing::error!("{}; falling back to environment profile", e);
        AppConfig::from_env()
    }),
    Err(_) => AppConfig::from_env(),
});

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.regions, vec![Region::Eu, Region::Us]);
        assert_eq!(config.vendor_api.base_urls.for_region(Region::Eu), "https://api.frontegg.com");
        assert_eq!(config.vendor_api.trial_provider_type, "Stripe");
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.regions.len(), 4);
        assert!(!config.api.enable_request_logging);
    }

    #[test]
    fn overrides_regions_and_urls() {
        let config = AppConfig::development().with_overrides_from(lookup_from(&[
            ("DESK_REGIONS", "us, ca"),
            ("VENDOR_API_URL_US", "http://127.0.0.1:9000"),
            ("PRODUCTION_CLIENT_ID", "client"),
            ("ZENDESK_AGENT_DOMAINS", "acme.io, help.acme.io"),
            ("PORT", "8080"),
        ]));

        assert_eq!(config.regions, vec![Region::Us, Region::Ca]);
        assert_eq!(config.vendor_api.base_urls.for_region(Region::Us), "http://127.0.0.1:9000");
        assert_eq!(config.vendor_api.client_id.as_deref(), Some("client"));
        assert_eq!(config.ticketing.agent_domains, vec!["acme.io", "help.acme.io"]);
        assert_eq!(config.api.port, 8080);
    }

    #[test]
    fn invalid_region_list_keeps_defaults() {
        let config = AppConfig::development().with_overrides_from(lookup_from(&[("DESK_REGIONS", "EU,MARS")]));
        assert_eq!(config.regions, vec![Region::Eu, Region::Us]);
    }

    #[test]
    fn secrets_are_not_serialized() {
        let mut config = AppConfig::development();
        config.vendor_api.secret = Some("hunter2".to_string());
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("hunter2"));
    }

    #[test]
    fn loads_yaml_file() {
        let yaml = serde_yaml::to_string(&AppConfig::production()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert!(matches!(config.environment, Environment::Production));
        assert!(config.regions.contains(&Region::Au));
    }

    #[test]
    fn missing_yaml_file_is_an_error() {
        let err = AppConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
