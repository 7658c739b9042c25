use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::time::{Duration, Instant};

use super::{endpoint, ClientError};
use crate::config::VendorApiConfig;
use crate::types::Region;

const SERVICE: &str = "vendor API";
const AUTH_PATH: &str = "/auth/vendor/";
const TENANT_CONFIGURATION_PATH: &str = "/subscriptions/resources/billing/tenant-configurations/v1/";
const WHITE_LABEL_PATH: &str = "/vendors/whitelabel-mode";

/// Bearer token issued by vendor authentication
#[derive(Clone)]
pub struct VendorToken(String);

impl VendorToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VendorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VendorToken(..)")
    }
}

/// Status and body of an administrative PUT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutOutcome {
    pub status_code: u16,
    pub text: String,
}

impl PutOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: Option<String>,
}

/// Client for the vendor-management API
#[derive(Clone)]
pub struct VendorApiClient {
    http: reqwest::Client,
    config: VendorApiConfig,
}

impl VendorApiClient {
    pub fn new(config: VendorApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Exchange the production client credentials for a vendor token
    pub async fn authenticate(&self) -> Result<VendorToken, ClientError> {
        let client_id = self
            .config
            .client_id
            .as_deref()
            .ok_or(ClientError::ConfigMissing("PRODUCTION_CLIENT_ID"))?;
        let secret = self
            .config
            .secret
            .as_deref()
            .ok_or(ClientError::ConfigMissing("PRODUCTION_SECRET"))?;

        let url = endpoint(self.config.base_urls.for_region(self.config.auth_region), AUTH_PATH)?;
        let started = Instant::now();
        let response = self
            .http
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&json!({ "clientId": client_id, "secret": secret }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let auth: AuthResponse = response.json().await?;
        tracing::info!("Vendor authentication completed in {} ms", started.elapsed().as_millis());

        auth.token
            .filter(|t| !t.is_empty())
            .map(VendorToken)
            .ok_or(ClientError::MalformedResponse {
                service: SERVICE,
                field: "token",
            })
    }

    /// Re-point a tenant's billing configuration at the externally managed
    /// plan, which takes it out of trial
    pub async fn update_tenant_configuration(
        &self,
        token: &VendorToken,
        tenant_id: &str,
        configuration_id: &str,
    ) -> Result<PutOutcome, ClientError> {
        let base = self.config.base_urls.for_region(self.config.auth_region);
        let url = endpoint(base, &format!("{}{}", TENANT_CONFIGURATION_PATH, tenant_id))?;
        let payload = json!({
            "providerType": self.config.trial_provider_type,
            "externallyManaged": self.config.trial_externally_managed,
            "configurationId": configuration_id,
        });
        self.put(token, url, payload).await
    }

    /// Toggle white-label mode for one environment in its own region
    pub async fn set_white_label(
        &self,
        token: &VendorToken,
        region: Region,
        vendor_id: &str,
        enabled: bool,
    ) -> Result<PutOutcome, ClientError> {
        let url = endpoint(self.config.base_urls.for_region(region), WHITE_LABEL_PATH)?;
        let payload = json!({ "vendorId": vendor_id, "enabled": enabled });
        self.put(token, url, payload).await
    }

    async fn put(&self, token: &VendorToken, url: url::Url, payload: Value) -> Result<PutOutcome, ClientError> {
        let started = Instant::now();
        let path = url.path().to_string();
        let response = self
            .http
            .put(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(token.as_str())
            .json(&payload)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let text = response.text().await?;
        tracing::info!("PUT {} -> {} in {} ms", path, status_code, started.elapsed().as_millis());

        Ok(PutOutcome { status_code, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_debug_is_redacted() {
        let token = VendorToken::new("eyJhbGciOi.secret");
        assert_eq!(format!("{:?}", token), "VendorToken(..)");
    }

    #[test]
    fn put_outcome_success_range() {
        assert!(PutOutcome { status_code: 204, text: String::new() }.is_success());
        assert!(!PutOutcome { status_code: 403, text: String::new() }.is_success());
    }

    #[tokio::test]
    async fn authenticate_requires_credentials() {
        let client = VendorApiClient::new(crate::config::AppConfig::development().vendor_api).unwrap();
        match client.authenticate().await {
            Err(ClientError::ConfigMissing(key)) => assert_eq!(key, "PRODUCTION_CLIENT_ID"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
