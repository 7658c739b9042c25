#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use support_desk_api::config::AppConfig;
use support_desk_api::router::app;
use support_desk_api::state::AppContext;
use support_desk_api::testing::MemoryStore;
use support_desk_api::types::{DbKind, Region};

pub const VENDOR: &str = "d058e199-6ed3-4049-8034-447bbd5004e9";
pub const VENDOR_DEV: &str = "5f0e6c2a-1b7d-4c1e-9a55-0d8b7f3e2a11";
pub const TENANT: &str = "eb399604-647b-4a8a-9098-12185cef964d";
pub const USER: &str = "0b8e9f1a-2c3d-4e5f-9a6b-7c8d9e0f1a2b";
pub const ACCOUNT: &str = "acc-1";
pub const ACCOUNT_TENANT: &str = "9c1d8f0e-3b2a-4e5f-8a7b-6c5d4e3f2a1b";
pub const PROD_VENDOR: &str = "prod-vendor";

/// A US-hosted account with two environments, one tenant and SSO set up
pub fn account_fixture() -> MemoryStore {
    use support_desk_api::database::queries as q;
    use serde_json::json;

    let g = DbKind::General;
    let us = Region::Us;
    MemoryStore::new()
        .with_row(us, g, q::vendor_by_id(VENDOR), json!({"id": VENDOR, "accountId": ACCOUNT, "region": "legacy"}))
        .with_row(us, g, q::vendor_by_id(VENDOR_DEV), json!({"id": VENDOR_DEV, "accountId": ACCOUNT}))
        .with_row(us, g, q::account_by_id(ACCOUNT), json!({"id": ACCOUNT, "name": "Acme", "accountTenantId": ACCOUNT_TENANT}))
        .with_row(us, g, q::account_by_account_tenant_id(ACCOUNT_TENANT), json!({"id": ACCOUNT, "name": "Acme"}))
        .with_row(us, g, q::vendors_by_account_id(ACCOUNT), json!({"id": VENDOR, "environmentName": "Production", "accountId": ACCOUNT}))
        .with_row(us, g, q::vendors_by_account_id(ACCOUNT), json!({"id": VENDOR_DEV, "environmentName": "Development", "accountId": ACCOUNT}))
        .with_row(us, g, q::tenant_configuration_by_tenant_id(ACCOUNT_TENANT), json!({"id": "cfg-1", "tenantId": ACCOUNT_TENANT}))
        .with_row(us, g, q::tenants_by_vendor_id(VENDOR), json!({"accountId": TENANT, "name": "Acme Customer", "vendorId": VENDOR}))
        .with_row(us, g, q::tenant_by_id(TENANT), json!({"accountId": TENANT, "name": "Acme Customer", "vendorId": VENDOR}))
        .with_row(us, g, q::sso_domains_by_tenant_id(TENANT), json!({"domain": "acme.com", "ssoConfigId": "sc-1"}))
        .with_row(us, g, q::sso_domains_by_vendor_id(VENDOR), json!({"domain": "acme.com"}))
        .with_row(us, g, q::sso_domains_by_vendor_and_domain(VENDOR, "acme.com"), json!({"ssoConfigId": "sc-1"}))
        .with_row(us, g, q::sso_config_by_id("sc-1"), json!({"id": "sc-1", "domain": "acme.com", "type": "saml", "validated": 1}))
        .with_row(us, g, q::saml_groups_by_config_id("sc-1"), json!({"id": 1, "samlConfigId": "sc-1", "group": "admins", "enabled": 1}))
        .with_row(us, DbKind::Identity, q::user_tenant_by_email("jane@acme.io", PROD_VENDOR), json!({"tenantId": ACCOUNT_TENANT, "userId": USER}))
        .with_row(us, DbKind::Identity, q::user_tenant_by_user_and_tenant(USER, TENANT), json!({"id": "ut-1"}))
        .with_row(us, DbKind::Identity, q::roles_by_user_tenant_id("ut-1"), json!({"roleId": "r-1"}))
        .with_row(us, DbKind::Identity, q::role_by_id("r-1"), json!({"id": "r-1", "key": "Admin"}))
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.regions = vec![Region::Eu, Region::Us];
    config.identity.prod_vendor_id = Some(PROD_VENDOR.to_string());
    config
}

pub fn test_app(config: AppConfig, store: Arc<MemoryStore>) -> Result<Router> {
    let ctx = AppContext::new(config, store).context("failed to build context")?;
    Ok(app(ctx.shared()))
}

pub async fn get(app: Router, uri: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder().uri(uri).body(Body::empty())?;
    send(app, request).await
}

pub async fn post(app: Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body: {:?}", bytes))?
    };
    Ok((status, body))
}

/// Serve `router` on an ephemeral port; returns its base URL
pub async fn spawn_mock(router: Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{}", addr))
}

/// Bodies received by a mock upstream, tagged by route
pub type Recorded = Arc<Mutex<Vec<(String, Value)>>>;
