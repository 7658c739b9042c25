mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use support_desk_api::testing::MemoryStore;
use support_desk_api::types::Region;

use common::{account_fixture, test_app, test_config, ACCOUNT, TENANT, USER, VENDOR, VENDOR_DEV};

#[tokio::test]
async fn region_check_tags_row_with_region() -> Result<()> {
    let app = test_app(test_config(), Arc::new(account_fixture()))?;
    let (status, body) = common::post(
        app,
        "/api/region",
        json!({"selectedOption": "vendor", "queryId": format!("'{}'", VENDOR)}),
    )
    .await?;

    assert_eq!(status, StatusCode::OK, "{}", body);
    let keys: Vec<&String> = body["data"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["region", "id", "accountId"]);
    assert_eq!(body["data"]["region"], "US");
    Ok(())
}

#[tokio::test]
async fn region_check_rejects_bad_input() -> Result<()> {
    let app = test_app(test_config(), Arc::new(account_fixture()))?;
    let (status, body) = common::post(
        app.clone(),
        "/api/region",
        json!({"selectedOption": "vendor", "queryId": "not-a-uuid"}),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": true, "message": "Invalid ID!", "code": "BAD_REQUEST"}));

    let (status, _) = common::post(
        app,
        "/api/region",
        json!({"selectedOption": "account", "queryId": VENDOR}),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn region_check_not_found() -> Result<()> {
    let app = test_app(test_config(), Arc::new(account_fixture()))?;
    let (status, body) = common::post(
        app,
        "/api/region",
        json!({"selectedOption": "tenant", "queryId": VENDOR}),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn down_region_is_not_reported_as_missing() -> Result<()> {
    let store = MemoryStore::new().failing(Region::Eu);
    let app = test_app(test_config(), Arc::new(store))?;
    let (status, body) = common::get(app, &format!("/api/accounts/vendor/{}", VENDOR)).await?;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", body);
    assert!(body["message"].as_str().unwrap().contains("EU"));
    Ok(())
}

#[tokio::test]
async fn unconfigured_region_is_a_config_error() -> Result<()> {
    let store = account_fixture().unconfigured(Region::Eu, "HOST_GENERAL_EU");
    let app = test_app(test_config(), Arc::new(store))?;
    let (status, body) = common::get(app, &format!("/api/accounts/vendor/{}", VENDOR)).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", body);
    assert_eq!(body["message"], "Missing configuration: HOST_GENERAL_EU");
    Ok(())
}

#[tokio::test]
async fn account_by_vendor_id() -> Result<()> {
    let app = test_app(test_config(), Arc::new(account_fixture()))?;
    let (status, body) = common::get(app, &format!("/api/accounts/vendor/{}", VENDOR_DEV)).await?;

    assert_eq!(status, StatusCode::OK, "{}", body);
    let account = &body["data"];
    assert_eq!(account["id"], ACCOUNT);
    assert_eq!(account["region"], "US");
    assert_eq!(account["number_of_environments"], 2);
    assert_eq!(account["builder_config"], json!(null));
    let tenant = &account["vendors"][0]["tenants"][0];
    assert_eq!(tenant["id"], TENANT);
    assert_eq!(tenant["sso_configs"][0]["type"], "saml");
    assert_eq!(tenant["saml_groups"][0]["group"], "admins");
    Ok(())
}

#[tokio::test]
async fn region_hint_limits_the_search() -> Result<()> {
    let store = Arc::new(account_fixture());
    let app = test_app(test_config(), store.clone())?;
    let (status, _) = common::get(app, &format!("/api/accounts/vendor/{}?region=eu", VENDOR)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn unknown_region_hint_is_rejected() -> Result<()> {
    let app = test_app(test_config(), Arc::new(account_fixture()))?;
    let (status, _) = common::get(app, &format!("/api/accounts/vendor/{}?region=mars", VENDOR)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn account_by_tenant_id() -> Result<()> {
    let app = test_app(test_config(), Arc::new(account_fixture()))?;
    let (status, body) = common::get(app, &format!("/api/accounts/tenant/{}", TENANT)).await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["name"], "Acme");
    Ok(())
}

#[tokio::test]
async fn account_and_vendor_by_email() -> Result<()> {
    let app = test_app(test_config(), Arc::new(account_fixture()))?;

    let (status, body) = common::get(app.clone(), "/api/accounts/email/jane@acme.io").await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["id"], ACCOUNT);

    let (status, body) = common::get(app.clone(), "/api/vendors/by-email/jane@acme.io").await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"], json!({"email": "jane@acme.io", "vendor_id": VENDOR, "region": "US"}));

    let (status, _) = common::get(app, "/api/vendors/by-email/nobody@acme.io").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn email_lookup_without_prod_vendor_is_a_config_error() -> Result<()> {
    let mut config = test_config();
    config.identity.prod_vendor_id = None;
    let app = test_app(config, Arc::new(account_fixture()))?;

    let (status, body) = common::get(app, "/api/accounts/email/jane@acme.io").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Missing configuration: PROD_VENDOR_ID");
    Ok(())
}

#[tokio::test]
async fn vendor_sso_report() -> Result<()> {
    let app = test_app(test_config(), Arc::new(account_fixture()))?;
    let (status, body) = common::get(app, &format!("/api/vendors/{}/sso", VENDOR)).await?;

    assert_eq!(status, StatusCode::OK, "{}", body);
    let domain = &body["data"]["domains"][0];
    assert_eq!(domain["domain"], "acme.com");
    assert_eq!(domain["sso_config_ids"], json!(["sc-1"]));
    assert_eq!(domain["saml_groups"][0]["samlConfigId"], "sc-1");
    Ok(())
}

#[tokio::test]
async fn user_roles() -> Result<()> {
    let app = test_app(test_config(), Arc::new(account_fixture()))?;
    let (status, body) = common::post(
        app.clone(),
        "/api/roles",
        json!({"userId": USER, "tenantId": TENANT}),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["roles"], json!(["Admin"]));
    assert_eq!(body["data"]["region"], "US");

    let (status, _) = common::post(app, "/api/roles", json!({"userId": USER, "tenantId": VENDOR})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
