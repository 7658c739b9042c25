mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use common::{account_fixture, test_app, test_config, Recorded, ACCOUNT_TENANT, VENDOR, VENDOR_DEV};

async fn auth(State(seen): State<Recorded>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let valid = body["secret"] == "secret";
    seen.lock().unwrap().push(("auth".to_string(), body));
    if valid {
        (StatusCode::OK, Json(json!({"token": "vendor-token", "expiresIn": 86400})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"errors": ["Invalid authorization"]})))
    }
}

async fn billing(seen: Recorded, tenant: String, body: Value, answer: StatusCode) -> StatusCode {
    seen.lock().unwrap().push((format!("billing {}", tenant), body));
    answer
}

async fn white_label(State(seen): State<Recorded>, Json(body): Json<Value>) -> (StatusCode, String) {
    seen.lock().unwrap().push(("whitelabel".to_string(), body));
    (StatusCode::OK, "{}".to_string())
}

async fn vendor_api(secret: &str) -> Result<(support_desk_api::config::AppConfig, Recorded)> {
    vendor_api_answering(secret, StatusCode::OK).await
}

/// Mock vendor API whose billing endpoint answers with `billing_status`
async fn vendor_api_answering(
    secret: &str,
    billing_status: StatusCode,
) -> Result<(support_desk_api::config::AppConfig, Recorded)> {
    let seen = Recorded::default();
    let router = Router::new()
        .route("/auth/vendor/", post(auth))
        .route(
            "/subscriptions/resources/billing/tenant-configurations/v1/:tenant",
            put(
                move |State(seen): State<Recorded>, Path(tenant): Path<String>, Json(body): Json<Value>| {
                    billing(seen, tenant, body, billing_status)
                },
            ),
        )
        .route("/vendors/whitelabel-mode", put(white_label))
        .with_state(seen.clone());
    let base = common::spawn_mock(router).await?;

    let mut config = test_config();
    config.vendor_api.base_urls.eu = base.clone();
    config.vendor_api.base_urls.us = base;
    config.vendor_api.client_id = Some("client".to_string());
    config.vendor_api.secret = Some(secret.to_string());
    Ok((config, seen))
}

#[tokio::test]
async fn remove_trial_updates_tenant_configuration() -> Result<()> {
    let (config, seen) = vendor_api("secret").await?;
    let app = test_app(config, Arc::new(account_fixture()))?;

    let (status, body) = common::post(app, "/api/remove_trial", json!({"vendorId": VENDOR})).await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(
        body["data"],
        json!({
            "vendor_id": VENDOR,
            "region": "US",
            "tenant_id": ACCOUNT_TENANT,
            "configuration_id": "cfg-1",
            "status_code": 200,
            "success": true
        })
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].0, format!("billing {}", ACCOUNT_TENANT));
    assert_eq!(
        seen[1].1,
        json!({"providerType": "Stripe", "externallyManaged": "prod_M81QRPpLeQ8Sea", "configurationId": "cfg-1"})
    );
    Ok(())
}

#[tokio::test]
async fn refused_billing_update_is_reported_not_raised() -> Result<()> {
    let (config, seen) = vendor_api_answering("secret", StatusCode::CONFLICT).await?;
    let app = test_app(config, Arc::new(account_fixture()))?;

    let (status, body) = common::post(app, "/api/remove_trial", json!({"vendorId": VENDOR})).await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status_code"], 409);
    assert_eq!(body["data"]["success"], false);
    assert_eq!(body["data"]["configuration_id"], "cfg-1");
    assert_eq!(seen.lock().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn rejected_vendor_credentials_are_a_bad_gateway() -> Result<()> {
    let (config, _) = vendor_api("wrong").await?;
    let app = test_app(config, Arc::new(account_fixture()))?;

    let (status, body) = common::post(app, "/api/remove_trial", json!({"vendorId": VENDOR})).await?;
    assert_eq!(status, StatusCode::BAD_GATEWAY, "{}", body);
    Ok(())
}

#[tokio::test]
async fn missing_vendor_credentials_is_a_config_error() -> Result<()> {
    let app = test_app(test_config(), Arc::new(account_fixture()))?;
    let (status, body) = common::post(app, "/api/remove_trial", json!({"vendorId": VENDOR})).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Missing configuration: PRODUCTION_CLIENT_ID");
    Ok(())
}

#[tokio::test]
async fn white_label_all_environments() -> Result<()> {
    let (config, seen) = vendor_api("secret").await?;
    let app = test_app(config, Arc::new(account_fixture()))?;

    let (status, body) = common::post(
        app,
        "/api/white_label",
        json!({"vendorId": VENDOR, "enabled": true, "allEnvironments": true}),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let toggled: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|o| o["vendor_id"].as_str())
        .collect();
    assert_eq!(toggled, vec![VENDOR, VENDOR_DEV]);

    let seen = seen.lock().unwrap();
    let puts: Vec<&Value> = seen.iter().filter(|(route, _)| route == "whitelabel").map(|(_, b)| b).collect();
    assert_eq!(puts.len(), 2);
    assert_eq!(*puts[1], json!({"vendorId": VENDOR_DEV, "enabled": true}));
    Ok(())
}

#[tokio::test]
async fn white_label_rejects_invalid_vendor_id() -> Result<()> {
    let app = test_app(test_config(), Arc::new(account_fixture()))?;
    let (status, body) = common::post(
        app,
        "/api/white_label",
        json!({"vendorId": "1234", "enabled": false}),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID!");
    Ok(())
}
