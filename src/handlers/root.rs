use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use futures::future::join_all;
use serde::Serialize;
use serde_json::json;

use crate::middleware::ApiResponse;
use crate::state::SharedContext;
use crate::types::{DbKind, Region};

#[derive(Debug, Serialize)]
pub struct ClusterHealth {
    pub region: Region,
    pub kind: DbKind,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET / - service info
pub async fn root(State(ctx): State<SharedContext>) -> ApiResponse<serde_json::Value> {
    ApiResponse::success(json!({
        "name": "Support Desk API",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": ctx.config.environment,
        "regions": ctx.resolver.regions(),
        "endpoints": {
            "health": "GET /health",
            "region": "POST /api/region",
            "accounts": "GET /api/accounts/{vendor|tenant|email|ticket}/:key",
            "sso": "GET /api/vendors/:id/sso",
            "vendor_by_email": "GET /api/vendors/by-email/:email",
            "roles": "POST /api/roles",
            "remove_trial": "POST /api/remove_trial",
            "white_label": "POST /api/white_label",
        }
    }))
}

/// GET /health - ping every (region, cluster) pair concurrently
pub async fn health(State(ctx): State<SharedContext>) -> Response {
    let now = chrono::Utc::now();
    let store = ctx.resolver.store();

    let targets: Vec<(Region, DbKind)> = ctx
        .resolver
        .regions()
        .iter()
        .flat_map(|&region| [(region, DbKind::General), (region, DbKind::Identity)])
        .collect();

    let results = join_all(targets.iter().map(|&(region, kind)| async move {
        let outcome = store.ping(region, kind).await;
        match outcome {
            Ok(()) => ClusterHealth {
                region,
                kind,
                status: "ok",
                error: None,
            },
            Err(e) => {
                tracing::warn!("Health check failed for {} {}: {}", kind, region, e);
                ClusterHealth {
                    region,
                    kind,
                    status: "unavailable",
                    error: Some(e.to_string()),
                }
            }
        }
    }))
    .await;

    if results.iter().all(|r| r.error.is_none()) {
        ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "databases": results,
        }))
        .into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "databases": results,
                }
            })),
        )
            .into_response()
    }
}
