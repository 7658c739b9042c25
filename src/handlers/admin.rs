use axum::{extract::State, Json};
use serde::Deserialize;

use crate::handlers::utils::{parse_id, parse_region};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{TrialRemoval, WhiteLabelOutcome};
use crate::state::SharedContext;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTrialRequest {
    pub vendor_id: String,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteLabelRequest {
    pub vendor_id: String,
    pub enabled: bool,
    #[serde(default)]
    pub all_environments: bool,
    #[serde(default)]
    pub region: Option<String>,
}

/// POST /api/remove_trial
pub async fn remove_trial(
    State(ctx): State<SharedContext>,
    Json(req): Json<RemoveTrialRequest>,
) -> ApiResult<TrialRemoval> {
    let vendor_id = parse_id(&req.vendor_id)?;
    let region = parse_region(req.region.as_deref())?;
    let removal = ctx.admin.remove_trial(&vendor_id, region).await?;
    Ok(ApiResponse::success(removal))
}

/// POST /api/white_label
pub async fn white_label(
    State(ctx): State<SharedContext>,
    Json(req): Json<WhiteLabelRequest>,
) -> ApiResult<Vec<WhiteLabelOutcome>> {
    let vendor_id = parse_id(&req.vendor_id)?;
    let region = parse_region(req.region.as_deref())?;
    let outcomes = ctx
        .admin
        .set_white_label(&vendor_id, req.enabled, req.all_environments, region)
        .await?;
    Ok(ApiResponse::success(outcomes))
}
