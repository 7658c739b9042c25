use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::handlers::utils::{parse_id, parse_region};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::SharedContext;
use crate::types::Region;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolesRequest {
    pub user_id: String,
    pub tenant_id: String,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub user_id: String,
    pub tenant_id: String,
    pub region: Region,
    pub roles: Vec<String>,
}

/// POST /api/roles - role keys of a user in a tenant
pub async fn user_roles(State(ctx): State<SharedContext>, Json(req): Json<RolesRequest>) -> ApiResult<RolesResponse> {
    let user_id = parse_id(&req.user_id)?;
    let tenant_id = parse_id(&req.tenant_id)?;
    let region = parse_region(req.region.as_deref())?;

    let roles = ctx.accounts.user_roles(&user_id, &tenant_id, region).await?;
    Ok(ApiResponse::success(RolesResponse {
        user_id,
        tenant_id,
        region: roles.region,
        roles: roles.value,
    }))
}
