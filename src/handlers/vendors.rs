use axum::extract::{Path, Query, State};
use serde::Serialize;

use crate::handlers::utils::{parse_id, parse_region, RegionQuery};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::VendorSsoReport;
use crate::state::SharedContext;
use crate::types::Region;
use crate::validation::strip_quotes;

#[derive(Debug, Serialize)]
pub struct VendorIdResponse {
    pub email: String,
    pub vendor_id: String,
    pub region: Region,
}

/// GET /api/vendors/:id/sso
pub async fn sso_report(State(ctx): State<SharedContext>, Path(id): Path<String>) -> ApiResult<VendorSsoReport> {
    let vendor_id = parse_id(&id)?;
    let report = ctx.accounts.vendor_sso_report(&vendor_id).await?;
    Ok(ApiResponse::success(report))
}

/// GET /api/vendors/by-email/:email
pub async fn by_email(
    State(ctx): State<SharedContext>,
    Path(email): Path<String>,
    Query(query): Query<RegionQuery>,
) -> ApiResult<VendorIdResponse> {
    let email = strip_quotes(email.trim()).to_string();
    let region = parse_region(query.region.as_deref())?;
    let found = ctx.accounts.vendor_id_by_email(&email, region).await?;
    Ok(ApiResponse::success(VendorIdResponse {
        email,
        vendor_id: found.value,
        region: found.region,
    }))
}
