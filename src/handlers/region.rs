use axum::{extract::State, Json};
use serde::Deserialize;

use crate::database::Row;
use crate::error::ApiError;
use crate::handlers::utils::parse_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::SharedContext;
use crate::types::IdType;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCheckRequest {
    /// `vendor` or `tenant`
    pub selected_option: String,
    pub query_id: String,
}

/// POST /api/region - which region holds a vendor or tenant
pub async fn check_region(State(ctx): State<SharedContext>, Json(req): Json<RegionCheckRequest>) -> ApiResult<Row> {
    let id_type: IdType = req.selected_option.parse().map_err(ApiError::bad_request)?;
    let id = parse_id(&req.query_id)?;

    let row = ctx
        .resolver
        .check_customer_region(id_type, &id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} {} was not found in any region", req.selected_option, id)))?;

    Ok(ApiResponse::success(row))
}
