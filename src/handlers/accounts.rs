use axum::extract::{Path, Query, State};

use crate::database::models::Account;
use crate::handlers::utils::{parse_id, parse_region, RegionQuery};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::SharedContext;
use crate::validation::strip_quotes;

/// GET /api/accounts/vendor/:id
pub async fn by_vendor(
    State(ctx): State<SharedContext>,
    Path(id): Path<String>,
    Query(query): Query<RegionQuery>,
) -> ApiResult<Account> {
    let vendor_id = parse_id(&id)?;
    let region = parse_region(query.region.as_deref())?;
    let account = ctx.accounts.account_by_vendor_id(&vendor_id, region).await?;
    Ok(ApiResponse::success(account))
}

/// GET /api/accounts/tenant/:id
pub async fn by_tenant(
    State(ctx): State<SharedContext>,
    Path(id): Path<String>,
    Query(query): Query<RegionQuery>,
) -> ApiResult<Account> {
    let tenant_id = parse_id(&id)?;
    let region = parse_region(query.region.as_deref())?;
    let account = ctx.accounts.account_by_tenant_id(&tenant_id, region).await?;
    Ok(ApiResponse::success(account))
}

/// GET /api/accounts/email/:email
pub async fn by_email(
    State(ctx): State<SharedContext>,
    Path(email): Path<String>,
    Query(query): Query<RegionQuery>,
) -> ApiResult<Account> {
    let region = parse_region(query.region.as_deref())?;
    let account = ctx.accounts.account_by_email(strip_quotes(email.trim()), region).await?;
    Ok(ApiResponse::success(account))
}

/// GET /api/accounts/ticket/:ticket
pub async fn by_ticket(State(ctx): State<SharedContext>, Path(ticket): Path<String>) -> ApiResult<Account> {
    let account = ctx.accounts.account_by_ticket(strip_quotes(ticket.trim())).await?;
    Ok(ApiResponse::success(account))
}
