// Admin CRUD endpoints, shared across every editable resource

use axum::extract::State;

use crate::database::models::Order;
use crate::database::repository::{Repository, ResourceInput};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/admin/:resource
pub async fn create<I: ResourceInput>(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<I>,
) -> ApiResult<I::Output> {
    input.validate()?;
    let row = Repository::<I::Output>::new(state.pool.clone()).insert(&input).await?;
    Ok(ApiResponse::created(row))
}

/// PUT /api/admin/:resource/:id
pub async fn update<I: ResourceInput>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<I>,
) -> ApiResult<I::Output> {
    input.validate()?;
    let row = Repository::<I::Output>::new(state.pool.clone())
        .update_404(id, &input)
        .await?;
    Ok(ApiResponse::success(row))
}

/// DELETE /api/admin/:resource/:id
pub async fn delete<I: ResourceInput>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<()> {
    Repository::<I::Output>::new(state.pool.clone()).delete_404(id).await?;
    tracing::info!("Deleted {} {}", <I::Output as crate::database::Resource>::LABEL, id);
    Ok(ApiResponse::<()>::no_content())
}

/// GET /api/admin/orders
pub async fn orders_list(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    Ok(ApiResponse::success(Order::list(&state.pool).await?))
}
