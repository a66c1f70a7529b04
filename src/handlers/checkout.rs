use axum::extract::State;

use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::services::checkout::{CreatedCheckout, Fulfillment};
use crate::state::AppState;
use crate::types::{CompleteCheckout, OrderData};

/// POST /api/checkout - open a hosted Stripe checkout for the cart
pub async fn create(State(state): State<AppState>, ApiJson(order): ApiJson<OrderData>) -> ApiResult<CreatedCheckout> {
    let created = state.checkout.create_checkout(&order).await?;
    Ok(ApiResponse::created(created))
}

/// POST /api/checkout/complete - fulfil a paid session
pub async fn complete(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CompleteCheckout>,
) -> ApiResult<Fulfillment> {
    let fulfillment = state.checkout.complete_checkout(body.session_id.trim()).await?;
    Ok(ApiResponse::success(fulfillment))
}
