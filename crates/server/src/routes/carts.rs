use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::Cart;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::latency;
use crate::startup::AppState;

#[derive(Serialize, Deserialize, Debug)]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: i32,
}

pub async fn add_item(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload?;
    latency::simulate(&state.latency).await;
    state
        .carts
        .add_item(&user_id, &payload.product_id, payload.quantity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Cart>, ApiError> {
    latency::simulate(&state.latency).await;
    let cart = state.carts.get_cart(&user_id).await?;
    Ok(Json(cart))
}

pub async fn empty_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    latency::simulate(&state.latency).await;
    state.carts.empty_cart(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
