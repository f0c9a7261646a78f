//! Cart handlers.

use axum::{extract::State, response::Json, routing::post, Extension, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::Cart;
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Cart item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    #[validate(length(min = 1, message = "Item id is required"))]
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub item_id: String,
}

/// Create cart routes (all require a session)
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_to_cart))
        .route("/remove", post(remove_from_cart))
        .route("/get", post(get_cart))
}

/// Increment an item in the caller's cart
#[utoipa::path(
    post,
    path = "/api/cart/add",
    tag = "Cart",
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Updated cart as item id to quantity", body = Cart),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CartItemRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state
        .cart_service
        .add_to_cart(&current_user.id, &payload.item_id)
        .await?;

    Ok(Json(ApiResponse::with_message(cart, "Added To Cart")))
}

/// Decrement an item in the caller's cart
#[utoipa::path(
    post,
    path = "/api/cart/remove",
    tag = "Cart",
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Updated cart as item id to quantity", body = Cart),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CartItemRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state
        .cart_service
        .remove_from_cart(&current_user.id, &payload.item_id)
        .await?;

    Ok(Json(ApiResponse::with_message(cart, "Removed From Cart")))
}

/// Get the caller's cart
#[utoipa::path(
    post,
    path = "/api/cart/get",
    tag = "Cart",
    responses(
        (status = 200, description = "Cart as item id to quantity", body = Cart),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state.cart_service.get_cart(&current_user.id).await?;
    Ok(Json(ApiResponse::success(cart)))
}
