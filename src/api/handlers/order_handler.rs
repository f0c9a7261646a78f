//! Order and payment handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Order, OrderDraft, OrderStatus};
use crate::errors::{AppError, AppResult};
use crate::services::{PaymentConfirmation, PaymentOrder};
use crate::types::ApiResponse;

/// Gateway order request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    /// Amount in major units (rupees)
    #[schema(example = 100)]
    pub amount: Decimal,
    #[schema(example = "INR")]
    pub currency: Option<String>,
    pub receipt: Option<String>,
}

/// Payment verification request, field names fixed by the gateway widget
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, message = "Missing payment details"))]
    pub razorpay_order_id: String,
    #[validate(length(min = 1, message = "Missing payment details"))]
    pub razorpay_payment_id: String,
    #[validate(length(min = 1, message = "Missing payment details"))]
    pub razorpay_signature: String,
    #[serde(rename = "orderData")]
    pub order_data: OrderDraft,
}

/// Admin status update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1, message = "Order id is required"))]
    pub order_id: String,
    #[schema(example = "Out for delivery")]
    pub status: String,
}

/// Id of a newly recorded order
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    pub order_id: Uuid,
}

/// Routes that act on the caller's own orders (require a session)
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/place", post(place_order))
        .route("/razorpay", post(create_payment_order))
        .route("/razorpay/verify", post(verify_payment))
        .route("/userorders", post(user_orders))
}

/// Admin panel routes
pub fn order_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_orders))
        .route("/status", post(update_status))
}

/// Place an unpaid order and empty the cart
#[utoipa::path(
    post,
    path = "/api/order/place",
    tag = "Orders",
    request_body = OrderDraft,
    responses(
        (status = 200, description = "Order placed", body = OrderCreatedResponse),
        (status = 400, description = "Invalid order"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn place_order(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(draft): ValidatedJson<OrderDraft>,
) -> AppResult<Json<ApiResponse<OrderCreatedResponse>>> {
    let order = state.order_service.place_order(&current_user.id, draft).await?;

    Ok(Json(ApiResponse::with_message(
        OrderCreatedResponse { order_id: order.id },
        "Order Placed",
    )))
}

/// Create a gateway order for the browser checkout widget
#[utoipa::path(
    post,
    path = "/api/order/razorpay",
    tag = "Orders",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Gateway order created", body = PaymentOrder),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Gateway request failed"),
        (status = 501, description = "Payment gateway is not configured")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_payment_order(
    State(state): State<AppState>,
    Extension(_current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreatePaymentRequest>,
) -> AppResult<Json<ApiResponse<PaymentOrder>>> {
    let order = state
        .order_service
        .create_payment_order(payload.amount, payload.currency, payload.receipt)
        .await?;

    Ok(Json(ApiResponse::success(order)))
}

/// Verify a gateway payment and record the paid order
#[utoipa::path(
    post,
    path = "/api/order/razorpay/verify",
    tag = "Orders",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified and order recorded", body = OrderCreatedResponse),
        (status = 400, description = "Payment verification failed"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn verify_payment(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<VerifyPaymentRequest>,
) -> AppResult<Json<ApiResponse<OrderCreatedResponse>>> {
    let confirmation = PaymentConfirmation {
        order_id: payload.razorpay_order_id,
        payment_id: payload.razorpay_payment_id,
        signature: payload.razorpay_signature,
    };

    let order = state
        .order_service
        .verify_payment(&current_user.id, confirmation, payload.order_data)
        .await?;

    Ok(Json(ApiResponse::with_message(
        OrderCreatedResponse { order_id: order.id },
        "Payment verified successfully",
    )))
}

/// List the caller's orders
#[utoipa::path(
    post,
    path = "/api/order/userorders",
    tag = "Orders",
    responses(
        (status = 200, description = "Caller's orders, newest first", body = [Order]),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn user_orders(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = state.order_service.user_orders(&current_user.id).await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// List every order (admin)
#[utoipa::path(
    get,
    path = "/api/order/list",
    tag = "Orders",
    responses(
        (status = 200, description = "All orders, newest first", body = [Order])
    )
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = state.order_service.list_orders().await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// Set an order's fulfilment status (admin)
#[utoipa::path(
    post,
    path = "/api/order/status",
    tag = "Orders",
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Order),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let status = OrderStatus::parse(payload.status.trim())
        .ok_or_else(|| AppError::validation("Please provide a valid status"))?;
    let id = Uuid::parse_str(payload.order_id.trim()).map_err(|_| AppError::not_found("Order"))?;

    let order = state.order_service.update_status(id, status).await?;

    Ok(Json(ApiResponse::with_message(order, "Status Updated")))
}
