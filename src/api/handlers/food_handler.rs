//! Food catalog handlers.

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::UPLOAD_BODY_LIMIT_BYTES;
use crate::domain::FoodResponse;
use crate::errors::{AppError, AppResult};
use crate::services::{FoodSubmission, UploadedFile};
use crate::types::ApiResponse;

/// Multipart form accepted by `/api/food/add` (documentation only)
#[derive(Debug, ToSchema)]
pub struct AddFoodForm {
    #[schema(example = "Veg Salad")]
    pub name: String,
    pub description: String,
    #[schema(example = "18")]
    pub price: String,
    #[schema(example = "Salad")]
    pub category: String,
    /// JPEG or PNG, at most 5 MB
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Remove food request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RemoveFoodRequest {
    #[validate(length(min = 1, message = "Food id is required"))]
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,
}

/// Create food catalog routes
pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/add",
            post(add_food).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT_BYTES)),
        )
        .route("/list", get(list_foods))
        .route("/remove", post(remove_food))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::validation("Image must be 5 MB or smaller")
    } else {
        AppError::BadRequest(e.body_text())
    }
}

/// Add a menu item
#[utoipa::path(
    post,
    path = "/api/food/add",
    tag = "Food",
    request_body(content = AddFoodForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Food added", body = FoodResponse),
        (status = 400, description = "Missing or invalid image or fields")
    )
)]
pub async fn add_food(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<FoodResponse>>> {
    let mut submission = FoodSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                submission.image = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "name" => submission.name = field.text().await.map_err(multipart_error)?,
            "description" => submission.description = field.text().await.map_err(multipart_error)?,
            "price" => submission.price = field.text().await.map_err(multipart_error)?,
            "category" => submission.category = field.text().await.map_err(multipart_error)?,
            _ => {}
        }
    }

    let item = state.food_service.add_food(submission).await?;

    Ok(Json(ApiResponse::with_message(
        FoodResponse::from(item),
        "Food Added",
    )))
}

/// List the whole menu
#[utoipa::path(
    get,
    path = "/api/food/list",
    tag = "Food",
    responses(
        (status = 200, description = "Every menu item", body = [FoodResponse])
    )
)]
pub async fn list_foods(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<FoodResponse>>>> {
    let items = state.food_service.list_foods().await?;

    Ok(Json(ApiResponse::success(
        items.into_iter().map(FoodResponse::from).collect(),
    )))
}

/// Remove a menu item and its image
#[utoipa::path(
    post,
    path = "/api/food/remove",
    tag = "Food",
    request_body = RemoveFoodRequest,
    responses(
        (status = 200, description = "Food removed"),
        (status = 404, description = "Food item not found")
    )
)]
pub async fn remove_food(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RemoveFoodRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = Uuid::parse_str(payload.id.trim()).map_err(|_| AppError::not_found("Food item"))?;

    state.food_service.remove_food(id).await?;

    Ok(Json(ApiResponse::message("Food Removed")))
}
