//! User profile handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ProfileInput, UserResponse};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Profile data sent by the storefront after sign-in
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserRequest {
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    pub profile_picture: Option<String>,
}

/// Profile update request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfileRequest {
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    pub profile_picture: Option<String>,
}

/// Create user routes (all require a session)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_user))
        .route("/profile", get(get_profile).put(update_profile))
}

/// Create the caller's record on first sight, or return it
#[utoipa::path(
    post,
    path = "/api/user/create",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "User already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let profile = ProfileInput {
        name: payload.name,
        email: payload.email,
        profile_picture: payload.profile_picture,
    };

    let user = state
        .user_service
        .create_or_get(&current_user.id, profile)
        .await?;

    Ok(Json(ApiResponse::with_message(
        UserResponse::from(user),
        "User ready",
    )))
}

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/user/profile",
    tag = "Users",
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User profile not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_profile(&current_user.id).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// Update the caller's name or picture
#[utoipa::path(
    put,
    path = "/api/user/profile",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User profile not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let changes = ProfileInput {
        name: payload.name,
        email: None,
        profile_picture: payload.profile_picture,
    };

    let user = state
        .user_service
        .update_profile(&current_user.id, changes)
        .await?;

    Ok(Json(ApiResponse::with_message(
        UserResponse::from(user),
        "Profile updated successfully",
    )))
}
