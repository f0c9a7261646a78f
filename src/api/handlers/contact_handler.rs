//! Contact form and admin triage handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::ContactMessage;
use crate::errors::{AppError, AppResult};
use crate::services::ContactSubmission;
use crate::types::{ApiResponse, Created};

/// Contact form submission
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    #[schema(example = "feedback")]
    pub category: Option<String>,
    #[schema(example = "Ravi Kumar")]
    pub full_name: Option<String>,
    #[schema(example = "ravi@example.com")]
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub message: Option<String>,
}

/// Contact status update request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateContactStatusRequest {
    #[schema(example = "in-progress")]
    pub status: Option<String>,
}

/// Create contact routes
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(submit_contact))
        .route("/contacts", get(list_contacts))
        .route("/contacts/:id", get(get_contact).delete(delete_contact))
        .route("/contacts/:id/status", put(update_contact_status))
}

fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::not_found("Contact message"))
}

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message received", body = ContactMessage),
        (status = 400, description = "Missing fields, invalid email or category")
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ContactRequest>,
) -> AppResult<Created<ContactMessage>> {
    let submission = ContactSubmission {
        category: payload.category,
        full_name: payload.full_name,
        email: payload.email,
        mobile: payload.mobile,
        message: payload.message,
    };

    let message = state.contact_service.submit(submission).await?;

    Ok(Created(ApiResponse::with_message(
        message,
        "Thank you for contacting us! We'll get back to you soon.",
    )))
}

/// List contact messages (admin)
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contact",
    responses(
        (status = 200, description = "All messages, newest first", body = [ContactMessage])
    )
)]
pub async fn list_contacts(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ContactMessage>>>> {
    let messages = state.contact_service.list_messages().await?;
    Ok(Json(ApiResponse::success(messages)))
}

/// Get one contact message (admin)
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    tag = "Contact",
    params(("id" = String, Path, description = "Contact message id")),
    responses(
        (status = 200, description = "Contact message", body = ContactMessage),
        (status = 404, description = "Contact message not found")
    )
)]
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ContactMessage>>> {
    let message = state.contact_service.get_message(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::success(message)))
}

/// Set a contact message's status (admin)
#[utoipa::path(
    put,
    path = "/api/contacts/{id}/status",
    tag = "Contact",
    params(("id" = String, Path, description = "Contact message id")),
    request_body = UpdateContactStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ContactMessage),
        (status = 400, description = "Please provide a valid status"),
        (status = 404, description = "Contact message not found")
    )
)]
pub async fn update_contact_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateContactStatusRequest>,
) -> AppResult<Json<ApiResponse<ContactMessage>>> {
    let id = parse_id(&id)?;
    let message = state
        .contact_service
        .update_status(id, payload.status.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(ApiResponse::with_message(
        message,
        "Contact status updated successfully",
    )))
}

/// Delete a contact message (admin)
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contact",
    params(("id" = String, Path, description = "Contact message id")),
    responses(
        (status = 200, description = "Message deleted"),
        (status = 404, description = "Contact message not found")
    )
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.contact_service.delete_message(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::message("Contact message deleted successfully")))
}
