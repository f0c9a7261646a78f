//! Session authentication middleware.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, LEGACY_TOKEN_HEADER};
use crate::errors::AppError;

/// Authenticated caller, keyed by the identity provider's subject id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
}

/// Extract the session token from `Authorization: Bearer` or the legacy
/// `token` header.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        return value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix(BEARER_TOKEN_PREFIX))
            .map(str::trim)
            .filter(|t| !t.is_empty());
    }

    headers
        .get(LEGACY_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Session authentication middleware.
///
/// Verifies the session token with the identity provider, then injects
/// the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(request.headers()).ok_or(AppError::Unauthorized)?;

    let identity = state.identity.verify(token).await?;

    request.extensions_mut().insert(CurrentUser {
        id: identity.subject,
    });

    Ok(next.run(request).await)
}
