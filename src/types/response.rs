use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Standard `{ success, message?, data? }` envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// 201 response carrying the envelope
pub struct Created<T: Serialize>(pub ApiResponse<T>);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_omits_absent_parts() {
        assert_eq!(
            serde_json::to_value(ApiResponse::message("Food Removed")).unwrap(),
            json!({"success": true, "message": "Food Removed"})
        );
        assert_eq!(
            serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap(),
            json!({"success": true, "data": [1, 2]})
        );
    }

    #[test]
    fn test_created_status() {
        let response = Created(ApiResponse::with_message(1, "Saved")).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
