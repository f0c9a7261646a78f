//! Application route configuration.

use axum::{
    extract::State,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method, StatusCode,
    },
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    cart_routes, contact_routes, food_routes, order_admin_routes, order_routes, user_routes,
};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::{IMAGES_ROUTE, LEGACY_TOKEN_HEADER};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let auth = || middleware::from_fn_with_state(state.clone(), auth_middleware);

    let api = Router::new()
        // Menu and admin panel routes are public
        .nest("/food", food_routes())
        .nest("/user", user_routes().route_layer(auth()))
        .nest("/cart", cart_routes().route_layer(auth()))
        .nest(
            "/order",
            order_routes()
                .route_layer(auth())
                .merge(order_admin_routes()),
        )
        .merge(contact_routes());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .nest_service(IMAGES_ROUTE, ServeDir::new(&state.images_dir))
        // Global middleware
        .layer(cors_layer(&state.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the storefront and admin origins, with credentials
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static(LEGACY_TOKEN_HEADER),
        ])
}

/// Root endpoint
async fn root() -> &'static str {
    "API Working"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
    environment: String,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_status = match &state.database {
        Some(database) => match database.ping().await {
            Ok(_) => ServiceStatus {
                status: "connected",
                error: None,
            },
            Err(e) => ServiceStatus {
                status: "disconnected",
                error: Some(e.to_string()),
            },
        },
        None => ServiceStatus {
            status: "disconnected",
            error: Some("no database configured".to_string()),
        },
    };

    let healthy = db_status.status == "connected";

    let response = HealthResponse {
        status: if healthy { "OK" } else { "DEGRADED" },
        timestamp: chrono::Utc::now(),
        environment: state.environment.clone(),
        services: ServiceHealth {
            database: db_status,
        },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
