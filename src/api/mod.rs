//! HTTP surface of the storefront and admin panel.
//!
//! Routes live under `/api`, guarded per group by the session middleware;
//! uploaded images are served from `/images` and the OpenAPI document
//! from `/api-docs/openapi.json`.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
