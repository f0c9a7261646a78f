//! Tomato API - backend for a food-ordering storefront and its admin panel.
//!
//! Serves the menu catalog, per-user carts, checkout (cash on delivery or
//! Razorpay), order fulfilment and the public contact form.
//!
//! Request flow: [`api`] handlers call the use cases in [`services`], which
//! work on [`domain`] types and reach PostgreSQL and the external providers
//! (Clerk, Razorpay, Cloudinary) through the traits in [`infra`]. Every
//! response is wrapped in the [`types::ApiResponse`] envelope, and failures
//! are mapped to status codes by [`errors::AppError`].
//!
//! ```bash
//! tomato-api migrate up
//! tomato-api serve --port 4000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
