//! HTTP request handlers.

pub mod cart_handler;
pub mod contact_handler;
pub mod food_handler;
pub mod order_handler;
pub mod user_handler;

pub use cart_handler::cart_routes;
pub use contact_handler::contact_routes;
pub use food_handler::food_routes;
pub use order_handler::{order_admin_routes, order_routes};
pub use user_handler::user_routes;
