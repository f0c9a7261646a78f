//! Use cases behind each route group: menu, users, carts, orders and contact.
//!
//! Every manager is generic over [`UnitOfWork`](crate::infra::UnitOfWork)
//! and is exposed to handlers as a trait object.

mod cart_service;
mod contact_service;
pub mod container;
mod food_service;
mod order_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use container::{ServiceContainer, Services};

pub use cart_service::{CartManager, CartService};
pub use contact_service::{ContactManager, ContactService, ContactSubmission};
pub use food_service::{sanitize_filename, FoodManager, FoodService, FoodSubmission, UploadedFile};
pub use order_service::{OrderManager, OrderService, PaymentConfirmation, PaymentOrder};
pub use user_service::{UserManager, UserService};

