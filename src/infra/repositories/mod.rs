//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod contact_repository;
pub(crate) mod entities;
mod food_repository;
mod order_repository;
mod user_repository;

pub use contact_repository::{ContactRepository, ContactStore};
pub use food_repository::{FoodRepository, FoodStore};
pub use order_repository::{OrderRepository, OrderStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use order_repository::insert_order_on;
pub(crate) use user_repository::clear_cart_on;

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use contact_repository::MockContactRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use food_repository::MockFoodRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use order_repository::MockOrderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
