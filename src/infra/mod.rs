//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Clients for the identity provider, payment gateway and image CDN
//! - Unit of Work for transaction management

pub mod clients;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use clients::{
    ClerkVerifier, CloudinaryStore, GatewayOrder, Identity, IdentityProvider, ImageStore,
    ImageUpload, LocalImageStore, PaymentGateway, RazorpayClient,
};
pub use db::{Database, MigrationState, Migrator};
pub use repositories::{
    ContactRepository, ContactStore, FoodRepository, FoodStore, OrderRepository, OrderStore,
    UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use clients::{MockImageStore, MockPaymentGateway};
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockContactRepository, MockFoodRepository, MockOrderRepository, MockUserRepository,
};
