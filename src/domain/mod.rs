//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns:
//! the menu, users with their embedded carts, orders, contact
//! messages, and the payment rules used at checkout.

pub mod cart;
pub mod contact;
pub mod food;
pub mod order;
pub mod payment;
pub mod user;

pub use cart::Cart;
pub use contact::{ContactCategory, ContactMessage, ContactStatus, NewContact};
pub use food::{FoodItem, FoodResponse, NewFood};
pub use order::{
    DeliveryAddress, NewOrder, Order, OrderDraft, OrderItem, OrderStatus, PaymentReceipt,
};
pub use user::{NewUser, ProfileInput, User, UserResponse};
