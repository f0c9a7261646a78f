//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod contact_message;
pub mod food_item;
pub mod order;
pub mod user;
