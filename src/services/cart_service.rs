//! Cart service - Per-user item quantities.
//!
//! Each operation reads the whole cart document, changes it in memory and
//! writes it back. Concurrent updates for the same user are last-write-wins.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Cart, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Cart service trait for dependency injection.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Increment the quantity of an item
    async fn add_to_cart(&self, subject: &str, item_id: &str) -> AppResult<Cart>;

    /// Decrement the quantity of an item, dropping it at zero
    async fn remove_from_cart(&self, subject: &str, item_id: &str) -> AppResult<Cart>;

    /// Get the full cart
    async fn get_cart(&self, subject: &str) -> AppResult<Cart>;
}

/// Concrete implementation of CartService using Unit of Work.
pub struct CartManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CartManager<U> {
    /// Create new cart service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn load_user(&self, subject: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_external_id(subject)
            .await?
            .ok_or_not_found("User")
    }
}

fn require_item_id(item_id: &str) -> AppResult<&str> {
    let item_id = item_id.trim();
    if item_id.is_empty() {
        return Err(AppError::validation("Item id is required"));
    }
    Ok(item_id)
}

#[async_trait]
impl<U: UnitOfWork> CartService for CartManager<U> {
    async fn add_to_cart(&self, subject: &str, item_id: &str) -> AppResult<Cart> {
        let item_id = require_item_id(item_id)?;
        let mut cart = self.load_user(subject).await?.cart;

        let quantity = cart.add(item_id);
        self.uow.users().save_cart(subject, &cart).await?;

        tracing::debug!(subject, item_id, quantity, "Added to cart");
        Ok(cart)
    }

    async fn remove_from_cart(&self, subject: &str, item_id: &str) -> AppResult<Cart> {
        let item_id = require_item_id(item_id)?;
        let mut cart = self.load_user(subject).await?.cart;

        if cart.quantity(item_id) == 0 {
            return Ok(cart);
        }

        let quantity = cart.remove(item_id);
        self.uow.users().save_cart(subject, &cart).await?;

        tracing::debug!(subject, item_id, quantity, "Removed from cart");
        Ok(cart)
    }

    async fn get_cart(&self, subject: &str) -> AppResult<Cart> {
        Ok(self.load_user(subject).await?.cart)
    }
}
