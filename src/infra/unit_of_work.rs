//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the transactions that span
//! more than one table. Checkout is the one workflow that needs this:
//! the order row and the owner's emptied cart must land together.

use async_trait::async_trait;
use sea_orm::{AccessMode, DatabaseConnection, IsolationLevel, TransactionTrait};
use std::sync::Arc;

use super::repositories::{
    clear_cart_on, insert_order_on, ContactRepository, ContactStore, FoodRepository, FoodStore,
    OrderRepository, OrderStore, UserRepository, UserStore,
};
use crate::domain::{NewOrder, Order};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and the atomic
/// checkout workflow.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get food repository
    fn foods(&self) -> Arc<dyn FoodRepository>;

    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get order repository
    fn orders(&self) -> Arc<dyn OrderRepository>;

    /// Get contact message repository
    fn contacts(&self) -> Arc<dyn ContactRepository>;

    /// Persist an order and empty its owner's cart in one transaction.
    async fn checkout(&self, order: NewOrder) -> AppResult<Order>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    food_repo: Arc<FoodStore>,
    user_repo: Arc<UserStore>,
    order_repo: Arc<OrderStore>,
    contact_repo: Arc<ContactStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            food_repo: Arc::new(FoodStore::new(db.clone())),
            user_repo: Arc::new(UserStore::new(db.clone())),
            order_repo: Arc::new(OrderStore::new(db.clone())),
            contact_repo: Arc::new(ContactStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn foods(&self) -> Arc<dyn FoodRepository> {
        self.food_repo.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.order_repo.clone()
    }

    fn contacts(&self) -> Arc<dyn ContactRepository> {
        self.contact_repo.clone()
    }

    async fn checkout(&self, order: NewOrder) -> AppResult<Order> {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let user_id = order.user_id.clone();
        let result = async {
            let saved = insert_order_on(&txn, order).await?;
            clear_cart_on(&txn, &user_id).await?;
            Ok::<_, AppError>(saved)
        }
        .await;

        match result {
            Ok(saved) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(saved)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}
