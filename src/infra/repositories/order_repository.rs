//! Order repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::order::{self, ActiveModel, Entity as OrderEntity};
use crate::domain::{NewOrder, Order, OrderStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order repository trait for dependency injection.
///
/// Orders are created through `UnitOfWork::checkout` so the owner's
/// cart is cleared in the same transaction.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// List all orders, newest first
    async fn list(&self) -> AppResult<Vec<Order>>;

    /// List orders placed by one customer, newest first
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Order>>;

    /// Set the fulfilment status. Returns None if no order matches.
    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Option<Order>>;
}

/// Concrete implementation of OrderRepository
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Insert an order on any connection or transaction.
pub(crate) async fn insert_order_on<C: ConnectionTrait>(conn: &C, new_order: NewOrder) -> AppResult<Order> {
    let (razorpay_order_id, razorpay_payment_id) = match &new_order.payment {
        Some(receipt) => (
            Some(receipt.gateway_order_id.clone()),
            Some(receipt.gateway_payment_id.clone()),
        ),
        None => (None, None),
    };

    let active_model = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(new_order.user_id),
        items: Set(serde_json::to_value(&new_order.draft.items)?),
        amount: Set(new_order.draft.amount),
        address: Set(serde_json::to_value(&new_order.draft.address)?),
        status: Set(OrderStatus::default().to_string()),
        payment: Set(new_order.payment.is_some()),
        razorpay_order_id: Set(razorpay_order_id),
        razorpay_payment_id: Set(razorpay_payment_id),
        created_at: Set(chrono::Utc::now()),
    };

    let model = active_model.insert(conn).await.map_err(AppError::from)?;
    Order::try_from(model)
}

fn into_orders(models: Vec<order::Model>) -> AppResult<Vec<Order>> {
    models.into_iter().map(Order::try_from).collect()
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn list(&self) -> AppResult<Vec<Order>> {
        let models = OrderEntity::find()
            .order_by_desc(order::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        into_orders(models)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Order>> {
        let models = OrderEntity::find()
            .filter(order::Column::UserId.eq(user_id))
            .order_by_desc(order::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        into_orders(models)
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Option<Order>> {
        let Some(existing) = OrderEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.status = Set(status.to_string());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Order::try_from(model).map(Some)
    }
}
