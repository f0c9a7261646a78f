//! Order database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{DeliveryAddress, Order, OrderItem, OrderStatus};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Identity provider subject id of the customer
    pub user_id: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: Json,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "JsonBinary")]
    pub address: Json,
    pub status: String,
    pub payment: bool,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Fails only if a stored JSON document no longer matches the domain shape.
impl TryFrom<Model> for Order {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let items: Vec<OrderItem> = serde_json::from_value(model.items)?;
        let address: DeliveryAddress = serde_json::from_value(model.address)?;

        Ok(Order {
            id: model.id,
            user_id: model.user_id,
            items,
            amount: model.amount,
            address,
            status: OrderStatus::parse(&model.status).unwrap_or_default(),
            payment: model.payment,
            razorpay_order_id: model.razorpay_order_id,
            razorpay_payment_id: model.razorpay_payment_id,
            created_at: model.created_at,
        })
    }
}
