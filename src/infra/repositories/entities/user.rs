//! User database entity for SeaORM.
//!
//! The cart is embedded as a JSONB document, mirroring the
//! item-id → quantity map the storefront works with.

use sea_orm::entity::prelude::*;

use crate::domain::{Cart, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Identity provider subject id
    #[sea_orm(unique)]
    pub external_id: String,
    pub name: String,
    pub email: String,
    pub profile_picture: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub cart_data: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            external_id: model.external_id,
            name: model.name,
            email: model.email,
            profile_picture: model.profile_picture,
            cart: Cart::from_document(&model.cart_data),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
