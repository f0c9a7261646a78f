//! Contact message database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{ContactCategory, ContactMessage, ContactStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category: String,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for ContactMessage {
    fn from(model: Model) -> Self {
        ContactMessage {
            id: model.id,
            category: ContactCategory::parse(&model.category).unwrap_or(ContactCategory::General),
            full_name: model.full_name,
            email: model.email,
            mobile: model.mobile,
            message: model.message,
            status: ContactStatus::parse(&model.status).unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
