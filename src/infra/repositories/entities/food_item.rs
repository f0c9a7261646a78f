//! Food item database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::FoodItem;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "food_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    pub category: String,
    pub image: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for FoodItem {
    fn from(model: Model) -> Self {
        FoodItem {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            image: model.image,
            created_at: model.created_at,
        }
    }
}
