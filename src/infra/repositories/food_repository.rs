//! Food catalog repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::entities::food_item::{self, ActiveModel, Entity as FoodEntity};
use crate::domain::{FoodItem, NewFood};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Food repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FoodRepository: Send + Sync {
    /// Insert a menu item with its stored image reference
    async fn create(&self, food: NewFood, image: String) -> AppResult<FoodItem>;

    /// List every menu item
    async fn list(&self) -> AppResult<Vec<FoodItem>>;

    /// Find a menu item by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FoodItem>>;

    /// Delete a menu item. Returns false when nothing was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// SeaORM implementation of FoodRepository
pub struct FoodStore {
    db: DatabaseConnection,
}

impl FoodStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoodRepository for FoodStore {
    async fn create(&self, food: NewFood, image: String) -> AppResult<FoodItem> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(food.name),
            description: Set(food.description),
            price: Set(food.price),
            category: Set(food.category),
            image: Set(image),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(FoodItem::from(model))
    }

    async fn list(&self) -> AppResult<Vec<FoodItem>> {
        let models = FoodEntity::find()
            .order_by_asc(food_item::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(FoodItem::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FoodItem>> {
        let result = FoodEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(FoodItem::from))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = FoodEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
