//! Contact message repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::entities::contact_message::{self, ActiveModel, Entity as ContactEntity};
use crate::domain::{ContactMessage, ContactStatus, NewContact};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Contact repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Store a new message with status `pending`
    async fn create(&self, contact: NewContact) -> AppResult<ContactMessage>;

    /// List all messages, newest first
    async fn list(&self) -> AppResult<Vec<ContactMessage>>;

    /// Find a message by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContactMessage>>;

    /// Set the handling status. Returns None if no message matches.
    async fn update_status(&self, id: Uuid, status: ContactStatus)
        -> AppResult<Option<ContactMessage>>;

    /// Delete a message. Returns false when nothing was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Concrete implementation of ContactRepository
pub struct ContactStore {
    db: DatabaseConnection,
}

impl ContactStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactRepository for ContactStore {
    async fn create(&self, contact: NewContact) -> AppResult<ContactMessage> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            category: Set(contact.category.as_str().to_string()),
            full_name: Set(contact.full_name),
            email: Set(contact.email),
            mobile: Set(contact.mobile),
            message: Set(contact.message),
            status: Set(ContactStatus::default().as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(ContactMessage::from(model))
    }

    async fn list(&self) -> AppResult<Vec<ContactMessage>> {
        let models = ContactEntity::find()
            .order_by_desc(contact_message::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ContactMessage::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContactMessage>> {
        let result = ContactEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ContactMessage::from))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ContactStatus,
    ) -> AppResult<Option<ContactMessage>> {
        let Some(existing) = ContactEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(ContactMessage::from(model)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = ContactEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
