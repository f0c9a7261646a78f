//! User repository implementation.
//!
//! Users are looked up by the identity provider's subject id; the
//! internal UUID never leaves the backend except in profile responses.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{Cart, NewUser, ProfileInput, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by identity provider subject id
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<User>>;

    /// Create a new user with an empty cart
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Overwrite the provided profile fields. Returns None if no user matches.
    async fn update_profile(&self, external_id: &str, changes: ProfileInput)
        -> AppResult<Option<User>>;

    /// Replace the stored cart document
    async fn save_cart(&self, external_id: &str, cart: &Cart) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Empty the cart of `external_id` on any connection or transaction.
pub(crate) async fn clear_cart_on<C: ConnectionTrait>(conn: &C, external_id: &str) -> AppResult<()> {
    UserEntity::update_many()
        .col_expr(user::Column::CartData, Expr::value(Cart::new().to_document()))
        .col_expr(user::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(user::Column::ExternalId.eq(external_id))
        .exec(conn)
        .await
        .map_err(AppError::from)?;
    Ok(())
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::ExternalId.eq(external_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            external_id: Set(new_user.external_id),
            name: Set(new_user.name),
            email: Set(new_user.email),
            profile_picture: Set(new_user.profile_picture),
            cart_data: Set(Cart::new().to_document()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update_profile(
        &self,
        external_id: &str,
        changes: ProfileInput,
    ) -> AppResult<Option<User>> {
        let Some(existing) = UserEntity::find()
            .filter(user::Column::ExternalId.eq(external_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(picture) = changes.profile_picture {
            active.profile_picture = Set(picture);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(User::from(model)))
    }

    async fn save_cart(&self, external_id: &str, cart: &Cart) -> AppResult<()> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::CartData, Expr::value(cart.to_document()))
            .col_expr(user::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(user::Column::ExternalId.eq(external_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("User"));
        }

        Ok(())
    }
}
