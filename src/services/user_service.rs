//! User service - Handles user-related business logic.
//!
//! Users are provisioned lazily: the storefront calls `create` after every
//! sign-in and the record is created on first sight.

use async_trait::async_trait;
use sea_orm::SqlErr;
use std::sync::Arc;

use crate::domain::{NewUser, ProfileInput, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Return the caller's record, creating or refreshing it from `profile`
    async fn create_or_get(&self, subject: &str, profile: ProfileInput) -> AppResult<User>;

    /// Get the caller's profile
    async fn get_profile(&self, subject: &str) -> AppResult<User>;

    /// Update the non-empty provided profile fields
    async fn update_profile(&self, subject: &str, profile: ProfileInput) -> AppResult<User>;
}

fn is_unique_violation(err: &AppError) -> bool {
    match err {
        AppError::Conflict(_) => true,
        AppError::Database(db_err) => {
            matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        }
        _ => false,
    }
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_or_get(&self, subject: &str, profile: ProfileInput) -> AppResult<User> {
        let users = self.uow.users();

        if let Some(existing) = users.find_by_external_id(subject).await? {
            let changes = existing.profile_changes(profile);
            if changes.is_empty() {
                return Ok(existing);
            }
            return users
                .update_profile(subject, changes)
                .await?
                .ok_or_not_found("User");
        }

        match users.create(NewUser::from_profile(subject, profile)).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, subject, "User created");
                Ok(user)
            }
            // A concurrent first request inserted the row
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(subject, "User created concurrently, re-reading");
                users
                    .find_by_external_id(subject)
                    .await?
                    .ok_or_else(|| AppError::conflict("User"))
            }
            Err(e) => Err(e),
        }
    }

    async fn get_profile(&self, subject: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_external_id(subject)
            .await?
            .ok_or_not_found("User profile")
    }

    async fn update_profile(&self, subject: &str, profile: ProfileInput) -> AppResult<User> {
        let changes = profile.normalized();
        if changes.is_empty() {
            return self.get_profile(subject).await;
        }

        self.uow
            .users()
            .update_profile(subject, changes)
            .await?
            .ok_or_not_found("User profile")
    }
}
