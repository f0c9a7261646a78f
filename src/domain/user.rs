//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Cart;
use crate::config::DEFAULT_USER_NAME;

/// User domain entity, keyed by the identity provider's subject id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub name: String,
    pub email: String,
    pub profile_picture: String,
    pub cart: Cart,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile data the storefront sends when a session starts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
}

impl ProfileInput {
    /// Drop blank values so they never overwrite stored data.
    pub fn normalized(self) -> Self {
        fn keep(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            name: keep(self.name),
            email: keep(self.email),
            profile_picture: keep(self.profile_picture),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.profile_picture.is_none()
    }
}

/// Fields of a user record about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub external_id: String,
    pub name: String,
    pub email: String,
    pub profile_picture: String,
}

impl NewUser {
    /// First-sight record: missing fields fall back to defaults.
    pub fn from_profile(external_id: impl Into<String>, profile: ProfileInput) -> Self {
        let profile = profile.normalized();
        Self {
            external_id: external_id.into(),
            name: profile.name.unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            email: profile.email.unwrap_or_default(),
            profile_picture: profile.profile_picture.unwrap_or_default(),
        }
    }
}

impl User {
    /// Apply the provided profile fields that differ from the stored ones.
    ///
    /// Returns the normalized set of changes (empty when nothing differs).
    pub fn profile_changes(&self, profile: ProfileInput) -> ProfileInput {
        let profile = profile.normalized();
        ProfileInput {
            name: profile.name.filter(|n| *n != self.name),
            email: profile.email.filter(|e| *e != self.email),
            profile_picture: profile.profile_picture.filter(|p| *p != self.profile_picture),
        }
    }
}

/// User profile response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Internal user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Identity provider subject id
    #[schema(example = "user_2abc123")]
    pub clerk_id: String,
    /// Display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// Email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Avatar URL
    pub profile_picture: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            clerk_id: user.external_id,
            name: user.name,
            email: user.email,
            profile_picture: user.profile_picture,
        }
    }
}
