//! Contact form messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Topic picked on the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContactCategory {
    General,
    Order,
    Delivery,
    Payment,
    Technical,
    Feedback,
    Partnership,
}

impl ContactCategory {
    pub const ALL: [ContactCategory; 7] = [
        ContactCategory::General,
        ContactCategory::Order,
        ContactCategory::Delivery,
        ContactCategory::Payment,
        ContactCategory::Technical,
        ContactCategory::Feedback,
        ContactCategory::Partnership,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactCategory::General => "general",
            ContactCategory::Order => "order",
            ContactCategory::Delivery => "delivery",
            ContactCategory::Payment => "payment",
            ContactCategory::Technical => "technical",
            ContactCategory::Feedback => "feedback",
            ContactCategory::Partnership => "partnership",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Handling state of a message.
///
/// Any state may be set from any other state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ContactStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    Closed,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::Pending,
        ContactStatus::InProgress,
        ContactStatus::Resolved,
        ContactStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::InProgress => "in-progress",
            ContactStatus::Resolved => "resolved",
            ContactStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Validated contact form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub category: ContactCategory,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub message: String,
}

impl NewContact {
    /// Trim text fields and lowercase the email.
    pub fn new(
        category: ContactCategory,
        full_name: &str,
        email: &str,
        mobile: Option<&str>,
        message: &str,
    ) -> Self {
        Self {
            category,
            full_name: full_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            mobile: mobile.map(str::trim).unwrap_or_default().to_string(),
            message: message.trim().to_string(),
        }
    }
}

/// Persisted contact message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub category: ContactCategory,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_value(ContactStatus::InProgress).unwrap(), json!("in-progress"));
        assert_eq!(ContactStatus::parse("in-progress"), Some(ContactStatus::InProgress));
        assert_eq!(ContactStatus::parse("archived"), None);
        assert_eq!(ContactStatus::default(), ContactStatus::Pending);
    }

    #[test]
    fn test_category_parse() {
        for category in ContactCategory::ALL {
            assert_eq!(ContactCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(ContactCategory::parse("spam"), None);
    }

    #[test]
    fn test_new_contact_normalizes() {
        let contact = NewContact::new(
            ContactCategory::Feedback,
            "  Ravi Kumar ",
            " Ravi@Example.COM ",
            None,
            " Great food! ",
        );
        assert_eq!(contact.full_name, "Ravi Kumar");
        assert_eq!(contact.email, "ravi@example.com");
        assert_eq!(contact.mobile, "");
        assert_eq!(contact.message, "Great food!");
    }
}
