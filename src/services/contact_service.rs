//! Contact service - Contact form intake and admin triage.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::domain::{ContactCategory, ContactMessage, ContactStatus, NewContact};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Contact form fields as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub category: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub message: Option<String>,
}

/// Contact service trait for dependency injection.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Validate and store a contact form submission
    async fn submit(&self, submission: ContactSubmission) -> AppResult<ContactMessage>;

    /// All messages, newest first
    async fn list_messages(&self) -> AppResult<Vec<ContactMessage>>;

    /// Get one message
    async fn get_message(&self, id: Uuid) -> AppResult<ContactMessage>;

    /// Set the handling status from its wire name
    async fn update_status(&self, id: Uuid, status: &str) -> AppResult<ContactMessage>;

    /// Delete a message
    async fn delete_message(&self, id: Uuid) -> AppResult<()>;
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Concrete implementation of ContactService using Unit of Work.
pub struct ContactManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ContactManager<U> {
    /// Create new contact service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ContactService for ContactManager<U> {
    async fn submit(&self, submission: ContactSubmission) -> AppResult<ContactMessage> {
        let (Some(category), Some(full_name), Some(email), Some(message)) = (
            required(&submission.category),
            required(&submission.full_name),
            required(&submission.email),
            required(&submission.message),
        ) else {
            return Err(AppError::validation("Please fill in all required fields"));
        };

        if !email.to_string().validate_email() {
            return Err(AppError::validation("Please enter a valid email address"));
        }

        let category = ContactCategory::parse(&category.to_ascii_lowercase())
            .ok_or_else(|| AppError::validation("Please select a valid category"))?;

        let contact = NewContact::new(
            category,
            full_name,
            email,
            submission.mobile.as_deref(),
            message,
        );

        let saved = self.uow.contacts().create(contact).await?;
        tracing::info!(contact_id = %saved.id, category = saved.category.as_str(), "Contact message received");
        Ok(saved)
    }

    async fn list_messages(&self) -> AppResult<Vec<ContactMessage>> {
        self.uow.contacts().list().await
    }

    async fn get_message(&self, id: Uuid) -> AppResult<ContactMessage> {
        self.uow
            .contacts()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Contact message")
    }

    async fn update_status(&self, id: Uuid, status: &str) -> AppResult<ContactMessage> {
        let status = ContactStatus::parse(status.trim())
            .ok_or_else(|| AppError::validation("Please provide a valid status"))?;

        self.uow
            .contacts()
            .update_status(id, status)
            .await?
            .ok_or_not_found("Contact message")
    }

    async fn delete_message(&self, id: Uuid) -> AppResult<()> {
        if !self.uow.contacts().delete(id).await? {
            return Err(AppError::not_found("Contact message"));
        }
        tracing::info!(contact_id = %id, "Contact message deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockContactRepository;
    use crate::services::test_support::TestUnitOfWork;
    use chrono::Utc;

    fn form() -> ContactSubmission {
        ContactSubmission {
            category: Some("feedback".to_string()),
            full_name: Some(" Ravi Kumar ".to_string()),
            email: Some("Ravi@Example.com".to_string()),
            mobile: None,
            message: Some("Loved the biryani".to_string()),
        }
    }

    fn saved(contact: NewContact) -> ContactMessage {
        ContactMessage {
            id: Uuid::new_v4(),
            category: contact.category,
            full_name: contact.full_name,
            email: contact.email,
            mobile: contact.mobile,
            message: contact.message,
            status: ContactStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_submit_normalizes_and_stores() {
        let mut contacts = MockContactRepository::new();
        contacts
            .expect_create()
            .withf(|c| c.email == "ravi@example.com" && c.full_name == "Ravi Kumar")
            .times(1)
            .returning(|c| Ok(saved(c)));

        let service = ContactManager::new(Arc::new(TestUnitOfWork::with_contacts(contacts)));
        let message = service.submit(form()).await.unwrap();
        assert_eq!(message.status, ContactStatus::Pending);
        assert_eq!(message.mobile, "");
    }

    #[tokio::test]
    async fn test_submit_validation_messages() {
        let service = ContactManager::new(Arc::new(TestUnitOfWork::default()));

        let mut missing = form();
        missing.message = Some("   ".to_string());
        assert_eq!(
            service.submit(missing).await.unwrap_err().to_string(),
            "Please fill in all required fields"
        );

        let mut bad_email = form();
        bad_email.email = Some("not-an-email".to_string());
        assert_eq!(
            service.submit(bad_email).await.unwrap_err().to_string(),
            "Please enter a valid email address"
        );

        let mut bad_category = form();
        bad_category.category = Some("spam".to_string());
        assert!(matches!(
            service.submit(bad_category).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_status_is_rejected() {
        let service = ContactManager::new(Arc::new(TestUnitOfWork::default()));
        let err = service.update_status(Uuid::new_v4(), "archived").await.unwrap_err();
        assert_eq!(err.to_string(), "Please provide a valid status");
    }

    #[tokio::test]
    async fn test_any_status_transition_is_allowed() {
        let mut contacts = MockContactRepository::new();
        contacts.expect_update_status().returning(|id, status| {
            let mut message = saved(NewContact::new(
                ContactCategory::General,
                "A",
                "a@example.com",
                None,
                "hi",
            ));
            message.id = id;
            message.status = status;
            Ok(Some(message))
        });

        let service = ContactManager::new(Arc::new(TestUnitOfWork::with_contacts(contacts)));
        let id = Uuid::new_v4();
        for status in ["closed", "pending", "in-progress", "resolved"] {
            let updated = service.update_status(id, status).await.unwrap();
            assert_eq!(updated.status.as_str(), status);
        }
    }

    #[tokio::test]
    async fn test_delete_unknown_message() {
        let mut contacts = MockContactRepository::new();
        contacts.expect_delete().returning(|_| Ok(false));

        let service = ContactManager::new(Arc::new(TestUnitOfWork::with_contacts(contacts)));
        let err = service.delete_message(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.to_string(), "Contact message not found");
    }
}
