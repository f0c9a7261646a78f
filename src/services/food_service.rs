//! Food catalog service - Menu management for the admin panel.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES};
use crate::domain::{FoodItem, NewFood};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{ImageStore, ImageUpload, UnitOfWork};

/// File part of a multipart upload, as received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Raw fields of the add-food form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodSubmission {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: Option<UploadedFile>,
}

/// Food service trait for dependency injection.
#[async_trait]
pub trait FoodService: Send + Sync {
    /// Validate the form, store the image and create the menu item
    async fn add_food(&self, submission: FoodSubmission) -> AppResult<FoodItem>;

    /// List the whole menu
    async fn list_foods(&self) -> AppResult<Vec<FoodItem>>;

    /// Delete a menu item, attempting to delete its image first
    async fn remove_food(&self, id: Uuid) -> AppResult<()>;
}

/// Replace every character outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches('.').is_empty() {
        "image".to_string()
    } else {
        sanitized
    }
}

fn check_image(image: Option<UploadedFile>) -> AppResult<UploadedFile> {
    let image = image.ok_or_else(|| AppError::validation("No file uploaded"))?;

    let content_type = image.content_type.to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::validation(
            "Only image files (jpeg, jpg, png) are allowed",
        ));
    }
    if image.bytes.is_empty() {
        return Err(AppError::validation("No file uploaded"));
    }
    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::validation("Image must be 5 MB or smaller"));
    }

    Ok(image)
}

fn parse_food(submission: &FoodSubmission) -> AppResult<NewFood> {
    let name = submission.name.trim();
    let category = submission.category.trim();
    if name.is_empty() || category.is_empty() {
        return Err(AppError::validation("Name and category are required"));
    }

    let price = Decimal::from_str(submission.price.trim())
        .ok()
        .filter(|p| !p.is_sign_negative())
        .ok_or_else(|| AppError::validation("Price must be a non-negative number"))?;

    Ok(NewFood {
        name: name.to_string(),
        description: submission.description.trim().to_string(),
        price,
        category: category.to_string(),
    })
}

/// Concrete implementation of FoodService using Unit of Work.
pub struct FoodManager<U: UnitOfWork> {
    uow: Arc<U>,
    images: Arc<dyn ImageStore>,
}

impl<U: UnitOfWork> FoodManager<U> {
    /// Create new food service instance with Unit of Work
    pub fn new(uow: Arc<U>, images: Arc<dyn ImageStore>) -> Self {
        Self { uow, images }
    }
}

#[async_trait]
impl<U: UnitOfWork> FoodService for FoodManager<U> {
    async fn add_food(&self, mut submission: FoodSubmission) -> AppResult<FoodItem> {
        let image = check_image(submission.image.take())?;
        let food = parse_food(&submission)?;

        let upload = ImageUpload {
            filename: format!(
                "{}-{}",
                chrono::Utc::now().timestamp_millis(),
                sanitize_filename(&image.file_name)
            ),
            content_type: image.content_type.to_ascii_lowercase(),
            bytes: image.bytes,
        };

        let reference = self.images.store(upload).await?;

        match self.uow.foods().create(food, reference.clone()).await {
            Ok(item) => {
                tracing::info!(food_id = %item.id, name = %item.name, "Food item added");
                Ok(item)
            }
            Err(e) => {
                if let Err(cleanup) = self.images.delete(&reference).await {
                    tracing::warn!(%reference, error = %cleanup, "Failed to clean up orphaned image");
                }
                Err(e)
            }
        }
    }

    async fn list_foods(&self) -> AppResult<Vec<FoodItem>> {
        self.uow.foods().list().await
    }

    async fn remove_food(&self, id: Uuid) -> AppResult<()> {
        let item = self
            .uow
            .foods()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Food item")?;

        if let Err(e) = self.images.delete(&item.image).await {
            tracing::warn!(food_id = %id, image = %item.image, error = %e, "Image deletion failed, removing record anyway");
        }

        if !self.uow.foods().delete(id).await? {
            return Err(AppError::not_found("Food item"));
        }

        tracing::info!(food_id = %id, "Food item removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockFoodRepository, MockImageStore};
    use crate::services::test_support::TestUnitOfWork;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn png(bytes: usize) -> UploadedFile {
        UploadedFile {
            file_name: "veg salad.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0u8; bytes],
        }
    }

    fn submission(image: Option<UploadedFile>) -> FoodSubmission {
        FoodSubmission {
            name: "Veg Salad".to_string(),
            description: "Fresh greens".to_string(),
            price: "18".to_string(),
            category: "Salad".to_string(),
            image,
        }
    }

    fn stored_item(id: Uuid, image: &str) -> FoodItem {
        FoodItem {
            id,
            name: "Veg Salad".to_string(),
            description: "Fresh greens".to_string(),
            price: Decimal::from(18),
            category: "Salad".to_string(),
            image: image.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("veg salad (1).png"), "veg_salad__1_.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\pics\\dal.jpg"), "dal.jpg");
        assert_eq!(sanitize_filename(".."), "image");
    }

    #[tokio::test]
    async fn test_add_food_stores_image_then_record() {
        let mut images = MockImageStore::new();
        images
            .expect_store()
            .withf(|u| u.filename.ends_with("-veg_salad.png") && u.content_type == "image/png")
            .times(1)
            .returning(|u| Ok(u.filename));

        let mut foods = MockFoodRepository::new();
        foods
            .expect_create()
            .withf(|food, image| food.name == "Veg Salad" && image.ends_with("-veg_salad.png"))
            .times(1)
            .returning(|food, image| {
                Ok(FoodItem {
                    id: Uuid::new_v4(),
                    name: food.name,
                    description: food.description,
                    price: food.price,
                    category: food.category,
                    image,
                    created_at: Utc::now(),
                })
            });

        let service = FoodManager::new(Arc::new(TestUnitOfWork::with_foods(foods)), Arc::new(images));
        let item = service.add_food(submission(Some(png(10)))).await.unwrap();

        assert_eq!(item.price, Decimal::from(18));
    }

    #[tokio::test]
    async fn test_add_food_requires_file() {
        let service = FoodManager::new(Arc::new(TestUnitOfWork::default()), Arc::new(MockImageStore::new()));
        let err = service.add_food(submission(None)).await.unwrap_err();
        assert_eq!(err.to_string(), "No file uploaded");
    }

    #[tokio::test]
    async fn test_add_food_rejects_wrong_type_and_size() {
        let service = FoodManager::new(Arc::new(TestUnitOfWork::default()), Arc::new(MockImageStore::new()));

        let mut gif = png(10);
        gif.content_type = "image/gif".to_string();
        assert!(matches!(
            service.add_food(submission(Some(gif))).await,
            Err(AppError::Validation(_))
        ));

        assert!(matches!(
            service.add_food(submission(Some(png(MAX_IMAGE_BYTES + 1)))).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_add_food_rejects_bad_price() {
        let service = FoodManager::new(Arc::new(TestUnitOfWork::default()), Arc::new(MockImageStore::new()));
        let mut form = submission(Some(png(10)));
        form.price = "cheap".to_string();
        assert!(service.add_food(form).await.is_err());
    }

    #[tokio::test]
    async fn test_remove_survives_image_failure() {
        let id = Uuid::new_v4();
        let mut foods = MockFoodRepository::new();
        foods
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |id| Ok(Some(stored_item(id, "salad.png"))));
        foods.expect_delete().with(eq(id)).times(1).returning(|_| Ok(true));

        let mut images = MockImageStore::new();
        images
            .expect_delete()
            .times(1)
            .returning(|_| Err(AppError::upstream("cdn down")));

        let service = FoodManager::new(Arc::new(TestUnitOfWork::with_foods(foods)), Arc::new(images));
        assert!(service.remove_food(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_unknown_item() {
        let mut foods = MockFoodRepository::new();
        foods.expect_find_by_id().returning(|_| Ok(None));

        let service = FoodManager::new(Arc::new(TestUnitOfWork::with_foods(foods)), Arc::new(MockImageStore::new()));
        let err = service.remove_food(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.to_string(), "Food item not found");
    }
}
