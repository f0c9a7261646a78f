//! Food catalog entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::IMAGES_ROUTE;

/// Menu item
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    /// Hosted image URL, or a filename under the local upload directory
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl FoodItem {
    /// URL a client can load the image from.
    pub fn image_url(&self) -> String {
        resolve_image_url(&self.image)
    }
}

/// Resolve a stored image reference to a URL.
pub fn resolve_image_url(image: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else {
        format!("{}/{}", IMAGES_ROUTE, image.trim_start_matches('/'))
    }
}

/// Menu item data submitted by the admin panel
#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
}

/// Menu item as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodResponse {
    #[serde(rename = "_id")]
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Veg Salad")]
    pub name: String,
    pub description: String,
    #[schema(example = 18)]
    pub price: Decimal,
    #[schema(example = "Salad")]
    pub category: String,
    /// Stored image reference
    pub image: String,
    /// Resolvable image URL
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<FoodItem> for FoodResponse {
    fn from(item: FoodItem) -> Self {
        let image_url = item.image_url();
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            category: item.category,
            image: item.image,
            image_url,
            created_at: item.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_filename_resolves_under_images() {
        assert_eq!(resolve_image_url("1700000000000-salad.png"), "/images/1700000000000-salad.png");
    }

    #[test]
    fn test_hosted_url_passes_through() {
        let url = "https://res.cloudinary.com/demo/image/upload/v1/tomato-food-items/salad.png";
        assert_eq!(resolve_image_url(url), url);
    }

    #[test]
    fn test_response_shape() {
        let item = FoodItem {
            id: Uuid::new_v4(),
            name: "Veg Salad".to_string(),
            description: "Fresh".to_string(),
            price: Decimal::from(18),
            category: "Salad".to_string(),
            image: "salad.png".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(FoodResponse::from(item)).unwrap();
        assert_eq!(json["price"], 18.0);
        assert_eq!(json["imageUrl"], "/images/salad.png");
        assert!(json.get("_id").is_some());
    }
}
