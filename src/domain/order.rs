//! Order entity and checkout data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Line item captured at checkout time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Food item id as known to the client (never checked for existence)
    #[serde(alias = "_id", alias = "id")]
    pub item_id: String,
    #[schema(example = "Veg Salad")]
    pub name: String,
    #[schema(example = 18)]
    pub price: Decimal,
    #[schema(example = 2)]
    pub quantity: u32,
}

/// Delivery address fields collected by the checkout form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub country: String,
    pub phone: String,
}

/// Order contents submitted by the storefront
///
/// Items and amount are computed client-side and recorded as submitted;
/// only the shape is checked, during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderDraft {
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[schema(example = 100)]
    pub amount: Decimal,
    #[serde(default)]
    pub address: DeliveryAddress,
}

/// Gateway identifiers attached to a paid order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
}

/// Order about to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: String,
    pub draft: OrderDraft,
    pub payment: Option<PaymentReceipt>,
}

/// Fulfilment status set by the admin panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Food Processing")]
    FoodProcessing,
    #[serde(rename = "Out for delivery")]
    OutForDelivery,
    #[serde(rename = "Delivered")]
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::FoodProcessing => "Food Processing",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Food Processing" => Some(OrderStatus::FoodProcessing),
            "Out for delivery" => Some(OrderStatus::OutForDelivery),
            "Delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted order
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub amount: Decimal,
    pub address: DeliveryAddress,
    pub status: OrderStatus,
    pub payment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
