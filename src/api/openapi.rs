//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    cart_handler, contact_handler, food_handler, order_handler, user_handler,
};
use crate::domain::{
    Cart, ContactCategory, ContactMessage, ContactStatus, DeliveryAddress, FoodResponse, Order,
    OrderDraft, OrderItem, OrderStatus, UserResponse,
};
use crate::services::PaymentOrder;

/// OpenAPI documentation for the Tomato backend
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tomato API",
        version = "0.1.0",
        description = "Menu, cart, checkout and contact backend for the Tomato food-ordering app",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    paths(
        // Food catalog
        food_handler::add_food,
        food_handler::list_foods,
        food_handler::remove_food,
        // Users
        user_handler::create_user,
        user_handler::get_profile,
        user_handler::update_profile,
        // Cart
        cart_handler::add_to_cart,
        cart_handler::remove_from_cart,
        cart_handler::get_cart,
        // Orders
        order_handler::place_order,
        order_handler::create_payment_order,
        order_handler::verify_payment,
        order_handler::user_orders,
        order_handler::list_orders,
        order_handler::update_status,
        // Contact
        contact_handler::submit_contact,
        contact_handler::list_contacts,
        contact_handler::get_contact,
        contact_handler::update_contact_status,
        contact_handler::delete_contact,
    ),
    components(
        schemas(
            // Domain types
            FoodResponse,
            UserResponse,
            Cart,
            Order,
            OrderDraft,
            OrderItem,
            OrderStatus,
            DeliveryAddress,
            ContactMessage,
            ContactCategory,
            ContactStatus,
            PaymentOrder,
            // Request and response types
            food_handler::AddFoodForm,
            food_handler::RemoveFoodRequest,
            user_handler::CreateUserRequest,
            user_handler::UpdateProfileRequest,
            cart_handler::CartItemRequest,
            order_handler::CreatePaymentRequest,
            order_handler::VerifyPaymentRequest,
            order_handler::UpdateOrderStatusRequest,
            order_handler::OrderCreatedResponse,
            contact_handler::ContactRequest,
            contact_handler::UpdateContactStatusRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Food", description = "Menu catalog"),
        (name = "Users", description = "Storefront user profiles"),
        (name = "Cart", description = "Per-user cart"),
        (name = "Orders", description = "Checkout, payments and fulfilment"),
        (name = "Contact", description = "Contact form and triage")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for session token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token issued by the identity provider"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "legacy_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("token"))),
            );
        }
    }
}
