//! Shared fixtures for the HTTP integration tests.
//!
//! The router is assembled with in-memory repositories and fake external
//! clients, so the suites run without PostgreSQL, Clerk, Razorpay or
//! Cloudinary.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use tomato_api::api::{create_router, AppState};
use tomato_api::config::{Config, IdentitySettings};
use tomato_api::domain::payment::verify_payment_signature;
use tomato_api::domain::{
    Cart, ContactMessage, ContactStatus, FoodItem, NewContact, NewFood, NewOrder, NewUser, Order,
    OrderStatus, ProfileInput, User,
};
use tomato_api::errors::{AppError, AppResult};
use tomato_api::infra::{
    ContactRepository, FoodRepository, GatewayOrder, Identity, IdentityProvider, ImageStore,
    ImageUpload, OrderRepository, PaymentGateway, UnitOfWork, UserRepository,
};
use tomato_api::services::Services;

pub const GATEWAY_SECRET: &str = "test_secret";
pub const GATEWAY_KEY_ID: &str = "rzp_test_key";
pub const GATEWAY_ORDER_ID: &str = "order_test_1";
const MULTIPART_BOUNDARY: &str = "tomato-test-boundary";

// =============================================================================
// In-memory persistence
// =============================================================================

#[derive(Default)]
pub struct MemoryFoods {
    rows: Mutex<Vec<FoodItem>>,
}

#[async_trait]
impl FoodRepository for MemoryFoods {
    async fn create(&self, food: NewFood, image: String) -> AppResult<FoodItem> {
        let item = FoodItem {
            id: Uuid::new_v4(),
            name: food.name,
            description: food.description,
            price: food.price,
            category: food.category,
            image,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn list(&self) -> AppResult<Vec<FoodItem>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FoodItem>> {
        Ok(self.rows.lock().unwrap().iter().find(|f| f.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|f| f.id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl MemoryUsers {
    /// Number of records stored for `external_id`.
    pub fn find_count(&self, external_id: &str) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.external_id == external_id)
            .count()
    }

    fn clear_cart(&self, external_id: &str) {
        if let Some(user) = self
            .rows
            .lock()
            .unwrap()
            .iter_mut()
            .find(|u| u.external_id == external_id)
        {
            user.cart.clear();
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.external_id == external_id)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.external_id == new_user.external_id) {
            return Err(AppError::conflict("User"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            external_id: new_user.external_id,
            name: new_user.name,
            email: new_user.email,
            profile_picture: new_user.profile_picture,
            cart: Cart::new(),
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        external_id: &str,
        changes: ProfileInput,
    ) -> AppResult<Option<User>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(user) = rows.iter_mut().find(|u| u.external_id == external_id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(picture) = changes.profile_picture {
            user.profile_picture = picture;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn save_cart(&self, external_id: &str, cart: &Cart) -> AppResult<()> {
        if let Some(user) = self
            .rows
            .lock()
            .unwrap()
            .iter_mut()
            .find(|u| u.external_id == external_id)
        {
            user.cart = cart.clone();
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryOrders {
    rows: Mutex<Vec<Order>>,
}

#[async_trait]
impl OrderRepository for MemoryOrders {
    async fn list(&self) -> AppResult<Vec<Order>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Order>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Option<Order>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|o| o.id == id).map(|order| {
            order.status = status;
            order.clone()
        }))
    }
}

#[derive(Default)]
pub struct MemoryContacts {
    rows: Mutex<Vec<ContactMessage>>,
}

#[async_trait]
impl ContactRepository for MemoryContacts {
    async fn create(&self, contact: NewContact) -> AppResult<ContactMessage> {
        let now = Utc::now();
        let message = ContactMessage {
            id: Uuid::new_v4(),
            category: contact.category,
            full_name: contact.full_name,
            email: contact.email,
            mobile: contact.mobile,
            message: contact.message,
            status: ContactStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(0, message.clone());
        Ok(message)
    }

    async fn list(&self) -> AppResult<Vec<ContactMessage>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContactMessage>> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ContactStatus,
    ) -> AppResult<Option<ContactMessage>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|c| c.id == id).map(|message| {
            message.status = status;
            message.updated_at = Utc::now();
            message.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() != before)
    }
}

/// Unit of Work over the in-memory tables. Orders are kept newest first.
#[derive(Default)]
pub struct MemoryUnitOfWork {
    pub foods: Arc<MemoryFoods>,
    pub users: Arc<MemoryUsers>,
    pub orders: Arc<MemoryOrders>,
    pub contacts: Arc<MemoryContacts>,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    fn foods(&self) -> Arc<dyn FoodRepository> {
        self.foods.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.orders.clone()
    }

    fn contacts(&self) -> Arc<dyn ContactRepository> {
        self.contacts.clone()
    }

    async fn checkout(&self, new_order: NewOrder) -> AppResult<Order> {
        let (razorpay_order_id, razorpay_payment_id) = match new_order.payment {
            Some(receipt) => (
                Some(receipt.gateway_order_id),
                Some(receipt.gateway_payment_id),
            ),
            None => (None, None),
        };
        let order = Order {
            id: Uuid::new_v4(),
            user_id: new_order.user_id,
            items: new_order.draft.items,
            amount: new_order.draft.amount,
            address: new_order.draft.address,
            status: OrderStatus::default(),
            payment: razorpay_payment_id.is_some(),
            razorpay_order_id,
            razorpay_payment_id,
            created_at: Utc::now(),
        };

        self.orders.rows.lock().unwrap().insert(0, order.clone());
        self.users.clear_cart(&order.user_id);
        Ok(order)
    }
}

// =============================================================================
// External clients
// =============================================================================

/// Accepts `token-<subject>` and rejects everything else.
pub struct TokenIdentity;

#[async_trait]
impl IdentityProvider for TokenIdentity {
    async fn verify(&self, token: &str) -> AppResult<Identity> {
        match token.strip_prefix("token-") {
            Some(subject) if !subject.is_empty() => Ok(Identity {
                subject: subject.to_string(),
            }),
            _ => Err(AppError::Unauthorized),
        }
    }
}

/// Gateway that hands out a fixed order id and checks real signatures.
pub struct FakeGateway;

#[async_trait]
impl PaymentGateway for FakeGateway {
    fn key_id(&self) -> String {
        GATEWAY_KEY_ID.to_string()
    }

    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        _receipt: Option<String>,
    ) -> AppResult<GatewayOrder> {
        Ok(GatewayOrder {
            id: GATEWAY_ORDER_ID.to_string(),
            amount,
            currency: currency.to_string(),
        })
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_payment_signature(GATEWAY_SECRET, order_id, payment_id, signature)
    }
}

/// Image store keeping references in memory; deletion can be made to fail.
#[derive(Default)]
pub struct MemoryImages {
    pub stored: Mutex<Vec<String>>,
    pub fail_delete: bool,
}

#[async_trait]
impl ImageStore for MemoryImages {
    async fn store(&self, upload: ImageUpload) -> AppResult<String> {
        self.stored.lock().unwrap().push(upload.filename.clone());
        Ok(upload.filename)
    }

    async fn delete(&self, reference: &str) -> AppResult<()> {
        if self.fail_delete {
            return Err(AppError::upstream("image host unavailable"));
        }
        self.stored.lock().unwrap().retain(|r| r != reference);
        Ok(())
    }
}

// =============================================================================
// Application harness
// =============================================================================

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        environment: "test".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        allowed_origins: vec!["http://localhost:5173".to_string()],
        upload_dir: std::env::temp_dir().join("tomato-api-tests"),
        identity: IdentitySettings {
            jwt_public_key: None,
            issuer: None,
        },
        razorpay: None,
        cloudinary: None,
    }
}

pub struct TestApp {
    pub router: Router,
    pub uow: Arc<MemoryUnitOfWork>,
    pub images: Arc<MemoryImages>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_images(MemoryImages::default())
    }

    pub fn with_images(images: MemoryImages) -> Self {
        let uow = Arc::new(MemoryUnitOfWork::default());
        let images = Arc::new(images);
        let gateway: Arc<dyn PaymentGateway> = Arc::new(FakeGateway);

        let services = Services::from_parts(uow.clone(), images.clone(), Some(gateway), true);
        let state = AppState::new(&services, Arc::new(TokenIdentity), None, &test_config());

        Self {
            router: create_router(state),
            uow,
            images,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = self.send(request).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    pub async fn get(&self, uri: &str, subject: Option<&str>) -> (StatusCode, Value) {
        self.send_json(build(Method::GET, uri, subject, None)).await
    }

    pub async fn post(&self, uri: &str, subject: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send_json(build(Method::POST, uri, subject, Some(body)))
            .await
    }

    pub async fn put(&self, uri: &str, subject: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send_json(build(Method::PUT, uri, subject, Some(body)))
            .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send_json(build(Method::DELETE, uri, None, None)).await
    }

    /// Register `subject` through `/api/user/create`.
    pub async fn sign_in(&self, subject: &str) {
        let (status, _) = self
            .post(
                "/api/user/create",
                Some(subject),
                serde_json::json!({ "name": "Asha", "email": "asha@example.com" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    /// Upload a menu item through the multipart admin form.
    pub async fn add_food(&self, name: &str, price: &str) -> (StatusCode, Value) {
        let image = Part::file("image", "salad photo.png", "image/png", b"\x89PNG fake bytes");
        self.send_json(multipart_request(
            "/api/food/add",
            &[
                Part::text("name", name),
                Part::text("description", "Fresh greens"),
                Part::text("price", price),
                Part::text("category", "Salad"),
                image,
            ],
        ))
        .await
    }
}

fn build(method: Method, uri: &str, subject: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(subject) = subject {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer token-{subject}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// One multipart form field
pub struct Part {
    name: String,
    file: Option<(String, String)>,
    bytes: Vec<u8>,
}

impl Part {
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            file: None,
            bytes: value.as_bytes().to_vec(),
        }
    }

    pub fn file(name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            file: Some((filename.to_string(), content_type.to_string())),
            bytes: bytes.to_vec(),
        }
    }
}

pub fn multipart_request(uri: &str, parts: &[Part]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        match &part.file {
            Some((filename, content_type)) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    part.name, filename, content_type
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                    .as_bytes(),
            ),
        }
        body.extend_from_slice(&part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
