//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{
    ClerkVerifier, CloudinaryStore, Database, IdentityProvider, ImageStore, LocalImageStore,
    PaymentGateway, RazorpayClient,
};
use crate::services::{
    CartService, ContactService, FoodService, OrderService, ServiceContainer, Services,
    UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Food catalog service
    pub food_service: Arc<dyn FoodService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Cart service
    pub cart_service: Arc<dyn CartService>,
    /// Order and payment service
    pub order_service: Arc<dyn OrderService>,
    /// Contact message service
    pub contact_service: Arc<dyn ContactService>,
    /// Session token verifier
    pub identity: Arc<dyn IdentityProvider>,
    /// Database connection, absent when running against substitutes
    pub database: Option<Arc<Database>>,
    /// Directory served under `/images`
    pub images_dir: PathBuf,
    /// CORS allow-list
    pub allowed_origins: Vec<String>,
    /// Deployment environment name
    pub environment: String,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// Picks the image backend and payment gateway from what is configured.
    ///
    /// # Errors
    /// Fails if the identity provider key cannot be parsed.
    pub fn from_config(database: Arc<Database>, config: &Config) -> AppResult<Self> {
        let identity = Arc::new(ClerkVerifier::from_settings(&config.identity)?);

        let local = LocalImageStore::new(config.upload_dir.clone());
        let images: Arc<dyn ImageStore> = match &config.cloudinary {
            Some(settings) => {
                tracing::info!(cloud = %settings.cloud_name, "Storing images on Cloudinary");
                Arc::new(CloudinaryStore::new(settings, local))
            }
            None => {
                tracing::info!(dir = %config.upload_dir.display(), "Storing images locally");
                Arc::new(local)
            }
        };

        let gateway = match &config.razorpay {
            Some(settings) => Some(Arc::new(RazorpayClient::new(settings)) as Arc<dyn PaymentGateway>),
            None => {
                tracing::warn!("Razorpay credentials not set, online payments are disabled");
                None
            }
        };

        let services = Services::from_connection(
            database.get_connection(),
            images,
            gateway,
            !config.is_production(),
        );

        Ok(Self::new(&services, identity, Some(database), config))
    }

    /// Create new application state with manually injected services.
    pub fn new(
        services: &dyn ServiceContainer,
        identity: Arc<dyn IdentityProvider>,
        database: Option<Arc<Database>>,
        config: &Config,
    ) -> Self {
        Self {
            food_service: services.foods(),
            user_service: services.users(),
            cart_service: services.carts(),
            order_service: services.orders(),
            contact_service: services.contacts(),
            identity,
            database,
            images_dir: config.upload_dir.clone(),
            allowed_origins: config.allowed_origins.clone(),
            environment: config.environment.clone(),
        }
    }
}
