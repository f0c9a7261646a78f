//! Service Container - Centralized service access.
//!
//! Wires every service over one shared Unit of Work and the external
//! clients chosen at startup.

use std::sync::Arc;

use super::{
    CartManager, CartService, ContactManager, ContactService, FoodManager, FoodService,
    OrderManager, OrderService, UserManager, UserService,
};
use crate::infra::{ImageStore, PaymentGateway, Persistence, UnitOfWork};

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    /// Get food catalog service
    fn foods(&self) -> Arc<dyn FoodService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get cart service
    fn carts(&self) -> Arc<dyn CartService>;

    /// Get order service
    fn orders(&self) -> Arc<dyn OrderService>;

    /// Get contact message service
    fn contacts(&self) -> Arc<dyn ContactService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    food_service: Arc<dyn FoodService>,
    user_service: Arc<dyn UserService>,
    cart_service: Arc<dyn CartService>,
    order_service: Arc<dyn OrderService>,
    contact_service: Arc<dyn ContactService>,
}

impl Services {
    /// Build every service over a shared Unit of Work.
    pub fn from_parts<U: UnitOfWork + 'static>(
        uow: Arc<U>,
        images: Arc<dyn ImageStore>,
        gateway: Option<Arc<dyn PaymentGateway>>,
        expose_errors: bool,
    ) -> Self {
        Self {
            food_service: Arc::new(FoodManager::new(uow.clone(), images)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            cart_service: Arc::new(CartManager::new(uow.clone())),
            order_service: Arc::new(OrderManager::new(uow.clone(), gateway, expose_errors)),
            contact_service: Arc::new(ContactManager::new(uow)),
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        images: Arc<dyn ImageStore>,
        gateway: Option<Arc<dyn PaymentGateway>>,
        expose_errors: bool,
    ) -> Self {
        Self::from_parts(Arc::new(Persistence::new(db)), images, gateway, expose_errors)
    }
}

impl ServiceContainer for Services {
    fn foods(&self) -> Arc<dyn FoodService> {
        self.food_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn carts(&self) -> Arc<dyn CartService> {
        self.cart_service.clone()
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        self.order_service.clone()
    }

    fn contacts(&self) -> Arc<dyn ContactService> {
        self.contact_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockImageStore;
    use crate::services::test_support::TestUnitOfWork;

    #[tokio::test]
    async fn test_container_shares_unit_of_work() {
        let mut uow = TestUnitOfWork::default();
        let mut foods = crate::infra::MockFoodRepository::new();
        foods.expect_list().times(2).returning(|| Ok(Vec::new()));
        uow.foods = Arc::new(foods);

        let services = Services::from_parts(Arc::new(uow), Arc::new(MockImageStore::new()), None, true);

        assert!(services.foods().list_foods().await.unwrap().is_empty());
        assert!(services.clone().foods().list_foods().await.unwrap().is_empty());
    }
}
