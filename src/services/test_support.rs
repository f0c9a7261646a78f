//! Unit of Work double backed by repository mocks.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::{NewOrder, Order, OrderStatus};
use crate::errors::AppResult;
use crate::infra::{
    ContactRepository, FoodRepository, MockContactRepository, MockFoodRepository,
    MockOrderRepository, MockUserRepository, OrderRepository, UnitOfWork, UserRepository,
};

/// Unit of Work whose repositories are mockall mocks.
///
/// `checkout` records the order and echoes it back as persisted.
pub struct TestUnitOfWork {
    pub foods: Arc<MockFoodRepository>,
    pub users: Arc<MockUserRepository>,
    pub orders: Arc<MockOrderRepository>,
    pub contacts: Arc<MockContactRepository>,
    pub checkouts: Mutex<Vec<NewOrder>>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            foods: Arc::new(MockFoodRepository::new()),
            users: Arc::new(MockUserRepository::new()),
            orders: Arc::new(MockOrderRepository::new()),
            contacts: Arc::new(MockContactRepository::new()),
            checkouts: Mutex::new(Vec::new()),
        }
    }
}

impl TestUnitOfWork {
    pub fn with_foods(foods: MockFoodRepository) -> Self {
        Self {
            foods: Arc::new(foods),
            ..Self::default()
        }
    }

    pub fn with_users(users: MockUserRepository) -> Self {
        Self {
            users: Arc::new(users),
            ..Self::default()
        }
    }

    pub fn with_orders(orders: MockOrderRepository) -> Self {
        Self {
            orders: Arc::new(orders),
            ..Self::default()
        }
    }

    pub fn with_contacts(contacts: MockContactRepository) -> Self {
        Self {
            contacts: Arc::new(contacts),
            ..Self::default()
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
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

    async fn checkout(&self, order: NewOrder) -> AppResult<Order> {
        self.checkouts.lock().unwrap().push(order.clone());
        Ok(Order {
            id: Uuid::new_v4(),
            user_id: order.user_id,
            items: order.draft.items,
            amount: order.draft.amount,
            address: order.draft.address,
            status: OrderStatus::default(),
            payment: order.payment.is_some(),
            razorpay_order_id: order.payment.as_ref().map(|p| p.gateway_order_id.clone()),
            razorpay_payment_id: order.payment.map(|p| p.gateway_payment_id),
            created_at: Utc::now(),
        })
    }
}
