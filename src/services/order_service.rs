//! Order service - Checkout, gateway payments and order tracking.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::DEFAULT_CURRENCY;
use crate::domain::payment::to_minor_units;
use crate::domain::{NewOrder, Order, OrderDraft, OrderStatus, PaymentReceipt};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{PaymentGateway, UnitOfWork};

/// Gateway order handed to the browser checkout widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    #[schema(example = "order_IEIaMR65cu6nz3")]
    pub order_id: String,
    /// Amount in minor units (paise)
    #[schema(example = 10000)]
    pub amount: i64,
    #[schema(example = "INR")]
    pub currency: String,
    /// Public key id for the checkout widget
    pub key_id: String,
}

/// Identifiers and signature returned by the gateway after payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Order service trait for dependency injection.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Persist an unpaid order and empty the caller's cart
    async fn place_order(&self, subject: &str, draft: OrderDraft) -> AppResult<Order>;

    /// Create a gateway order for `amount` in major units
    async fn create_payment_order(
        &self,
        amount: Decimal,
        currency: Option<String>,
        receipt: Option<String>,
    ) -> AppResult<PaymentOrder>;

    /// Verify a gateway signature, then persist the paid order and empty the cart
    async fn verify_payment(
        &self,
        subject: &str,
        confirmation: PaymentConfirmation,
        draft: OrderDraft,
    ) -> AppResult<Order>;

    /// All orders, newest first
    async fn list_orders(&self) -> AppResult<Vec<Order>>;

    /// The caller's orders, newest first
    async fn user_orders(&self, subject: &str) -> AppResult<Vec<Order>>;

    /// Set the fulfilment status of an order
    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order>;
}

/// Concrete implementation of OrderService using Unit of Work.
pub struct OrderManager<U: UnitOfWork> {
    uow: Arc<U>,
    gateway: Option<Arc<dyn PaymentGateway>>,
    expose_errors: bool,
}

impl<U: UnitOfWork> OrderManager<U> {
    /// Create new order service instance.
    ///
    /// With `expose_errors` off, gateway failure details are replaced by
    /// a generic message.
    pub fn new(uow: Arc<U>, gateway: Option<Arc<dyn PaymentGateway>>, expose_errors: bool) -> Self {
        Self {
            uow,
            gateway,
            expose_errors,
        }
    }

    fn gateway(&self) -> AppResult<&Arc<dyn PaymentGateway>> {
        self.gateway
            .as_ref()
            .ok_or_else(|| AppError::NotConfigured("Payment gateway".to_string()))
    }

    fn surface(&self, err: AppError) -> AppError {
        match err {
            AppError::Upstream(detail) if !self.expose_errors => {
                tracing::error!(%detail, "Payment gateway request failed");
                AppError::upstream("Failed to create payment order")
            }
            other => other,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> OrderService for OrderManager<U> {
    async fn place_order(&self, subject: &str, draft: OrderDraft) -> AppResult<Order> {
        let order = self
            .uow
            .checkout(NewOrder {
                user_id: subject.to_string(),
                draft,
                payment: None,
            })
            .await?;

        tracing::info!(order_id = %order.id, subject, amount = %order.amount, "Order placed");
        Ok(order)
    }

    async fn create_payment_order(
        &self,
        amount: Decimal,
        currency: Option<String>,
        receipt: Option<String>,
    ) -> AppResult<PaymentOrder> {
        let gateway = self.gateway()?;
        let minor = to_minor_units(amount)?;
        let currency = currency
            .map(|c| c.trim().to_ascii_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let order = gateway
            .create_order(minor, &currency, receipt)
            .await
            .map_err(|e| self.surface(e))?;

        Ok(PaymentOrder {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            key_id: gateway.key_id(),
        })
    }

    async fn verify_payment(
        &self,
        subject: &str,
        confirmation: PaymentConfirmation,
        draft: OrderDraft,
    ) -> AppResult<Order> {
        let gateway = self.gateway()?;

        if confirmation.order_id.is_empty()
            || confirmation.payment_id.is_empty()
            || confirmation.signature.is_empty()
        {
            return Err(AppError::validation("Missing payment details"));
        }

        if !gateway.verify_signature(
            &confirmation.order_id,
            &confirmation.payment_id,
            &confirmation.signature,
        ) {
            tracing::warn!(
                subject,
                gateway_order_id = %confirmation.order_id,
                "Payment signature mismatch"
            );
            return Err(AppError::validation("Payment verification failed"));
        }

        let order = self
            .uow
            .checkout(NewOrder {
                user_id: subject.to_string(),
                draft,
                payment: Some(PaymentReceipt {
                    gateway_order_id: confirmation.order_id,
                    gateway_payment_id: confirmation.payment_id,
                }),
            })
            .await?;

        tracing::info!(order_id = %order.id, subject, "Paid order recorded");
        Ok(order)
    }

    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        self.uow.orders().list().await
    }

    async fn user_orders(&self, subject: &str) -> AppResult<Vec<Order>> {
        self.uow.orders().list_by_user(subject).await
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        let order = self
            .uow
            .orders()
            .update_status(id, status)
            .await?
            .ok_or_not_found("Order")?;

        tracing::info!(order_id = %id, status = %status, "Order status updated");
        Ok(order)
    }
}
