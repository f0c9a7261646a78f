//! Razorpay REST client.
//!
//! Only the two calls checkout needs are implemented: order creation and
//! local verification of the signature returned to the browser.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::config::{RazorpaySettings, RAZORPAY_API_BASE};
use crate::domain::payment::verify_payment_signature;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order created on the gateway
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    /// Amount in minor units
    pub amount: i64,
    pub currency: String,
}

/// Payment gateway trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Public key id the browser checkout widget is opened with
    fn key_id(&self) -> String;

    /// Create an auto-captured order for `amount` minor units
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: Option<String>,
    ) -> AppResult<GatewayOrder>;

    /// Check the signature the gateway handed to the browser
    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}

#[derive(Serialize)]
struct CreateOrderRequest<'a> {
    amount: i64,
    currency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt: Option<String>,
    payment_capture: u8,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    description: Option<String>,
}

/// Razorpay API client
#[derive(Clone)]
pub struct RazorpayClient {
    client: Client,
    base_url: String,
    key_id: String,
    key_secret: SecretString,
}

impl std::fmt::Debug for RazorpayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayClient")
            .field("base_url", &self.base_url)
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl RazorpayClient {
    /// Create a client against the public API.
    #[must_use]
    pub fn new(settings: &RazorpaySettings) -> Self {
        Self::with_base_url(settings, RAZORPAY_API_BASE)
    }

    /// Create a client against a custom base URL.
    #[must_use]
    pub fn with_base_url(settings: &RazorpaySettings, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            key_id: settings.key_id.clone(),
            key_secret: settings.key_secret.clone(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    fn key_id(&self) -> String {
        self.key_id.clone()
    }

    #[instrument(skip(self, receipt))]
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: Option<String>,
    ) -> AppResult<GatewayOrder> {
        let body = CreateOrderRequest {
            amount,
            currency,
            receipt,
            payment_capture: 1,
        };

        let response = self
            .client
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Payment gateway unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let description = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|e| e.error.description)
                .unwrap_or_else(|| format!("Payment gateway returned {status}"));
            error!(%status, %description, "Razorpay order creation failed");
            return Err(AppError::upstream(description));
        }

        let order: GatewayOrder = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Unexpected payment gateway response: {e}")))?;

        debug!(order_id = %order.id, "Razorpay order created");
        Ok(order)
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_payment_signature(self.key_secret.expose_secret(), order_id, payment_id, signature)
    }
}
