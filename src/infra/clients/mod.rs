//! Clients for the external services the backend delegates to.
//!
//! Each collaborator sits behind a trait so handlers and services can be
//! exercised against in-memory substitutes.

mod identity;
mod images;
mod payments;

pub use identity::{ClerkVerifier, Identity, IdentityProvider, SessionClaims};
pub use images::{
    cloudinary_public_id, CloudinaryStore, ImageStore, ImageUpload, LocalImageStore,
};
pub use payments::{GatewayOrder, PaymentGateway, RazorpayClient};

#[cfg(any(test, feature = "test-utils"))]
pub use images::MockImageStore;
#[cfg(any(test, feature = "test-utils"))]
pub use payments::MockPaymentGateway;
