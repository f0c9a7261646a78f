//! Payment rules: minor-unit conversion and gateway signature checks.
//!
//! The gateway signs `order_id|payment_id` with the merchant key secret
//! using HMAC-SHA256 and sends the lowercase hex digest back through the
//! client. Verification recomputes the MAC server-side.

use hmac::{Hmac, Mac};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sha2::Sha256;

use crate::errors::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// Convert a major-unit amount (rupees) to minor units (paise).
///
/// # Errors
/// Returns a validation error for non-positive or out-of-range amounts.
pub fn to_minor_units(amount: Decimal) -> AppResult<i64> {
    if amount <= Decimal::ZERO {
        return Err(AppError::validation("Amount must be greater than zero"));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| AppError::validation("Amount is too large"))
}

/// Lowercase hex HMAC-SHA256 of `order_id|payment_id`.
pub fn payment_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    hex::encode(mac_for(secret, order_id, payment_id).finalize().into_bytes())
}

/// Check a gateway-supplied signature in constant time.
pub fn verify_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let Ok(supplied) = hex::decode(signature.trim()) else {
        return false;
    };

    mac_for(secret, order_id, payment_id)
        .verify_slice(&supplied)
        .is_ok()
}

fn mac_for(secret: &str, order_id: &str, payment_id: &str) -> HmacSha256 {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC key length is unrestricted"));
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac
}
