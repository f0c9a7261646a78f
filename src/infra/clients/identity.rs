//! Session token verification for the hosted identity provider.
//!
//! Clerk signs session JWTs with an RSA key whose public half is published
//! per instance, so tokens are verified locally without a network call.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::IdentitySettings;
use crate::errors::{AppError, AppResult};

/// Claims read from a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// Verified caller identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Provider subject id, used as the user key everywhere
    pub subject: String,
}

/// Identity provider trait for dependency injection.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify a session token and return the caller's identity
    async fn verify(&self, token: &str) -> AppResult<Identity>;
}

/// Offline verifier for Clerk session tokens
pub struct ClerkVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl ClerkVerifier {
    /// Create a verifier from an explicit key and algorithm.
    pub fn new(key: DecodingKey, algorithm: Algorithm, issuer: Option<&str>) -> Self {
        Self {
            key: Some(key),
            validation: validation_for(algorithm, issuer),
        }
    }

    /// Build the verifier from configuration.
    ///
    /// Without a key every token is rejected.
    ///
    /// # Errors
    /// Returns an error if the configured PEM cannot be parsed.
    pub fn from_settings(settings: &IdentitySettings) -> AppResult<Self> {
        let key = settings
            .jwt_public_key
            .as_deref()
            .map(|pem| DecodingKey::from_rsa_pem(pem.as_bytes()))
            .transpose()
            .map_err(|e| AppError::internal(format!("Invalid CLERK_JWT_KEY: {e}")))?;

        Ok(Self {
            key,
            validation: validation_for(Algorithm::RS256, settings.issuer.as_deref()),
        })
    }
}

fn validation_for(algorithm: Algorithm, issuer: Option<&str>) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["exp", "sub"]);
    if let Some(issuer) = issuer {
        validation.set_issuer(&[issuer]);
    }
    validation
}

#[async_trait]
impl IdentityProvider for ClerkVerifier {
    async fn verify(&self, token: &str) -> AppResult<Identity> {
        let Some(key) = &self.key else {
            tracing::warn!("Rejecting session token: no verification key configured");
            return Err(AppError::Unauthorized);
        };

        let claims = decode::<SessionClaims>(token, key, &self.validation)?.claims;

        if claims.sub.trim().is_empty() {
            return Err(AppError::Unauthorized);
        }

        Ok(Identity { subject: claims.sub })
    }
}
