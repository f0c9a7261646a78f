//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use secrecy::SecretString;

use super::constants::{
    DEFAULT_CLOUDINARY_FOLDER, DEFAULT_DATABASE_URL, DEFAULT_DEV_ORIGINS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_UPLOAD_DIR, ENV_DEVELOPMENT, ENV_PRODUCTION,
};
use crate::errors::{AppError, AppResult};

/// Identity provider settings (Clerk session tokens)
#[derive(Clone)]
pub struct IdentitySettings {
    /// PEM encoded RSA public key used to verify session JWTs
    pub jwt_public_key: Option<String>,
    /// Expected `iss` claim
    pub issuer: Option<String>,
}

/// Payment gateway credentials
#[derive(Clone)]
pub struct RazorpaySettings {
    pub key_id: String,
    pub key_secret: SecretString,
}

/// Image CDN credentials
#[derive(Clone)]
pub struct CloudinarySettings {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: SecretString,
    pub folder: String,
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub environment: String,
    pub server_host: String,
    pub server_port: u16,
    pub allowed_origins: Vec<String>,
    pub upload_dir: PathBuf,
    pub identity: IdentitySettings,
    pub razorpay: Option<RazorpaySettings>,
    pub cloudinary: Option<CloudinarySettings>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("allowed_origins", &self.allowed_origins)
            .field("upload_dir", &self.upload_dir)
            .field("clerk_jwt_key", &self.identity.jwt_public_key.as_ref().map(|_| "[REDACTED]"))
            .field("clerk_issuer", &self.identity.issuer)
            .field("razorpay", &self.razorpay.as_ref().map(|r| &r.key_id))
            .field("cloudinary", &self.cloudinary.as_ref().map(|c| &c.cloud_name))
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails in production when the identity provider key is missing.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let environment = env::var("APP_ENV").unwrap_or_else(|_| ENV_DEVELOPMENT.to_string());
        let is_production = environment == ENV_PRODUCTION;

        let jwt_public_key = non_empty_var("CLERK_JWT_KEY").map(|key| key.replace("\\n", "\n"));
        if jwt_public_key.is_none() {
            if is_production {
                return Err(AppError::internal(
                    "CLERK_JWT_KEY environment variable must be set in production",
                ));
            }
            tracing::warn!("CLERK_JWT_KEY not set, protected routes will reject every request");
        }

        let allowed_origins = match non_empty_var("ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw),
            None if is_production => Vec::new(),
            None => DEFAULT_DEV_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        let razorpay = match (non_empty_var("RAZORPAY_KEY_ID"), non_empty_var("RAZORPAY_KEY_SECRET")) {
            (Some(key_id), Some(secret)) => Some(RazorpaySettings {
                key_id,
                key_secret: SecretString::from(secret),
            }),
            _ => None,
        };

        let cloudinary = match (
            non_empty_var("CLOUDINARY_CLOUD_NAME"),
            non_empty_var("CLOUDINARY_API_KEY"),
            non_empty_var("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(secret)) => Some(CloudinarySettings {
                cloud_name,
                api_key,
                api_secret: SecretString::from(secret),
                folder: non_empty_var("CLOUDINARY_FOLDER")
                    .unwrap_or_else(|| DEFAULT_CLOUDINARY_FOLDER.to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            environment,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            allowed_origins,
            upload_dir: PathBuf::from(
                env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            ),
            identity: IdentitySettings {
                jwt_public_key,
                issuer: non_empty_var("CLERK_ISSUER_URL"),
            },
            razorpay,
            cloudinary,
        })
    }

    /// Whether the service runs in production mode.
    pub fn is_production(&self) -> bool {
        self.environment == ENV_PRODUCTION
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Split a comma separated origin list, dropping blanks and trailing slashes.
pub(crate) fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
