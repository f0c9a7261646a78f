//! Image storage backends.
//!
//! Uploaded menu images either go to the Cloudinary CDN, when credentials
//! are configured, or to a local directory served under `/images`.

use async_trait::async_trait;
use reqwest::{multipart, Client};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::config::CloudinarySettings;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Bound applied by the CDN to stored images
const CLOUDINARY_TRANSFORMATION: &str = "c_limit,h_800,w_800";

/// Validated image file ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Sanitized, timestamp-prefixed filename
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Image store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store an image and return the reference to persist with the record
    async fn store(&self, upload: ImageUpload) -> AppResult<String>;

    /// Delete a previously stored image by reference
    async fn delete(&self, reference: &str) -> AppResult<()>;
}

fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Images kept on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for a reference, confined to the upload directory.
    fn path_for(&self, reference: &str) -> Option<PathBuf> {
        Path::new(reference)
            .file_name()
            .map(|name| self.dir.join(name))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, upload: ImageUpload) -> AppResult<String> {
        let path = self
            .path_for(&upload.filename)
            .ok_or_else(|| AppError::validation("Invalid file name"))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create upload directory: {e}")))?;
        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to write image: {e}")))?;

        debug!(path = %path.display(), "Image stored locally");
        Ok(upload.filename)
    }

    async fn delete(&self, reference: &str) -> AppResult<()> {
        if is_remote(reference) {
            debug!(reference, "Skipping delete of remote image");
            return Ok(());
        }

        let path = self
            .path_for(reference)
            .ok_or_else(|| AppError::validation("Invalid image reference"))?;

        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| AppError::internal(format!("Failed to delete {}: {e}", path.display())))
    }
}

/// Derive the CDN public id from a delivery URL.
///
/// Delivery URLs end in `.../{folder}/{public_id}.{format}`; the stored
/// public id is the folder joined with the final segment minus extension.
pub fn cloudinary_public_id(folder: &str, url: &str) -> Option<String> {
    let file = url.rsplit('/').next()?;
    let stem = file.split('.').next()?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{folder}/{stem}"))
}

/// Signature over alphabetically sorted `key=value` pairs plus the secret.
fn sign_params(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    hex::encode(Sha256::digest(format!("{joined}{secret}").as_bytes()))
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Cloudinary signed-upload client.
///
/// Bare filenames left over from local storage are deleted from the
/// local directory instead.
#[derive(Clone)]
pub struct CloudinaryStore {
    client: Client,
    cloud_name: String,
    api_key: String,
    api_secret: SecretString,
    folder: String,
    local: LocalImageStore,
}

impl std::fmt::Debug for CloudinaryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryStore")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("folder", &self.folder)
            .finish_non_exhaustive()
    }
}

impl CloudinaryStore {
    #[must_use]
    pub fn new(settings: &CloudinarySettings, local: LocalImageStore) -> Self {
        Self {
            client: Client::new(),
            cloud_name: settings.cloud_name.clone(),
            api_key: settings.api_key.clone(),
            api_secret: settings.api_secret.clone(),
            folder: settings.folder.clone(),
            local,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/{action}",
            self.cloud_name
        )
    }

    fn timestamp() -> String {
        chrono::Utc::now().timestamp().to_string()
    }
}

#[async_trait]
impl ImageStore for CloudinaryStore {
    #[instrument(skip(self, upload), fields(filename = %upload.filename))]
    async fn store(&self, upload: ImageUpload) -> AppResult<String> {
        let public_id = upload
            .filename
            .split('.')
            .next()
            .unwrap_or(&upload.filename)
            .to_string();
        let timestamp = Self::timestamp();
        let signature = sign_params(
            &[
                ("folder", self.folder.as_str()),
                ("public_id", public_id.as_str()),
                ("timestamp", timestamp.as_str()),
                ("transformation", CLOUDINARY_TRANSFORMATION),
            ],
            self.api_secret.expose_secret(),
        );

        let file = multipart::Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(&upload.content_type)
            .map_err(|e| AppError::validation(format!("Invalid content type: {e}")))?;

        let form = multipart::Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("folder", self.folder.clone())
            .text("public_id", public_id)
            .text("timestamp", timestamp)
            .text("transformation", CLOUDINARY_TRANSFORMATION)
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Image upload failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "Cloudinary upload rejected");
            return Err(AppError::upstream(format!("Image upload failed with {status}")));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Unexpected image upload response: {e}")))?;

        info!(url = %uploaded.secure_url, "Image uploaded to Cloudinary");
        Ok(uploaded.secure_url)
    }

    async fn delete(&self, reference: &str) -> AppResult<()> {
        if !is_remote(reference) {
            return self.local.delete(reference).await;
        }

        let public_id = cloudinary_public_id(&self.folder, reference)
            .ok_or_else(|| AppError::validation("Invalid image reference"))?;
        let timestamp = Self::timestamp();
        let signature = sign_params(
            &[("public_id", public_id.as_str()), ("timestamp", timestamp.as_str())],
            self.api_secret.expose_secret(),
        );

        let params = [
            ("public_id", public_id.as_str()),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.api_key.as_str()),
            ("signature_algorithm", "sha256"),
            ("signature", signature.as_str()),
        ];

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Image delete failed: {e}")))?;

        let outcome: DestroyResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Unexpected image delete response: {e}")))?;

        if outcome.result != "ok" {
            return Err(AppError::upstream(format!(
                "Image delete for {public_id} returned {}",
                outcome.result
            )));
        }

        debug!(%public_id, "Image deleted from Cloudinary");
        Ok(())
    }
}
