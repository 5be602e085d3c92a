// src/api/upload.rs

//! Image hosting for product variant and blog cover images

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::cancellable;
use crate::config::UploadConfig;
use crate::error::{Error, Result};

/// A file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Turns a picked file into a hosted URL.
///
/// Failures are logged and surface as `None`; the caller leaves the image
/// field empty so its own required rule reports it.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait ImageUploader: UploaderBounds {
    async fn upload(&self, file: ImageFile, cancel: &CancellationToken) -> Option<String>;
}

#[cfg(not(target_arch = "wasm32"))]
pub trait UploaderBounds: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> UploaderBounds for T {}

#[cfg(target_arch = "wasm32")]
pub trait UploaderBounds: Sync {}
#[cfg(target_arch = "wasm32")]
impl<T: Sync> UploaderBounds for T {}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    client: Client,
    config: UploadConfig,
}

impl CloudinaryUploader {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Rejects files the host would refuse before any bytes are sent
    pub fn check(&self, file: &ImageFile) -> Result<()> {
        if !file.mime.starts_with(&self.config.accepted_mime_prefix) {
            return Err(Error::upload(
                Some(file.name.clone()),
                format!("Unsupported file type {}", file.mime),
            ));
        }
        if file.size() > self.config.max_file_size {
            return Err(Error::upload(
                Some(file.name.clone()),
                format!(
                    "File is {} bytes, the limit is {}",
                    file.size(),
                    self.config.max_file_size
                ),
            ));
        }
        Ok(())
    }

    async fn try_upload(&self, file: ImageFile, cancel: &CancellationToken) -> Result<String> {
        self.check(&file)?;
        let name = file.name.clone();
        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&file.mime)
            .map_err(|e| Error::upload(Some(name.clone()), e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());

        let endpoint = self.config.endpoint();
        cancellable("image upload", cancel, async {
            let response = self.client.post(&endpoint).multipart(form).send().await?;
            let status = response.status();
            let body: UploadResponse = response.json().await.unwrap_or(UploadResponse { secure_url: None });
            match body.secure_url {
                Some(url) if status.is_success() => Ok(url),
                _ => Err(Error::upload(
                    Some(name.clone()),
                    format!("Failed to upload image ({})", status.as_u16()),
                )),
            }
        })
        .await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl ImageUploader for CloudinaryUploader {
    async fn upload(&self, file: ImageFile, cancel: &CancellationToken) -> Option<String> {
        let name = file.name.clone();
        match self.try_upload(file, cancel).await {
            Ok(url) => {
                tracing::debug!(file = %name, %url, "image uploaded");
                Some(url)
            }
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                tracing::error!(file = %name, error = %e.message, "image upload failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploader() -> CloudinaryUploader {
        CloudinaryUploader::new(UploadConfig {
            cloud_name: "demo".to_string(),
            upload_preset: "unsigned".to_string(),
            ..UploadConfig::default()
        })
    }

    #[test]
    fn test_check_rejects_non_images() {
        let file = ImageFile::new("notes.txt", "text/plain", vec![0; 10]);
        assert!(uploader().check(&file).is_err());
    }

    #[test]
    fn test_check_rejects_large_files() {
        let file = ImageFile::new("big.png", "image/png", vec![0; 1_500_001]);
        assert!(uploader().check(&file).is_err());
        let file = ImageFile::new("ok.png", "image/png", vec![0; 1_500_000]);
        assert!(uploader().check(&file).is_ok());
    }

    #[tokio::test]
    async fn test_rejected_file_yields_none() {
        let file = ImageFile::new("notes.txt", "text/plain", vec![1, 2, 3]);
        let url = uploader().upload(file, &CancellationToken::new()).await;
        assert_eq!(url, None);
    }

    #[tokio::test]
    async fn test_cancelled_upload_yields_none() {
        let token = CancellationToken::new();
        token.cancel();
        let file = ImageFile::new("a.png", "image/png", vec![1]);
        assert_eq!(uploader().upload(file, &token).await, None);
    }
}
