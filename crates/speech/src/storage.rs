//! Archival of recordings in Google Cloud Storage.

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::info;

use crate::{
    auth::TokenSource,
    error::{SpeechError, SpeechResult},
};

/// Prefix under which every clip is archived.
pub const ARCHIVE_PREFIX: &str = "audio-files";

pub fn archive_key(file_name: &str) -> String {
    format!("{}/{}", ARCHIVE_PREFIX, file_name)
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a local file under `key` and return a durable locator for it.
    async fn archive(&self, local: &Path, key: &str) -> SpeechResult<String>;
}

pub struct GcsBlobStore {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    tokens: Arc<dyn TokenSource>,
}

impl GcsBlobStore {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            bucket: bucket.into(),
            tokens,
        }
    }

    pub fn locator(&self, key: &str) -> String {
        format!("gs://{}/{}", self.bucket, key)
    }
}

#[async_trait]
impl BlobStore for GcsBlobStore {
    async fn archive(&self, local: &Path, key: &str) -> SpeechResult<String> {
        let bytes = tokio::fs::read(local).await?;
        let size = bytes.len();
        let token = self.tokens.access_token().await?;

        let response = self
            .client
            .post(format!(
                "{}/upload/storage/v1/b/{}/o",
                self.base_url, self.bucket
            ))
            .query(&[("uploadType", "media"), ("name", key)])
            .bearer_auth(token)
            .header(CONTENT_TYPE, "audio/wav")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::Storage(format!(
                "upload of {} to bucket {} failed with {}: {}",
                key, self.bucket, status, error_text
            )));
        }

        let locator = self.locator(key);
        info!("{} uploaded to {} ({} bytes)", local.display(), locator, size);
        Ok(locator)
    }
}
