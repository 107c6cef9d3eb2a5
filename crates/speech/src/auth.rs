//! Bearer tokens for the Google Cloud REST APIs.

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use tracing::info;
use yup_oauth2::{authenticator::DefaultAuthenticator, ServiceAccountAuthenticator};

use crate::{
    config::SpeechConfig,
    error::{SpeechError, SpeechResult},
};

const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> SpeechResult<String>;
}

/// A token obtained out of band, e.g. `gcloud auth print-access-token`.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> SpeechResult<String> {
        Ok(self.0.clone())
    }
}

/// Tokens minted from a service-account key file. Refresh and caching are
/// handled by the authenticator.
pub struct ServiceAccountTokens {
    authenticator: DefaultAuthenticator,
}

impl ServiceAccountTokens {
    pub async fn from_key_file(path: &Path) -> SpeechResult<Self> {
        let key = yup_oauth2::read_service_account_key(path)
            .await
            .map_err(|e| {
                SpeechError::Credentials(format!("cannot read key file {}: {}", path.display(), e))
            })?;
        let authenticator = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| SpeechError::Credentials(e.to_string()))?;

        info!("Loaded service-account credentials from {}", path.display());
        Ok(Self { authenticator })
    }
}

#[async_trait]
impl TokenSource for ServiceAccountTokens {
    async fn access_token(&self) -> SpeechResult<String> {
        let token = self
            .authenticator
            .token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .map_err(|e| SpeechError::Credentials(e.to_string()))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| SpeechError::Credentials("authenticator returned no access token".to_string()))
    }
}

/// Pick the token source the configuration asks for. A fixed token wins over
/// a key file.
pub async fn token_source(config: &SpeechConfig) -> SpeechResult<Arc<dyn TokenSource>> {
    if let Some(token) = &config.access_token {
        info!("Using fixed Google access token from GOOGLE_ACCESS_TOKEN");
        return Ok(Arc::new(StaticToken::new(token.clone())));
    }

    let path = config
        .credentials_path
        .as_deref()
        .ok_or(SpeechError::MissingConfig("GOOGLE_APPLICATION_CREDENTIALS"))?;
    Ok(Arc::new(ServiceAccountTokens::from_key_file(path).await?))
}
