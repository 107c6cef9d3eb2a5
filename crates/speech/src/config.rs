//! Configuration for the Google Cloud collaborators.
//!
//! Environment variables:
//!   BUCKET_NAME                     - bucket receiving archived clips (required)
//!   GOOGLE_APPLICATION_CREDENTIALS  - service-account key file
//!   GOOGLE_ACCESS_TOKEN             - fixed bearer token, overrides the key file
//!   STAGING_DIR                     - where uploads are staged (default: /tmp)
//!   SPEECH_API_URL                  - default: https://speech.googleapis.com
//!   STORAGE_API_URL                 - default: https://storage.googleapis.com
//!   SPEECH_LANGUAGE                 - BCP-47 language code (default: es-ES)

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{SpeechError, SpeechResult};

pub const DEFAULT_SPEECH_API_URL: &str = "https://speech.googleapis.com";
pub const DEFAULT_STORAGE_API_URL: &str = "https://storage.googleapis.com";

/// Recognition settings sent with every request. Matches what the recording
/// clients produce: 16-bit PCM, 44.1 kHz stereo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioProfile {
    pub encoding: String,
    pub sample_rate_hertz: u32,
    pub language_code: String,
    pub audio_channel_count: u16,
}

impl Default for AudioProfile {
    fn default() -> Self {
        Self {
            encoding: "LINEAR16".to_string(),
            sample_rate_hertz: 44100,
            language_code: "es-ES".to_string(),
            audio_channel_count: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub bucket_name: String,
    pub credentials_path: Option<PathBuf>,
    pub access_token: Option<String>,
    pub staging_dir: PathBuf,
    pub speech_api_url: String,
    pub storage_api_url: String,
    pub profile: AudioProfile,
}

impl SpeechConfig {
    pub fn from_env() -> SpeechResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SpeechResult<Self> {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bucket_name = lookup("BUCKET_NAME").ok_or(SpeechError::MissingConfig("BUCKET_NAME"))?;
        let bucket_name = bucket_name.trim().to_string();
        if bucket_name.is_empty() || bucket_name.contains('/') {
            return Err(SpeechError::InvalidConfig(format!(
                "BUCKET_NAME '{}' is not a valid bucket name",
                bucket_name
            )));
        }

        let mut profile = AudioProfile::default();
        if let Some(language) = non_empty("SPEECH_LANGUAGE") {
            profile.language_code = language;
        }

        Ok(Self {
            bucket_name,
            credentials_path: non_empty("GOOGLE_APPLICATION_CREDENTIALS").map(PathBuf::from),
            access_token: non_empty("GOOGLE_ACCESS_TOKEN"),
            staging_dir: non_empty("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            speech_api_url: non_empty("SPEECH_API_URL")
                .unwrap_or_else(|| DEFAULT_SPEECH_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            storage_api_url: non_empty("STORAGE_API_URL")
                .unwrap_or_else(|| DEFAULT_STORAGE_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            profile,
        })
    }
}
