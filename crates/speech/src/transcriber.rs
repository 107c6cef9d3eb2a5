//! Speech recognition through the Google Cloud Speech-to-Text v1 REST API.

use std::{sync::Arc, time::Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    auth::TokenSource,
    config::AudioProfile,
    error::{SpeechError, SpeechResult},
};

#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the archived clip at `locator`. Segments are joined with
    /// newlines, using the top alternative of each.
    async fn transcribe(&self, locator: &str) -> SpeechResult<String>;
}

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    config: &'a AudioProfile,
    audio: RecognitionAudio<'a>,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio<'a> {
    uri: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub results: Vec<RecognitionResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub transcript: String,
    pub confidence: Option<f32>,
}

impl RecognizeResponse {
    /// `None` when the recognizer produced no segments at all.
    pub fn transcript(&self) -> Option<String> {
        if self.results.is_empty() {
            return None;
        }
        let segments: Vec<&str> = self
            .results
            .iter()
            .map(|result| {
                result
                    .alternatives
                    .first()
                    .map(|alt| alt.transcript.as_str())
                    .unwrap_or_default()
            })
            .collect();
        Some(segments.join("\n"))
    }
}

pub struct GoogleSpeechTranscriber {
    client: reqwest::Client,
    base_url: String,
    profile: AudioProfile,
    tokens: Arc<dyn TokenSource>,
}

impl GoogleSpeechTranscriber {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        profile: AudioProfile,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            profile,
            tokens,
        }
    }
}

#[async_trait]
impl Transcriber for GoogleSpeechTranscriber {
    async fn transcribe(&self, locator: &str) -> SpeechResult<String> {
        let start_time = Instant::now();
        let token = self.tokens.access_token().await?;

        info!(
            "Transcribing {} ({}, {} Hz, {} ch)",
            locator,
            self.profile.language_code,
            self.profile.sample_rate_hertz,
            self.profile.audio_channel_count
        );

        let request = RecognizeRequest {
            config: &self.profile,
            audio: RecognitionAudio { uri: locator },
        };
        let response = self
            .client
            .post(format!("{}/v1/speech:recognize", self.base_url))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::Transcription(format!(
                "recognize returned {}: {}",
                status, error_text
            )));
        }

        let body: RecognizeResponse = response.json().await?;
        debug!("Recognize response: {:?}", body);

        let transcript = body.transcript().ok_or(SpeechError::NoResults)?;
        info!(
            "Transcription completed in {}ms: '{}'",
            start_time.elapsed().as_millis(),
            transcript
        );
        Ok(transcript)
    }
}
