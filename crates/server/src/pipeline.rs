//! Audio side of a command request: stage the upload, check its format,
//! archive it and obtain a transcript.

use std::{sync::Arc, time::Duration};

use speech::{
    archive_key, AudioProfile, AudioStager, BlobStore, FormatProber, SpeechError, StagedAudio,
    Transcriber,
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to stage upload: {0}")]
    Staging(#[source] SpeechError),
    #[error("Failed to archive audio: {0}")]
    Archival(#[source] SpeechError),
    #[error("Archive upload timed out after {0:?}")]
    ArchivalTimeout(Duration),
    #[error("Transcription unavailable: {0}")]
    Transcription(#[source] SpeechError),
    #[error("Transcription timed out after {0:?}")]
    TranscriptionTimeout(Duration),
}

pub struct VoicePipeline {
    stager: AudioStager,
    prober: Arc<dyn FormatProber>,
    blob_store: Arc<dyn BlobStore>,
    transcriber: Arc<dyn Transcriber>,
    profile: AudioProfile,
    timeouts: PipelineTimeouts,
}

/// Upper bounds for the two remote calls of a request.
#[derive(Debug, Clone, Copy)]
pub struct PipelineTimeouts {
    pub archive: Duration,
    pub transcription: Duration,
}

impl VoicePipeline {
    pub fn new(
        stager: AudioStager,
        prober: Arc<dyn FormatProber>,
        blob_store: Arc<dyn BlobStore>,
        transcriber: Arc<dyn Transcriber>,
        profile: AudioProfile,
        timeouts: PipelineTimeouts,
    ) -> Self {
        Self {
            stager,
            prober,
            blob_store,
            transcriber,
            profile,
            timeouts,
        }
    }

    /// Run an uploaded clip through staging, probing, archival and
    /// transcription. The staged copy is removed whatever the outcome.
    pub async fn transcribe_upload(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, PipelineError> {
        let staged = self
            .stager
            .stage(original_name, bytes)
            .await
            .map_err(PipelineError::Staging)?;

        let result = self.transcribe_staged(&staged).await;
        self.stager.discard(&staged).await;
        result
    }

    async fn transcribe_staged(&self, staged: &StagedAudio) -> Result<String, PipelineError> {
        self.probe(staged).await;

        let key = archive_key(&staged.file_name);
        let locator = match tokio::time::timeout(
            self.timeouts.archive,
            self.blob_store.archive(&staged.path, &key),
        )
        .await
        {
            Ok(result) => result.map_err(PipelineError::Archival)?,
            Err(_) => return Err(PipelineError::ArchivalTimeout(self.timeouts.archive)),
        };

        match tokio::time::timeout(self.timeouts.transcription, self.transcriber.transcribe(&locator))
            .await
        {
            Ok(result) => result.map_err(PipelineError::Transcription),
            Err(_) => Err(PipelineError::TranscriptionTimeout(self.timeouts.transcription)),
        }
    }

    async fn probe(&self, staged: &StagedAudio) {
        match self.prober.probe(&staged.path).await {
            Ok(metadata) => {
                info!("Audio info for {}: {:?}", staged.file_name, metadata);
                if !metadata.matches(&self.profile) {
                    warn!(
                        "{} is {} Hz / {} ch / {} bit but recognition expects {} Hz / {} ch LINEAR16",
                        staged.file_name,
                        metadata.sample_rate,
                        metadata.channels,
                        metadata.bits_per_sample,
                        self.profile.sample_rate_hertz,
                        self.profile.audio_channel_count
                    );
                }
            }
            Err(e) => warn!("Could not read audio info for {}: {}", staged.file_name, e),
        }
    }
}
