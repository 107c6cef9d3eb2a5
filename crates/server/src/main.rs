use std::sync::Arc;

use anyhow::Error as AnyhowError;
use control::CommandCenter;
use server::{
    config::ServerConfig,
    pipeline::{PipelineTimeouts, VoicePipeline},
    routes,
    state::AppState,
};
use speech::{
    AudioStager, GcsBlobStore, GoogleSpeechTranscriber, SpeechConfig, SpeechError, WavProber,
};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Debug, Error)]
pub enum LuzError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Speech(#[from] SpeechError),
    #[error(transparent)]
    Other(#[from] AnyhowError),
}

#[tokio::main]
async fn main() -> Result<(), LuzError> {
    // Load environment variables from `.env` if present so local development picks up credentials
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_string = format!(
        "warn,server={level},speech={level},control={level}",
        level = log_level
    );
    let env_filter = EnvFilter::try_new(filter_string).map_err(AnyhowError::from)?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    let config = ServerConfig::from_env()?;
    let speech_config = SpeechConfig::from_env()?;
    let tokens = speech::token_source(&speech_config).await?;
    let client = reqwest::Client::new();

    let pipeline = VoicePipeline::new(
        AudioStager::new(&speech_config.staging_dir),
        Arc::new(WavProber),
        Arc::new(GcsBlobStore::new(
            client.clone(),
            &speech_config.storage_api_url,
            &speech_config.bucket_name,
            tokens.clone(),
        )),
        Arc::new(GoogleSpeechTranscriber::new(
            client,
            &speech_config.speech_api_url,
            speech_config.profile.clone(),
            tokens,
        )),
        speech_config.profile.clone(),
        PipelineTimeouts {
            archive: config.archive_timeout,
            transcription: config.transcription_timeout,
        },
    );
    tracing::info!(
        "Archiving to bucket {} (timeout {:?}), staging uploads in {}, transcription timeout {:?}",
        speech_config.bucket_name,
        config.archive_timeout,
        speech_config.staging_dir.display(),
        config.transcription_timeout
    );

    let app_router = routes::router(
        AppState::new(CommandCenter::new(), pipeline),
        config.max_upload_bytes,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    let actual_port = listener.local_addr()?.port();
    tracing::info!("Server running on http://{}:{}", config.host, actual_port);

    axum::serve(listener, app_router).await?;
    Ok(())
}
