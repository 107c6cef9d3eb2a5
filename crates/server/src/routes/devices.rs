use std::collections::BTreeMap;

use axum::{
    Router,
    extract::{
        Multipart, State,
        multipart::MultipartRejection,
    },
    http::StatusCode,
    response::Json as ResponseJson,
    routing::get,
};
use control::{CommandLogEntry, Intensity};

use crate::{error::ApiError, state::AppState};

/// Multipart field carrying the recording.
pub const AUDIO_FIELD: &str = "audio";

struct AudioUpload {
    file_name: String,
    bytes: Vec<u8>,
}

pub async fn get_devices(State(state): State<AppState>) -> ResponseJson<BTreeMap<String, Intensity>> {
    ResponseJson(state.center.snapshot().await)
}

/// Transcribe an uploaded command and apply it. Answers 200 with the log
/// entry when a command was recognized and 404 with the entry otherwise.
pub async fn put_command(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, ResponseJson<CommandLogEntry>), ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        ApiError::BadRequest(format!(
            "Expected a multipart upload with an 'audio' file field: {}",
            rejection.body_text()
        ))
    })?;
    let upload = read_audio_field(&mut multipart).await?;

    let transcription = state
        .pipeline
        .transcribe_upload(&upload.file_name, &upload.bytes)
        .await?;
    let entry = state.center.interpret(&transcription).await;

    let status = if entry.command.is_success() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, ResponseJson(entry)))
}

async fn read_audio_field(multipart: &mut Multipart) -> Result<AudioUpload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("audio.wav").to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(ApiError::BadRequest("The 'audio' file is empty".to_string()));
        }
        return Ok(AudioUpload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }
    Err(ApiError::BadRequest(
        "Missing 'audio' file field in multipart upload".to_string(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_devices).put(put_command))
}
