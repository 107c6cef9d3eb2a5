use std::{
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use control::CommandCenter;
use serde_json::Value;
use speech::{AudioProfile, AudioStager, BlobStore, SpeechError, SpeechResult, Transcriber, WavProber};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{
    config::DEFAULT_MAX_UPLOAD_BYTES,
    pipeline::{PipelineTimeouts, VoicePipeline},
    routes,
    state::AppState,
};

const BOUNDARY: &str = "luz-test-boundary";

enum Script {
    Texts(Vec<String>),
    Failing(String),
    Slow(Duration),
}

/// Transcriber answering from a script instead of a remote service.
pub struct FakeTranscriber {
    script: Script,
    calls: AtomicUsize,
}

impl FakeTranscriber {
    pub fn text(text: &str) -> Self {
        Self::sequence(&[text])
    }

    /// Successive calls return successive texts; the last one repeats.
    pub fn sequence(texts: &[&str]) -> Self {
        Self::with(Script::Texts(texts.iter().map(|t| t.to_string()).collect()))
    }

    pub fn failing(error: SpeechError) -> Self {
        Self::with(Script::Failing(error.to_string()))
    }

    pub fn slow(delay: Duration) -> Self {
        Self::with(Script::Slow(delay))
    }

    fn with(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, _locator: &str) -> SpeechResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Texts(texts) => Ok(texts[call.min(texts.len() - 1)].clone()),
            Script::Failing(message) => Err(SpeechError::Transcription(message.clone())),
            Script::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(String::new())
            }
        }
    }
}

/// Blob store that remembers archived keys and the bytes behind them.
#[derive(Default)]
pub struct FakeBlobStore {
    keys: Mutex<Vec<String>>,
    contents: Mutex<Vec<Vec<u8>>>,
    fail: bool,
    delay: Option<Duration>,
}

impl FakeBlobStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Vec<Vec<u8>> {
        self.contents.lock().unwrap().clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for FakeBlobStore {
    async fn archive(&self, local: &Path, key: &str) -> SpeechResult<String> {
        let bytes = tokio::fs::read(local).await?;
        // Give concurrent requests a chance to interleave with this one.
        tokio::task::yield_now().await;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(SpeechError::Storage("bucket unavailable".to_string()));
        }
        self.keys.lock().unwrap().push(key.to_string());
        self.contents.lock().unwrap().push(bytes);
        Ok(format!("gs://test-bucket/{}", key))
    }
}

pub struct TestApp {
    pub center: CommandCenter,
    pub blob_store: Arc<FakeBlobStore>,
    pub transcriber: Arc<FakeTranscriber>,
    pub transcription_timeout: Duration,
    pub archive_timeout: Duration,
    pub max_upload_bytes: usize,
    staging: TempDir,
}

impl TestApp {
    pub fn new(transcriber: FakeTranscriber) -> Self {
        Self {
            center: CommandCenter::new(),
            blob_store: Arc::new(FakeBlobStore::default()),
            transcriber: Arc::new(transcriber),
            transcription_timeout: Duration::from_secs(5),
            archive_timeout: Duration::from_secs(5),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            staging: tempfile::tempdir().unwrap(),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        self.staging.path()
    }

    /// A router over this app's shared state; build one per request.
    pub fn router(&self) -> Router {
        let pipeline = VoicePipeline::new(
            AudioStager::new(self.staging.path()),
            Arc::new(WavProber),
            self.blob_store.clone(),
            self.transcriber.clone(),
            AudioProfile::default(),
            PipelineTimeouts {
                archive: self.archive_timeout,
                transcription: self.transcription_timeout,
            },
        );
        routes::router(AppState::new(self.center.clone(), pipeline), self.max_upload_bytes)
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }
}

/// `PUT /` with a single file field. The payload is not a valid WAV file,
/// which the pipeline tolerates.
pub fn multipart_request(field: &str, file_name: &str) -> Request<Body> {
    let mut payload = b"RIFF".to_vec();
    payload.extend_from_slice(&[0u8; 252]);
    multipart_request_with(field, file_name, &payload)
}

pub fn multipart_request_with(field: &str, file_name: &str, payload: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: audio/wav\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("PUT")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}
