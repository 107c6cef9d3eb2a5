use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Router,
};

/// A request received by a [`FakeGoogleApi`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub uri: Uri,
    pub authorization: Option<String>,
    pub body: Bytes,
}

/// Local HTTP server standing in for a Google REST endpoint. Every request
/// is recorded and answered with the configured status and JSON body.
pub struct FakeGoogleApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn record(
    State(state): State<FakeState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(CapturedRequest {
        uri,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    (
        state.status,
        [("content-type", "application/json")],
        state.body.clone(),
    )
}

impl FakeGoogleApi {
    pub async fn start(status: StatusCode, body: serde_json::Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            status,
            body: body.to_string(),
            requests: requests.clone(),
        };
        let router = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}
