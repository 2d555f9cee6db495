//! In-process stand-in for the identification provider
//!
//! Binds an axum server on 127.0.0.1:0, records every multipart request it
//! receives and answers with a canned status and body.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What the stub saw in one request
#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    /// Text fields by name
    pub fields: HashMap<String, String>,
    /// `sample` file part: (file name, content type, bytes)
    pub sample: Option<(String, String, Vec<u8>)>,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: Arc<String>,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct StubProvider {
    pub base_url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubProvider {
    /// Reply with `status` and a JSON body
    pub async fn json(status: u16, body: Value) -> Self {
        Self::raw(status, body.to_string()).await
    }

    /// Reply with `status` and an arbitrary body
    pub async fn raw(status: u16, body: impl Into<String>) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status: StatusCode::from_u16(status).unwrap(),
            body: Arc::new(body.into()),
            captured: captured.clone(),
        };

        let app = Router::new()
            .route("/v1/identify", post(handle_identify))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            captured,
        }
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().await.clone()
    }
}

async fn handle_identify(
    State(state): State<StubState>,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    let mut captured = CapturedRequest::default();

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "sample" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap().to_vec();
            captured.sample = Some((file_name, content_type, bytes));
        } else {
            let value = field.text().await.unwrap();
            captured.fields.insert(name, value);
        }
    }

    state.captured.lock().await.push(captured);
    (state.status, state.body.as_ref().clone())
}
