//! Stub scoring server for integration tests.
//!
//! Serves `POST /score` on an ephemeral local port, records every request
//! (headers + body) and answers from a scripted responder.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Value, json};

/// How the stub answers score requests.
#[derive(Clone)]
pub enum ScoreResponder {
    /// Fixed status and body for every request.
    Fixed { status: u16, body: Value },
    /// One score per `text_2` item: `(index + 1) / 10`.
    Indexed,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub headers: HashMap<String, String>,
    pub body: Value,
}

#[derive(Clone)]
struct ServerState {
    responder: ScoreResponder,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct ScoreServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ScoreServer {
    pub async fn spawn(responder: ScoreResponder) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            responder,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/score", post(score_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr: SocketAddr = listener.local_addr().expect("Stub server has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Stub server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub async fn spawn_fixed(status: u16, body: Value) -> Self {
        Self::spawn(ScoreResponder::Fixed { status, body }).await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

async fn score_handler(
    State(state): State<ServerState>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> impl IntoResponse {
    let header_map = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();

    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            headers: header_map,
            body: body.clone(),
        });

    match &state.responder {
        ScoreResponder::Fixed { status, body } => (
            StatusCode::from_u16(*status).expect("valid status code"),
            axum::Json(body.clone()),
        ),
        ScoreResponder::Indexed => {
            let count = match body.get("text_2") {
                Some(Value::Array(items)) => items.len(),
                Some(_) => 1,
                None => 0,
            };
            let data: Vec<Value> = (0..count)
                .map(|i| json!({"score": (i + 1) as f64 / 10.0}))
                .collect();

            (StatusCode::OK, axum::Json(json!({"data": data})))
        }
    }
}
