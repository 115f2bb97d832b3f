//! Fake OpenGIN backend for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. It stands in for both the read API and the ingestion API:
//! - `POST /v1/entities/search`: canned reply keyed by `kind.major` or `id`
//! - `POST /entities`: canned write reply
//! - `PUT /entities/{id}`: canned write reply
//!
//! Unknown search keys answer 404, which the backend uses for "no entities".
//! Every request body is recorded for later assertions.
//!
//! # Example
//!
//! ```rust,ignore
//! use common::fake_opengin_api::FakeOpenGinApi;
//!
//! let api = FakeOpenGinApi::start().await.unwrap();
//! api.reply_for_kind("Person", StatusCode::OK, r#"[{"id":"p1"}]"#).await;
//!
//! // Point an EntityClient at api.backend_config()
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use gin_core::config::BackendConfig;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: String,
}

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    search: HashMap<String, Reply>,
    write: Option<Reply>,
    requests: Vec<Recorded>,
}

type Shared = Arc<Mutex<ApiState>>;

/// Handle to the running fake OpenGIN server.
pub struct FakeOpenGinApi {
    addr: SocketAddr,
    state: Shared,
}

impl FakeOpenGinApi {
    /// Start the server on a random port. Returns once the listener is bound.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state: Shared = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/v1/entities/search", post(search))
            .route("/entities", post(create))
            .route("/entities/{id}", put(update))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Backend config pointing both OpenGIN services at this server.
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            read_url: self.base_url(),
            ingestion_url: self.base_url(),
        }
    }

    /// Reply for `{"kind": {"major": major}}` searches.
    pub async fn reply_for_kind(&self, major: &str, status: StatusCode, body: impl Into<String>) {
        self.set_search(major, status, body.into()).await;
    }

    /// Reply for `{"id": id}` searches.
    pub async fn reply_for_id(&self, id: &str, status: StatusCode, body: impl Into<String>) {
        self.set_search(id, status, body.into()).await;
    }

    /// Reply for create and update calls.
    pub async fn reply_to_writes(&self, status: StatusCode, body: impl Into<String>) {
        self.state.lock().await.write = Some(Reply {
            status,
            body: body.into(),
        });
    }

    pub async fn requests(&self) -> Vec<Recorded> {
        self.state.lock().await.requests.clone()
    }

    async fn set_search(&self, key: &str, status: StatusCode, body: String) {
        self.state
            .lock()
            .await
            .search
            .insert(key.to_string(), Reply { status, body });
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn search(State(state): State<Shared>, Json(filter): Json<Value>) -> (StatusCode, String) {
    let key = filter["kind"]["major"]
        .as_str()
        .or_else(|| filter["id"].as_str())
        .unwrap_or_default()
        .to_string();

    let mut state = state.lock().await;
    state.requests.push(Recorded {
        method: "POST",
        path: "/v1/entities/search".to_string(),
        body: filter,
    });
    match state.search.get(&key) {
        Some(reply) => (reply.status, reply.body.clone()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}

async fn create(State(state): State<Shared>, Json(body): Json<Value>) -> (StatusCode, String) {
    record_write(&state, "POST", "/entities".to_string(), body).await
}

async fn update(
    Path(id): Path<String>,
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    record_write(&state, "PUT", format!("/entities/{id}"), body).await
}

async fn record_write(
    state: &Shared,
    method: &'static str,
    path: String,
    body: Value,
) -> (StatusCode, String) {
    let mut state = state.lock().await;
    let echo = body.to_string();
    state.requests.push(Recorded { method, path, body });
    match &state.write {
        Some(reply) => (reply.status, reply.body.clone()),
        None => (StatusCode::OK, echo),
    }
}
