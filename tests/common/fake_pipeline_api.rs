//! Fake PDF extraction pipeline API for integration tests.
//!
//! Serves the subset of the pipeline API the console uses:
//! - `POST /api/upload`: accepts a multipart file, returns a `file_id`
//! - `GET /api/quick-setup`: fixed sample settings
//! - `POST /api/extract`: form fields, starts a job for a known `file_id`
//! - `GET /api/results/{job_id}`: next status from a per-job script
//! - `GET /api/file?path=...`: registered file contents
//! - `GET /api/download-all/{job_id}`: a stand-in zip for a known job
//!
//! Errors use FastAPI's `{"detail": "..."}` shape.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Default)]
struct PipelineState {
    /// file_id → original filename
    uploads: HashMap<String, String>,
    /// Form fields of every extract call.
    extract_calls: Vec<HashMap<String, String>>,
    /// job_id → statuses still to report; the last one repeats.
    statuses: HashMap<String, VecDeque<String>>,
    files: HashMap<String, String>,
    /// Statuses every new job reports, in order.
    script: Vec<String>,
}

type Shared = Arc<Mutex<PipelineState>>;

pub struct FakePipelineApi {
    addr: SocketAddr,
    state: Shared,
}

impl FakePipelineApi {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state: Shared = Arc::new(Mutex::new(PipelineState {
            script: vec!["INITIALIZED".into(), "READY".into(), "COMPLETED".into()],
            ..PipelineState::default()
        }));

        let app = Router::new()
            .route("/api/upload", post(upload))
            .route("/api/quick-setup", get(quick_setup))
            .route("/api/extract", post(extract))
            .route("/api/results/{job_id}", get(results))
            .route("/api/file", get(file))
            .route("/api/download-all/{job_id}", get(download_all))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Bytes served by `download-all` for `job_id`.
    pub fn archive_for(job_id: &str) -> Vec<u8> {
        let mut archive = b"PK\x03\x04".to_vec();
        archive.extend_from_slice(format!("run_{job_id}").as_bytes());
        archive
    }

    /// Statuses reported by jobs started after this call.
    pub async fn script_statuses(&self, statuses: &[&str]) {
        self.state.lock().await.script = statuses.iter().map(|s| s.to_string()).collect();
    }

    pub async fn add_file(&self, path: &str, content: &str) {
        self.state
            .lock()
            .await
            .files
            .insert(path.to_string(), content.to_string());
    }

    pub async fn extract_calls(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().await.extract_calls.clone()
    }

    pub async fn uploaded_filename(&self, file_id: &str) -> Option<String> {
        self.state.lock().await.uploads.get(file_id).cloned()
    }
}

fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn upload(
    State(state): State<Shared>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let is_multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data; boundary="));
    if !is_multipart {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "expected multipart upload");
    }

    let text = String::from_utf8_lossy(&body);
    let filename = text
        .split("filename=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap_or("upload.pdf")
        .to_string();

    let mut state = state.lock().await;
    let file_id = format!("file-{}", state.uploads.len() + 1);
    state.uploads.insert(file_id.clone(), filename.clone());
    (
        StatusCode::OK,
        Json(json!({ "file_id": file_id, "filename": filename })),
    )
}

async fn quick_setup(State(state): State<Shared>) -> Json<Value> {
    let mut state = state.lock().await;
    state
        .uploads
        .insert("sample".to_string(), "quickstart_sample.pdf".to_string());
    Json(json!({
        "file_id": "sample",
        "filename": "quickstart_sample.pdf",
        "metadata": "fields:\n  - name: table_name\n    type: string\n",
        "prompt": "Extract all tables from the provided document.",
    }))
}

async fn extract(
    State(state): State<Shared>,
    Form(fields): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().await;
    state.extract_calls.push(fields.clone());

    let file_id = fields.get("file_id").cloned().unwrap_or_default();
    if !state.uploads.contains_key(&file_id) {
        return detail(StatusCode::NOT_FOUND, "File not found");
    }

    let job_id = format!("run-{}", state.extract_calls.len());
    let script: VecDeque<String> = state.script.iter().cloned().collect();
    state.statuses.insert(job_id.clone(), script);
    (
        StatusCode::OK,
        Json(json!({ "job_id": job_id, "status": "pending", "pipeline_name": "ui_extraction" })),
    )
}

async fn results(
    State(state): State<Shared>,
    Path(job_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().await;
    let Some(queue) = state.statuses.get_mut(&job_id) else {
        return detail(StatusCode::NOT_FOUND, "Job not found");
    };
    let status = if queue.len() > 1 {
        queue.pop_front().unwrap_or_default()
    } else {
        queue.front().cloned().unwrap_or_default()
    };

    let csv = if status == "COMPLETED" {
        json!([{ "name": "table_1.csv", "path": format!("/runs/{job_id}/output/table_1.csv") }])
    } else {
        json!([])
    };
    (
        StatusCode::OK,
        Json(json!({
            "status": status,
            "error": null,
            "metadata": { "status": status },
            "files": { "csv": csv, "metadata": [] },
        })),
    )
}

async fn file(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let state = state.lock().await;
    match query.get("path").and_then(|p| state.files.get(p)) {
        Some(content) => (StatusCode::OK, content.clone()),
        None => (StatusCode::NOT_FOUND, r#"{"detail":"File not found"}"#.to_string()),
    }
}

async fn download_all(
    State(state): State<Shared>,
    Path(job_id): Path<String>,
) -> Result<([(header::HeaderName, &'static str); 1], Vec<u8>), (StatusCode, Json<Value>)> {
    let state = state.lock().await;
    if !state.statuses.contains_key(&job_id) {
        return Err(detail(StatusCode::NOT_FOUND, "Job not found"));
    }
    Ok((
        [(header::CONTENT_TYPE, "application/zip")],
        FakePipelineApi::archive_for(&job_id),
    ))
}
