//! Extraction pipeline client.
//!
//! Drives the upload → configure → poll flow of the PDF extraction service.
//! The extraction itself runs remotely; this client only moves files and
//! settings in and status and output files out.

use crate::error::{endpoint, ClientError};
use crate::transport::{ApiRequest, ApiResponse, HyperTransport, Transport};
use bytes::Bytes;
use gin_core::config::{Config, ExtractionConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Statuses after which a run no longer changes.
const TERMINAL_STATUSES: &[&str] = &["COMPLETED", "FAILED"];

// ---------------------------------------------------------------------------
// Payload types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub file_id: String,
    pub filename: String,
}

/// A server-side sample document with a ready-made schema and prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickSetup {
    pub file_id: String,
    pub filename: String,
    pub metadata: String,
    pub prompt: String,
}

/// Settings for one extraction run. `metadata` is the YAML schema text.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub file_id: String,
    pub api_key: String,
    pub metadata: String,
    pub prompt: String,
}

impl std::fmt::Debug for ExtractionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionRequest")
            .field("file_id", &self.file_id)
            .field("api_key", &"<redacted>")
            .field("metadata", &self.metadata)
            .field("prompt", &self.prompt)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionJob {
    pub job_id: String,
    pub status: String,
    #[serde(default)]
    pub pipeline_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResults {
    #[serde(default = "unknown_status")]
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub files: JobFiles,
}

fn unknown_status() -> String {
    "UNKNOWN".to_string()
}

impl JobResults {
    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATUSES
            .iter()
            .any(|s| self.status.eq_ignore_ascii_case(s))
    }

    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case("COMPLETED")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobFiles {
    #[serde(default)]
    pub csv: Vec<FileItem>,
    #[serde(default)]
    pub metadata: Vec<FileItem>,
    #[serde(default)]
    pub system: Option<FileNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    pub name: String,
    pub path: String,
}

/// Directory tree of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Vec<FileNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct ExtractionClient<T> {
    transport: T,
    api_url: String,
    poll_interval: Duration,
}

impl ExtractionClient<HyperTransport> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(HyperTransport::new(), &config.extraction)
    }
}

impl<T: Transport> ExtractionClient<T> {
    pub fn new(transport: T, config: &ExtractionConfig) -> Self {
        Self {
            transport,
            api_url: config.api_url.clone(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Upload a PDF. The returned `file_id` feeds [`Self::start_extraction`].
    pub async fn upload(&self, filename: &str, data: &[u8]) -> Result<UploadReceipt, ClientError> {
        let url = self.url(&["api", "upload"])?;
        let request = ApiRequest::multipart_file(url, "file", filename, "application/pdf", data);
        let response = self.send(request).await?;
        decode(&response)
    }

    /// Stage the server's bundled sample document.
    pub async fn quick_setup(&self) -> Result<QuickSetup, ClientError> {
        let url = self.url(&["api", "quick-setup"])?;
        let response = self.send(ApiRequest::get(url)).await?;
        decode(&response)
    }

    pub async fn start_extraction(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractionJob, ClientError> {
        let url = self.url(&["api", "extract"])?;
        let form = ApiRequest::form(
            url,
            &[
                ("file_id", request.file_id.as_str()),
                ("api_key", request.api_key.as_str()),
                ("metadata", request.metadata.as_str()),
                ("prompt", request.prompt.as_str()),
            ],
        );
        let response = self.send(form).await?;
        let job: ExtractionJob = decode(&response)?;
        tracing::info!(job_id = %job.job_id, pipeline = %job.pipeline_name, "extraction started");
        Ok(job)
    }

    /// Current state of a run. `None` when the service does not know the job.
    pub async fn results(&self, job_id: &str) -> Result<Option<JobResults>, ClientError> {
        let url = self.url(&["api", "results", job_id])?;
        let response = self.transport.send(ApiRequest::get(url)).await?;
        if response.is_not_found() {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(ClientError::from_response(&response, "detail"));
        }
        decode(&response).map(Some)
    }

    /// Poll [`Self::results`] every configured interval until the run reaches
    /// a terminal status.
    ///
    /// A failed poll is logged and retried on the next tick. There is no
    /// overall deadline; wrap the call in `tokio::time::timeout` to bound it.
    pub async fn wait_for_completion(&self, job_id: &str) -> JobResults {
        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            ticker.tick().await;
            match self.results(job_id).await {
                Ok(Some(results)) if results.is_terminal() => return results,
                Ok(Some(results)) => {
                    tracing::debug!(job_id, status = %results.status, "extraction still running");
                }
                Ok(None) => tracing::debug!(job_id, "job not visible yet"),
                Err(err) => tracing::warn!(job_id, %err, "polling error"),
            }
        }
    }

    /// Text of an output file listed in [`JobResults::files`].
    pub async fn file_content(&self, path: &str) -> Result<String, ClientError> {
        let mut url = self.url(&["api", "file"])?;
        url.query_pairs_mut().append_pair("path", path);
        let response = self.send(ApiRequest::get(url)).await?;
        Ok(response.text())
    }

    /// Zip archive of the whole run directory.
    pub async fn download_all(&self, job_id: &str) -> Result<Bytes, ClientError> {
        let url = self.url(&["api", "download-all", job_id])?;
        let response = self.send(ApiRequest::get(url)).await?;
        tracing::debug!(job_id, bytes = response.body.len(), "run archive downloaded");
        Ok(response.body)
    }

    fn url(&self, segments: &[&str]) -> Result<url::Url, ClientError> {
        endpoint(&self.api_url, segments)
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ClientError::from_response(&response, "detail"));
        }
        Ok(response)
    }
}

fn decode<D: DeserializeOwned>(response: &ApiResponse) -> Result<D, ClientError> {
    serde_json::from_slice(&response.body).map_err(Into::into)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
