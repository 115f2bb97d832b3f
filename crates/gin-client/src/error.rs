use crate::transport::{ApiResponse, TransportError};
use hyper::StatusCode;
use serde_json::Value;

/// Failures surfaced by the entity and extraction clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Non-OK response. `message` is the backend's own error text when it
    /// sent one.
    #[error("{message}")]
    Backend { status: StatusCode, message: String },

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected response payload: {0}")]
    UnexpectedPayload(Value),
}

impl ClientError {
    /// Build a [`ClientError::Backend`] from a non-OK response, reading the
    /// message from `field` of a JSON body (`error` for OpenGIN, `detail` for
    /// the extraction API).
    pub(crate) fn from_response(response: &ApiResponse, field: &str) -> Self {
        let message = serde_json::from_slice::<Value>(&response.body)
            .ok()
            .and_then(|body| body.get(field).and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| {
                format!(
                    "Backend API error: {}",
                    response
                        .status
                        .canonical_reason()
                        .unwrap_or(response.status.as_str())
                )
            });
        ClientError::Backend {
            status: response.status,
            message,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Join path segments onto a base URL, percent-encoding each segment.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<url::Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidUrl {
        url: base.to_string(),
        reason,
    };
    let mut url = url::Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
