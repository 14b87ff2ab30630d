//! Errors raised by backend requests

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS or body read failure
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("HTTP {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    /// 2xx body that is not the JSON we expected
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response variant doesn't belong to the request that produced it
    #[error("unexpected response to {0}")]
    Unexpected(&'static str),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default()
}

impl ApiError {
    /// Build a status error, pulling a detail message out of the body
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        ApiError::Status {
            status,
            detail: extract_detail(body),
        }
    }

    /// Backend-provided detail, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message suitable for an alert or an inline error line
    pub fn user_message(&self) -> String {
        if let Some(detail) = self.detail() {
            return detail.to_string();
        }
        match self {
            ApiError::Status { status, .. } => {
                format!("The server could not complete the request (HTTP {}).", status)
            }
            ApiError::Transport(_) => {
                "Could not reach the server. Check that the backend is running.".to_string()
            }
            ApiError::Decode(_) | ApiError::Unexpected(_) => {
                "The server returned an unexpected response.".to_string()
            }
        }
    }
}

/// Pull a human-readable message out of an error body
///
/// Handles `{"detail": "..."}`, validation errors shaped as
/// `{"detail": [{"msg": "..."}, ...]}` and `{"message": "..."}`.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let json: Value = serde_json::from_slice(body).ok()?;

    match json.get("detail") {
        Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .map(str::to_string)
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }

    json.get("message")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
