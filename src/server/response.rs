use http::StatusCode;
use may_minihttp::Response;
use serde::Serialize;
use tracing::error;

pub const CONTENT_TYPE_JSON: &str = "Content-Type: application/json; charset=utf-8";
pub const CONTENT_TYPE_TEXT: &str = "Content-Type: text/plain; charset=utf-8";
pub const CONTENT_TYPE_HTML: &str = "Content-Type: text/html; charset=utf-8";
pub const CONTENT_TYPE_SCRIPT: &str = "Content-Type: text/javascript; charset=utf-8";

/// JSON envelope for every API answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok",
            data: None,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            data: None,
            message: message.into(),
        }
    }
}

fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

pub fn write_json<T: Serialize>(res: &mut Response, status: u16, body: &T) {
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            res.status_code(status as usize, status_reason(status));
            res.header(CONTENT_TYPE_JSON);
            res.body_vec(bytes);
        }
        Err(e) => {
            error!(error = %e, "response serialization failed");
            write_text(res, 500, "internal server error");
        }
    }
}

pub fn write_text(res: &mut Response, status: u16, body: impl Into<String>) {
    res.status_code(status as usize, status_reason(status));
    res.header(CONTENT_TYPE_TEXT);
    res.body_vec(body.into().into_bytes());
}

pub fn write_bytes(res: &mut Response, status: u16, content_type: &'static str, body: Vec<u8>) {
    res.status_code(status as usize, status_reason(status));
    res.header(content_type);
    res.body_vec(body);
}
