use super::payload::FormPayload;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::header::CONTENT_TYPE;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Status and body of a completed exchange. The body is not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The request did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection, DNS or TLS failure, or the request could not be built
    Request(String),
    /// Headers arrived but the body could not be read
    Body(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request(msg) => write!(f, "request failed: {msg}"),
            TransportError::Body(msg) => write!(f, "reading response body failed: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Sends one POST and resolves exactly once.
///
/// Implementations must not retry; a failed attempt is reported and left to the user.
pub trait Transport {
    fn post(&self, url: &Url, payload: FormPayload) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, url: &Url, payload: FormPayload) -> Result<RawResponse, TransportError> {
        (**self).post(url, payload)
    }
}

/// [`Transport`] backed by a blocking `reqwest` client with no request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a client without a timeout: a submission either resolves or fails on its own.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &Url, payload: FormPayload) -> Result<RawResponse, TransportError> {
        let request = self.client.post(url.as_str());
        let request = match payload {
            FormPayload::Plain(text) => request
                .header(CONTENT_TYPE, "text/plain;charset=UTF-8")
                .body(text),
            FormPayload::Multipart { text, file } => {
                let mime = file
                    .mime
                    .as_deref()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&mime)
                    .map_err(|e| TransportError::Request(e.to_string()))?;
                request.multipart(Form::new().part("file", part).text("text", text))
            }
        };

        let response = request
            .send()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(RawResponse::new(status, body.to_vec()))
    }
}
