use super::payload::{FormFields, PayloadMode, ValidationError, TEXT_LIMIT_BYTES};
use super::status::StatusClass;
use super::transport::{RawResponse, Transport, TransportError};
use super::view::{Notifier, ResultView, SubmitLatch};
use serde_json::Value;
use std::fmt;
use tracing::{debug, error, info, warn};
use url::Url;

/// Why a sent submission ended without a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The request failed, or the body was not the expected JSON
    Transport(String),
    /// `400`, carrying `body.message`
    Client(String),
    /// `5xx`, carrying the whole body
    Server(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Transport(msg) | SubmitError::Client(msg) | SubmitError::Server(msg) => {
                f.write_str(msg)
            }
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<TransportError> for SubmitError {
    fn from(err: TransportError) -> Self {
        SubmitError::Transport(err.to_string())
    }
}

/// Result of one call to [`SubmissionHandler::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// The latch was already closed; nothing happened
    Blocked,
    /// Refused before sending; surfaced as an alert, not in the result area
    Rejected(ValidationError),
    Failed(SubmitError),
    Succeeded { link: String, class: StatusClass },
}

impl Attempt {
    pub fn is_success(&self) -> bool {
        matches!(self, Attempt::Succeeded { .. })
    }
}

/// Drives one form submission: build, guard, POST, classify, render.
///
/// The same routine handles both form flavours; [`PayloadMode`] picks the payload
/// builder and endpoint.
pub struct SubmissionHandler<T> {
    origin: Url,
    mode: PayloadMode,
    transport: T,
    text_limit: usize,
}

impl<T: Transport> SubmissionHandler<T> {
    /// `origin` is the scheme, host and port the page was served from. Any path on it is
    /// ignored.
    pub fn new(origin: Url, mode: PayloadMode, transport: T) -> Self {
        Self {
            origin,
            mode,
            transport,
            text_limit: TEXT_LIMIT_BYTES,
        }
    }

    pub fn with_text_limit(mut self, limit: usize) -> Self {
        self.text_limit = limit;
        self
    }

    pub fn mode(&self) -> PayloadMode {
        self.mode
    }

    /// `<origin>/?key=<key>`
    pub fn share_link(&self, key: &str) -> String {
        format!("{}/?key={}", self.origin.origin().ascii_serialization(), key)
    }

    /// Run one submission and update `view`, `latch` and `notifier`.
    ///
    /// Never fails outward; every error ends this attempt and is shown to the user.
    /// Validation errors raise an alert and leave `view` untouched. Other errors append
    /// one paragraph. Success replaces the view content with the link and closes
    /// `latch`.
    pub fn submit<V, N>(
        &self,
        fields: FormFields,
        view: &mut V,
        latch: &SubmitLatch,
        notifier: &mut N,
    ) -> Attempt
    where
        V: ResultView + ?Sized,
        N: Notifier + ?Sized,
    {
        if latch.is_disabled() {
            debug!("submit control disabled, ignoring submission");
            return Attempt::Blocked;
        }

        let payload = match self.mode.build(fields, self.text_limit) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "submission rejected before sending");
                notifier.alert(&err.to_string());
                return Attempt::Rejected(err);
            }
        };

        let url = match self.origin.join(self.mode.endpoint()) {
            Ok(url) => url,
            Err(err) => {
                let err = SubmitError::Transport(err.to_string());
                view.append_error(&err.to_string());
                return Attempt::Failed(err);
            }
        };

        info!(
            url = %url,
            mode = ?self.mode,
            text_bytes = payload.text_len(),
            "submitting"
        );

        let outcome = self
            .transport
            .post(&url, payload)
            .map_err(SubmitError::from)
            .and_then(|response| self.interpret(response));

        match outcome {
            Ok((key, class)) => {
                let link = self.share_link(&key);
                view.replace_message(&link);
                latch.disable();
                Attempt::Succeeded { link, class }
            }
            Err(err) => {
                view.append_error(&err.to_string());
                Attempt::Failed(err)
            }
        }
    }

    fn interpret(&self, response: RawResponse) -> Result<(String, StatusClass), SubmitError> {
        debug!(status = response.status, bytes = response.body.len(), "response received");

        let body: Value = serde_json::from_slice(&response.body).map_err(|e| {
            error!(status = response.status, error = %e, "response body is not JSON");
            SubmitError::Transport(e.to_string())
        })?;

        let class = StatusClass::from_status(response.status);
        match class {
            StatusClass::ClientError => Err(SubmitError::Client(client_message(&body))),
            StatusClass::ServerError => Err(SubmitError::Server(value_text(&body))),
            StatusClass::Success | StatusClass::Unclassified => {
                if class == StatusClass::Unclassified {
                    warn!(
                        status = response.status,
                        "status outside the error bands, treating as success"
                    );
                }
                let key = body.get("message").map(value_text).ok_or_else(|| {
                    SubmitError::Transport("response body has no `message` field".to_string())
                })?;
                Ok((key, class))
            }
        }
    }
}

/// `body.message`, falling back to the whole body when the field is absent.
fn client_message(body: &Value) -> String {
    body.get("message")
        .map(value_text)
        .unwrap_or_else(|| value_text(body))
}

/// Strings unquoted, anything else as compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
