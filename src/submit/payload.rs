use std::fmt;

/// Largest `text` (in UTF-8 bytes) the multipart form accepts before sending.
pub const TEXT_LIMIT_BYTES: usize = 1000;

/// A file picked in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// MIME type; `application/octet-stream` when unset
    pub mime: Option<String>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// The part a browser sends for a file input with nothing selected.
    pub fn empty() -> Self {
        Self::new("", Vec::new())
    }
}

/// Raw values read from the form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    /// `secret` in the plain form, `text` in the multipart form
    pub text: String,
    pub file: Option<Attachment>,
}

impl FormFields {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            file: None,
        }
    }

    pub fn with_file(mut self, file: Attachment) -> Self {
        self.file = Some(file);
        self
    }
}

/// The request body for a single submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPayload {
    /// Sent as-is; content type implied as plain text
    Plain(String),
    /// `multipart/form-data` with parts `file` and `text`
    Multipart { text: String, file: Attachment },
}

impl FormPayload {
    /// Byte count of the user-entered text, for logging.
    pub fn text_len(&self) -> usize {
        match self {
            FormPayload::Plain(text) => text.len(),
            FormPayload::Multipart { text, .. } => text.len(),
        }
    }
}

/// Client-side rejection raised before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    TextTooLarge { size: usize, limit: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TextTooLarge { limit, .. } => write!(f, "Max size: {limit} bytes"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Payload builder strategy, selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// Raw body posted to `/`
    Plain,
    /// Multipart body posted to `/api/content`
    Multipart,
}

impl PayloadMode {
    pub fn endpoint(self) -> &'static str {
        match self {
            PayloadMode::Plain => "/",
            PayloadMode::Multipart => "/api/content",
        }
    }

    /// Build the payload, enforcing `limit` on the multipart text.
    ///
    /// Plain payloads are never checked here; the service enforces its own limit
    /// and answers 400.
    pub fn build(self, fields: FormFields, limit: usize) -> Result<FormPayload, ValidationError> {
        match self {
            PayloadMode::Plain => Ok(FormPayload::Plain(fields.text)),
            PayloadMode::Multipart => {
                // String is UTF-8 already, so len() is the encoded size
                let size = fields.text.len();
                if size > limit {
                    return Err(ValidationError::TextTooLarge { size, limit });
                }
                Ok(FormPayload::Multipart {
                    text: fields.text,
                    file: fields.file.unwrap_or_else(Attachment::empty),
                })
            }
        }
    }
}
