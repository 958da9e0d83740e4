//! `multipart/form-data` decoding for fully buffered request bodies.
//!
//! The body has already been read (and capped) by the service, so `multer` is driven
//! over a one-chunk stream with `futures::executor::block_on`. Nothing here awaits I/O,
//! which keeps the call safe inside a `may` coroutine.

use futures::executor::block_on;
use futures::stream;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartError {
    NotMultipart,
    MissingBoundary,
    /// The body could not be decoded as a form
    Malformed(String),
}

impl fmt::Display for MultipartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultipartError::NotMultipart => write!(f, "content type is not multipart/form-data"),
            MultipartError::MissingBoundary => write!(f, "multipart boundary missing"),
            MultipartError::Malformed(what) => write!(f, "malformed multipart body: {what}"),
        }
    }
}

impl std::error::Error for MultipartError {}

impl From<multer::Error> for MultipartError {
    fn from(err: multer::Error) -> Self {
        match err {
            multer::Error::NoMultipart => MultipartError::NotMultipart,
            multer::Error::NoBoundary => MultipartError::MissingBoundary,
            other => MultipartError::Malformed(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Text value of the first non-file part named `name`, lossily decoded.
    pub fn value(&self, name: &str) -> Option<String> {
        self.parts
            .iter()
            .find(|p| p.name == name && !is_file(p))
            .map(|p| String::from_utf8_lossy(&p.data).into_owned())
    }

    /// First part named `name` that carries a non-empty filename.
    ///
    /// A file input left empty is sent with `filename=""` and does not count.
    pub fn file(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name == name && is_file(p))
    }
}

fn is_file(part: &FormPart) -> bool {
    part.file_name.as_deref().is_some_and(|f| !f.is_empty())
}

/// Pull `boundary` out of a `multipart/form-data; boundary=...` content type.
pub fn boundary(content_type: &str) -> Result<String, MultipartError> {
    let mime = content_type.split(';').next().unwrap_or("").trim();
    if !mime.eq_ignore_ascii_case("multipart/form-data") {
        return Err(MultipartError::NotMultipart);
    }
    Ok(multer::parse_boundary(content_type)?)
}

/// Decode a buffered body given its `Content-Type` header value.
pub fn parse(content_type: &str, body: &[u8]) -> Result<MultipartForm, MultipartError> {
    let boundary = boundary(content_type)?;
    let chunks = stream::iter([Ok::<Vec<u8>, std::io::Error>(body.to_vec())]);
    let mut multipart = multer::Multipart::new(chunks, boundary);

    block_on(async move {
        let mut form = MultipartForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field
                .name()
                .map(str::to_string)
                .ok_or_else(|| MultipartError::Malformed("part without a name".to_string()))?;
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(|m| m.to_string());
            let data = field.bytes().await?.to_vec();
            form.parts.push(FormPart {
                name,
                file_name,
                content_type,
                data,
            });
        }
        Ok::<_, MultipartError>(form)
    })
}
