//! # Submission Module
//!
//! Client side of burnit: turn form input into one POST and render the outcome.
//!
//! ## Overview
//!
//! One routine, [`SubmissionHandler::submit`], serves both form flavours. The payload
//! builder is picked by [`PayloadMode`]:
//!
//! | Mode | Endpoint | Body | Client-side guard |
//! |------|----------|------|-------------------|
//! | [`PayloadMode::Plain`] | `/` | raw text | none |
//! | [`PayloadMode::Multipart`] | `/api/content` | `multipart/form-data` (`file`, `text`) | text ≤ 1000 UTF-8 bytes |
//!
//! The handler never reaches for globals. The result area ([`ResultView`]), the submit
//! control ([`SubmitLatch`]) and the blocking alert ([`Notifier`]) are passed in.
//!
//! ## Status Handling
//!
//! Responses are classified once into [`StatusClass`]:
//!
//! - transport failure or non-JSON body → error paragraph with the error text
//! - `400` → error paragraph with `body.message`
//! - `500..=599` → error paragraph with the whole body
//! - everything else → shareable link `<origin>/?key=<body.message>`, latch closed
//!
//! Errors append; success replaces. A page that failed twice then succeeded shows one
//! paragraph.

mod handler;
mod payload;
mod status;
mod transport;
mod view;

pub use handler::{Attempt, SubmissionHandler, SubmitError};
pub use payload::{
    Attachment, FormFields, FormPayload, PayloadMode, ValidationError, TEXT_LIMIT_BYTES,
};
pub use status::StatusClass;
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
pub use view::{Notifier, RecordingNotifier, ResultArea, ResultView, SilentNotifier, SubmitLatch};
