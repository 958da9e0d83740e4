//! # burnit
//!
//! **burnit** shares a secret through a link that works exactly once. A client submits
//! a secret (plain text, or text plus an attachment), the service stores it under an
//! opaque key and answers with that key, and the client turns the key into a shareable
//! link. The first `GET /?key=<key>` returns the content and deletes it.
//!
//! ## Architecture
//!
//! - **[`submit`]** - The submission client: payload building, the client-side size
//!   guard, one POST through a [`submit::Transport`], status classification and result
//!   rendering into an injected [`submit::ResultView`]
//! - **[`store`]** - Take-on-read secret storage
//! - **[`server`]** - Coroutine HTTP service built on `may_minihttp`
//! - **[`static_files`]** - Page and script assets, optionally overridden from disk
//! - **[`cli`]** - The `burnit` binary (`serve` and `send`)
//! - **[`logging`]** - Structured logging setup
//! - **[`runtime_config`]** - Environment-driven limits and coroutine tuning
//!
//! ### Submission Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant Handler as SubmissionHandler
//!     participant Transport
//!     participant Server as BurnService
//!     participant View as ResultView
//!
//!     User->>Handler: submit(fields)
//!     Handler->>Handler: latch closed? payload within limit?
//!     Handler->>Transport: POST /api/content (multipart)
//!     Transport->>Server: HTTP request
//!     Server-->>Transport: 200 {"status":"ok","message":"<key>"}
//!     Transport-->>Handler: RawResponse
//!     Handler->>Handler: StatusClass::from_status
//!     Handler->>View: replace_message("<origin>/?key=<key>")
//!     Handler->>Handler: latch.disable()
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use burnit::submit::{
//!     FormFields, HttpTransport, PayloadMode, ResultArea, SilentNotifier, SubmissionHandler,
//!     SubmitLatch,
//! };
//!
//! let origin = url::Url::parse("http://127.0.0.1:8080").unwrap();
//! let handler = SubmissionHandler::new(origin, PayloadMode::Plain, HttpTransport::new().unwrap());
//! let mut area = ResultArea::default();
//! let latch = SubmitLatch::new();
//! handler.submit(FormFields::text("hunter2"), &mut area, &latch, &mut SilentNotifier);
//! println!("{}", area.paragraphs().join("\n"));
//! ```

pub mod cli;
pub mod ids;
pub mod logging;
pub mod runtime_config;
pub mod server;
pub mod static_files;
pub mod store;
pub mod submit;

pub use ids::SecretKey;
pub use store::{MemoryStore, Secret, SecretStore};
pub use submit::{Attempt, FormFields, PayloadMode, SubmissionHandler, SubmitError};
