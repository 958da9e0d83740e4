//! # Server Module
//!
//! Coroutine HTTP service that stores secrets and burns them on first read.
//!
//! ## Routes
//!
//! | Method | Path | Answer |
//! |--------|------|--------|
//! | GET | `/` | form page |
//! | GET | `/?key=<key>` | the secret, once; `404 not found` afterwards |
//! | GET | `/script.js` | client script |
//! | POST | `/` | raw body secret → `{"status":"ok","message":"<key>"}` |
//! | POST | `/api/content` | multipart `text` + `file` secret → same envelope |
//! | GET | `/api/info` | name and version |
//! | GET | `/api/healthcheck[/live\|/ready]` | `OK` |
//!
//! Oversize text is answered with `400 {"status":"error","message":"Max size: 1000 bytes"}`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use burnit::server::{BurnService, HttpServer, Limits};
//! use burnit::MemoryStore;
//! use std::sync::Arc;
//!
//! let service = BurnService::new(Arc::new(MemoryStore::new()), Limits::default(), None);
//! let handle = HttpServer(service).start("127.0.0.1:8080").unwrap();
//! handle.wait_ready().unwrap();
//! ```

pub mod http_server;
pub mod multipart;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_query_params, parse_request, ParsedRequest};
pub use response::ApiResponse;
pub use service::{BurnService, Limits};
