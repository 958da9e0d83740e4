//! # CLI Module
//!
//! The `burnit` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Run the secret service:
//!
//! ```bash
//! burnit serve --addr 0.0.0.0:8080
//! ```
//!
//! Options:
//! - `--addr <ADDR>` - Listen address (env `BURNIT_ADDR`, default `0.0.0.0:8080`)
//! - `--static-dir <DIR>` - Override the built-in page and script (env `BURNIT_STATIC_DIR`)
//! - `--max-text-bytes <N>` - Secret text limit
//!
//! ### `send`
//!
//! Submit a secret and print the shareable link:
//!
//! ```bash
//! burnit send --server http://127.0.0.1:8080 --text "hunter2"
//! echo "hunter2" | burnit send --stdin --file notes.pdf
//! ```
//!
//! Without `--file` the secret is posted as a raw body to `/`. With `--file` the
//! multipart form is posted to `/api/content`, and text over the limit is refused
//! locally before anything is sent. The command exits non-zero unless a link was
//! produced.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};
