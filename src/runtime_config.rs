//! # Runtime Configuration Module
//!
//! Environment-driven settings for the burnit service.
//!
//! ## Environment Variables
//!
//! ### `BURNIT_STACK_SIZE`
//!
//! Stack size for request coroutines. Accepts decimal (`32768`) or hexadecimal
//! (`0x8000`). Default: `0x8000` (32 KB).
//!
//! ### `BURNIT_MAX_TEXT_BYTES`
//!
//! Largest secret text accepted by `POST /` and the `text` field of
//! `POST /api/content`. Default: `1000`.
//!
//! ### `BURNIT_MAX_FORM_BYTES`
//!
//! Largest request body read for any request. Multipart bodies over this are rejected
//! as unparseable. Default: `1048576` (1 MiB).
//!
//! ## Usage
//!
//! ```rust
//! use burnit::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("text limit: {} bytes", config.max_text_bytes);
//! ```

use std::env;

const DEFAULT_STACK_SIZE: usize = 0x8000;
const DEFAULT_MAX_TEXT_BYTES: usize = 1000;
const DEFAULT_MAX_FORM_BYTES: usize = 1 << 20;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
    /// Secret text limit in bytes
    pub max_text_bytes: usize,
    /// Request body read limit in bytes
    pub max_form_bytes: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            max_form_bytes: DEFAULT_MAX_FORM_BYTES,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let size = |name: &str, default: usize| {
            lookup(name)
                .and_then(|v| parse_size(&v))
                .unwrap_or(default)
        };
        RuntimeConfig {
            stack_size: size("BURNIT_STACK_SIZE", DEFAULT_STACK_SIZE),
            max_text_bytes: size("BURNIT_MAX_TEXT_BYTES", DEFAULT_MAX_TEXT_BYTES),
            max_form_bytes: size("BURNIT_MAX_FORM_BYTES", DEFAULT_MAX_FORM_BYTES),
        }
    }

    /// Apply coroutine settings to the `may` runtime. Call once before starting the server.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    match val.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}
