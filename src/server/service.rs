use super::multipart;
use super::request::{parse_request, ParsedRequest};
use super::response::{
    write_bytes, write_json, write_text, ApiResponse, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT,
};
use crate::ids::SecretKey;
use crate::runtime_config::RuntimeConfig;
use crate::static_files::{Assets, StaticFiles};
use crate::store::{Intake, Secret, SecretStore, StoredFile};
use base64::Engine;
use may_minihttp::{HttpService, Request, Response};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Size limits enforced by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Secret text limit in bytes
    pub max_text_bytes: usize,
    /// Request body read limit in bytes
    pub max_form_bytes: usize,
}

impl From<&RuntimeConfig> for Limits {
    fn from(config: &RuntimeConfig) -> Self {
        Self {
            max_text_bytes: config.max_text_bytes,
            max_form_bytes: config.max_form_bytes,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits::from(&RuntimeConfig::default())
    }
}

/// Read-back body for secrets submitted through `/api/content`.
#[derive(Debug, Serialize)]
struct ContentResponse {
    status: &'static str,
    key: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    /// base64
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
}

#[derive(Debug, Serialize)]
struct InfoResponse {
    name: &'static str,
    app_version: &'static str,
}

/// The burnit HTTP service.
#[derive(Clone)]
pub struct BurnService {
    store: Arc<dyn SecretStore>,
    assets: Assets,
    limits: Limits,
}

impl BurnService {
    pub fn new(store: Arc<dyn SecretStore>, limits: Limits, static_dir: Option<PathBuf>) -> Self {
        Self {
            store,
            assets: Assets::new(static_dir.map(StaticFiles::new), limits.max_text_bytes),
            limits,
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    fn too_large(&self) -> ApiResponse {
        ApiResponse::error(format!("Max size: {} bytes", self.limits.max_text_bytes))
    }

    fn route(&self, req: &ParsedRequest, res: &mut Response) -> u16 {
        let method = req.method.as_str();
        let path = req.path.as_str();
        match (method, path) {
            ("GET", "/") if req.query_params.get("key").is_some_and(|k| !k.is_empty()) => {
                self.read_secret(req, res)
            }
            ("GET", "/") => self.serve_asset(res, self.assets.index()),
            ("GET", "/script.js") => self.serve_asset(res, self.assets.script()),
            ("POST", "/") => self.create_plain(req, res),
            ("POST", "/api/content") => self.create_content(req, res),
            ("GET", "/api/info") => {
                write_json(
                    res,
                    200,
                    &InfoResponse {
                        name: env!("CARGO_PKG_NAME"),
                        app_version: env!("CARGO_PKG_VERSION"),
                    },
                );
                200
            }
            ("GET", "/api/healthcheck" | "/api/healthcheck/live" | "/api/healthcheck/ready") => {
                write_text(res, 200, "OK");
                200
            }
            ("GET", _) => match self.assets.load(path) {
                Some((bytes, ct)) => {
                    write_bytes(res, 200, ct, bytes);
                    200
                }
                None => not_found(res, method, path),
            },
            _ => not_found(res, method, path),
        }
    }

    fn serve_asset(&self, res: &mut Response, asset: io::Result<(Vec<u8>, &'static str)>) -> u16 {
        match asset {
            Ok((bytes, ct)) => {
                write_bytes(res, 200, ct, bytes);
                200
            }
            Err(e) => {
                error!(error = %e, "asset rendering failed");
                write_text(res, 500, "internal server error");
                500
            }
        }
    }

    fn read_secret(&self, req: &ParsedRequest, res: &mut Response) -> u16 {
        let Some(key) = SecretKey::from_query(req.query_params.get("key").map(String::as_str))
        else {
            write_text(res, 404, "not found");
            return 404;
        };
        let Some(secret) = self.store.take(&key) else {
            info!(key = %key, "secret not found");
            write_text(res, 404, "not found");
            return 404;
        };
        info!(key = %key, bytes = secret.size(), "secret burned");

        match secret.intake {
            Intake::Plain => {
                write_bytes(res, 200, CONTENT_TYPE_TEXT, secret.text);
            }
            Intake::Content => {
                let (file_name, file) = match secret.file {
                    Some(f) => (
                        Some(f.name),
                        Some(base64::engine::general_purpose::STANDARD.encode(f.bytes)),
                    ),
                    None => (None, None),
                };
                write_json(
                    res,
                    200,
                    &ContentResponse {
                        status: "ok",
                        key: key.to_string(),
                        text: String::from_utf8_lossy(&secret.text).into_owned(),
                        file_name,
                        file,
                    },
                );
            }
        }
        200
    }

    fn create_plain(&self, req: &ParsedRequest, res: &mut Response) -> u16 {
        let size = req.body.len();
        if req.body_exceeded || size > self.limits.max_text_bytes {
            warn!(size, limit = self.limits.max_text_bytes, "plain secret too large");
            write_json(res, 400, &self.too_large());
            return 400;
        }
        let key = self.store.put(Secret::plain(req.body.clone()));
        info!(key = %key, size, "plain secret created");
        write_json(res, 200, &ApiResponse::ok(key.to_string()));
        200
    }

    fn create_content(&self, req: &ParsedRequest, res: &mut Response) -> u16 {
        if req.body_exceeded {
            warn!(limit = self.limits.max_form_bytes, "form body over limit");
            write_text(res, 400, "Unable to parse form");
            return 400;
        }
        let form = match multipart::parse(req.content_type(), &req.body) {
            Ok(form) => form,
            Err(e) => {
                warn!(error = %e, "form rejected");
                write_text(res, 400, "Unable to parse form");
                return 400;
            }
        };
        let text = form.value("text").unwrap_or_default();
        if text.len() > self.limits.max_text_bytes {
            warn!(size = text.len(), limit = self.limits.max_text_bytes, "content text too large");
            write_json(res, 400, &self.too_large());
            return 400;
        }

        // An empty file input arrives as a part with `filename=""`; that is text-only
        let stored = form.file("file").map(|file| StoredFile {
            name: file.file_name.clone().unwrap_or_default(),
            bytes: file.data.clone(),
        });
        let has_file = stored.is_some();
        let key = self.store.put(Secret::content(text.into_bytes(), stored));
        info!(key = %key, has_file, "content secret created");
        write_json(res, 200, &ApiResponse::ok(key.to_string()));
        200
    }
}

fn not_found(res: &mut Response, method: &str, path: &str) -> u16 {
    res.status_code(404, "Not Found");
    res.header(CONTENT_TYPE_JSON);
    res.body_vec(
        serde_json::json!({"error": "Not Found", "method": method, "path": path})
            .to_string()
            .into_bytes(),
    );
    404
}

impl HttpService for BurnService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let started = Instant::now();
        let parsed = parse_request(req, self.limits.max_form_bytes);
        info!(
            method = %parsed.method,
            path = %parsed.path,
            body_bytes_received = parsed.body.len(),
            "request received"
        );

        let status = self.route(&parsed, res);

        info!(
            method = %parsed.method,
            path = %parsed.path,
            status,
            content_type = %parsed.content_type(),
            request_duration_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        Ok(())
    }
}
