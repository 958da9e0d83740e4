use may_minihttp::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};

/// Parsed HTTP request data used by `BurnService`.
#[derive(Debug, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Parsed query string parameters
    pub query_params: HashMap<String, String>,
    /// Raw body, at most `body_limit` bytes
    pub body: Vec<u8>,
    /// The client sent more than `body_limit` bytes; `body` is truncated
    pub body_exceeded: bool,
}

impl ParsedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or("")
    }
}

/// Parse query string parameters from a URL path
///
/// Extracts everything after the `?` character and URL-decodes parameter names and values.
pub fn parse_query_params(path: &str) -> HashMap<String, String> {
    match path.split_once('?') {
        Some((_, query)) => url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        None => HashMap::new(),
    }
}

/// Read at most `limit` bytes, reporting whether more was available.
pub fn read_limited<R: Read>(reader: R, limit: usize) -> (Vec<u8>, bool) {
    let mut buf = Vec::new();
    let mut limited = reader.take((limit as u64).saturating_add(1));
    if let Err(e) = limited.read_to_end(&mut buf) {
        warn!(error = %e, read = buf.len(), "request body read failed");
    }
    let exceeded = buf.len() > limit;
    buf.truncate(limit);
    (buf, exceeded)
}

/// Extract method, path, headers, query and body from a `may_minihttp::Request`.
pub fn parse_request(req: Request, body_limit: usize) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let query_params = parse_query_params(&raw_path);
    // Keys only: values may carry secret keys
    debug!(
        header_count = headers.len(),
        query_names = ?query_params.keys().collect::<Vec<_>>(),
        "request head parsed"
    );

    let (body, body_exceeded) = read_limited(req.body(), body_limit);

    ParsedRequest {
        method,
        path,
        headers,
        query_params,
        body,
        body_exceeded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_params() {
        let q = parse_query_params("/?key=01ARZ3NDEKTSV4RRFFQ69G5FAV&x=a%20b");
        assert_eq!(q.get("key").map(String::as_str), Some("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
        assert_eq!(q.get("x").map(String::as_str), Some("a b"));
        assert!(parse_query_params("/").is_empty());
    }

    #[test]
    fn test_read_limited_within() {
        let (body, exceeded) = read_limited(&b"hello"[..], 5);
        assert_eq!(body, b"hello");
        assert!(!exceeded);
    }

    #[test]
    fn test_read_limited_over() {
        let (body, exceeded) = read_limited(&b"hello!"[..], 5);
        assert_eq!(body, b"hello");
        assert!(exceeded);
    }

    #[test]
    fn test_read_limited_unbounded() {
        let (body, exceeded) = read_limited(&b"hello"[..], usize::MAX);
        assert_eq!(body, b"hello");
        assert!(!exceeded);
    }
}
