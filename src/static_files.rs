use crate::server::response::{CONTENT_TYPE_HTML, CONTENT_TYPE_SCRIPT};
use askama::Template;
use minijinja::Environment;
use serde_json::Value as JsonValue;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Files served from a directory on disk. HTML files are rendered with minijinja when a
/// context is given.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self {
            base_dir: base.into(),
        }
    }

    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut pb = self.base_dir.clone();
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    fn content_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase()
            .as_str()
        {
            "html" => CONTENT_TYPE_HTML,
            "css" => "Content-Type: text/css",
            "js" => CONTENT_TYPE_SCRIPT,
            "json" => "Content-Type: application/json",
            "txt" => "Content-Type: text/plain; charset=utf-8",
            "png" => "Content-Type: image/png",
            "svg" => "Content-Type: image/svg+xml",
            "ico" => "Content-Type: image/x-icon",
            _ => "Content-Type: application/octet-stream",
        }
    }

    /// Load `url_path`, returning the bytes and a full `Content-Type:` header line.
    pub fn load(
        &self,
        url_path: &str,
        ctx: Option<&JsonValue>,
    ) -> io::Result<(Vec<u8>, &'static str)> {
        let path = self
            .map_path(url_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid path"))?;
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        }
        if path.extension().and_then(|s| s.to_str()) == Some("html") {
            if let Some(ctx_val) = ctx {
                let source = fs::read_to_string(&path)?;
                let mut env = Environment::new();
                env.add_template("tpl", &source).map_err(io::Error::other)?;
                let tmpl = env.get_template("tpl").map_err(io::Error::other)?;
                let rendered = tmpl.render(ctx_val).map_err(io::Error::other)?;
                return Ok((rendered.into_bytes(), Self::content_type(&path)));
            }
        }
        let bytes = fs::read(&path)?;
        Ok((bytes, Self::content_type(&path)))
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage<'a> {
    endpoint: &'a str,
    max_text_bytes: usize,
}

#[derive(Template)]
#[template(path = "script.js", escape = "none")]
struct ClientScript<'a> {
    endpoint: &'a str,
    max_text_bytes: usize,
}

/// The form page and its script, with optional on-disk overrides.
///
/// A file in the override directory wins over the built-in asset of the same path.
#[derive(Debug, Clone)]
pub struct Assets {
    overrides: Option<StaticFiles>,
    max_text_bytes: usize,
}

pub const CONTENT_ENDPOINT: &str = "/api/content";

impl Assets {
    pub fn new(overrides: Option<StaticFiles>, max_text_bytes: usize) -> Self {
        Self {
            overrides,
            max_text_bytes,
        }
    }

    fn context(&self) -> JsonValue {
        serde_json::json!({
            "endpoint": CONTENT_ENDPOINT,
            "max_text_bytes": self.max_text_bytes,
        })
    }

    fn from_overrides(&self, url_path: &str) -> Option<(Vec<u8>, &'static str)> {
        let ctx = self.context();
        self.overrides
            .as_ref()
            .and_then(|sf| sf.load(url_path, Some(&ctx)).ok())
    }

    pub fn index(&self) -> io::Result<(Vec<u8>, &'static str)> {
        if let Some(found) = self.from_overrides("index.html") {
            return Ok(found);
        }
        let page = IndexPage {
            endpoint: CONTENT_ENDPOINT,
            max_text_bytes: self.max_text_bytes,
        }
        .render()
        .map_err(io::Error::other)?;
        Ok((page.into_bytes(), CONTENT_TYPE_HTML))
    }

    pub fn script(&self) -> io::Result<(Vec<u8>, &'static str)> {
        if let Some(found) = self.from_overrides("script.js") {
            return Ok(found);
        }
        let script = ClientScript {
            endpoint: CONTENT_ENDPOINT,
            max_text_bytes: self.max_text_bytes,
        }
        .render()
        .map_err(io::Error::other)?;
        Ok((script.into_bytes(), CONTENT_TYPE_SCRIPT))
    }

    /// Any other path, from the override directory only.
    pub fn load(&self, url_path: &str) -> Option<(Vec<u8>, &'static str)> {
        self.from_overrides(url_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), "Hello\n").unwrap();
        fs::write(dir.path().join("hello.html"), "<h1>Hello {{ name }}!</h1>").unwrap();
        dir
    }

    #[test]
    fn test_map_path_prevents_traversal() {
        let sf = StaticFiles::new("static");
        assert!(sf.map_path("../Cargo.toml").is_none());
        assert!(sf.map_path("/a/../../Cargo.toml").is_none());
        assert!(sf.map_path("/a/./b.txt").is_some());
    }

    #[test]
    fn test_load_plain_file() {
        let dir = fixture();
        let sf = StaticFiles::new(dir.path());
        let (bytes, ct) = sf.load("hello.txt", None).unwrap();
        assert_eq!(ct, "Content-Type: text/plain; charset=utf-8");
        assert_eq!(String::from_utf8(bytes).unwrap(), "Hello\n");
    }

    #[test]
    fn test_render_html() {
        let dir = fixture();
        let sf = StaticFiles::new(dir.path());
        let (bytes, _) = sf.load("hello.html", Some(&json!({ "name": "World" }))).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "<h1>Hello World!</h1>");
    }

    #[test]
    fn test_builtin_assets() {
        let assets = Assets::new(None, 1000);
        let (page, ct) = assets.index().unwrap();
        let page = String::from_utf8(page).unwrap();
        assert!(ct.contains("text/html"));
        assert!(page.contains("id=\"form\""));
        assert!(page.contains("id=\"message\""));
        assert!(page.contains("id=\"submit\""));
        assert!(page.contains("/script.js"));

        let (script, ct) = assets.script().unwrap();
        let script = String::from_utf8(script).unwrap();
        assert!(ct.contains("text/javascript"));
        assert!(script.contains("/api/content"));
        assert!(script.contains("1000"));
        assert!(assets.load("nothing.txt").is_none());
    }

    #[test]
    fn test_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("index.html"),
            "<p>limit {{ max_text_bytes }}</p>",
        )
        .unwrap();
        let assets = Assets::new(Some(StaticFiles::new(dir.path())), 42);
        let (page, _) = assets.index().unwrap();
        assert_eq!(String::from_utf8(page).unwrap(), "<p>limit 42</p>");
    }
}
