use crate::runtime_config::RuntimeConfig;
use crate::server::{BurnService, HttpServer, Limits, ServerHandle};
use crate::store::{MemoryStore, SecretStore};
use crate::submit::{
    Attachment, Attempt, FormFields, HttpTransport, Notifier, PayloadMode, ResultArea,
    SubmissionHandler, SubmitLatch,
};
use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Command-line interface for burnit
#[derive(Parser)]
#[command(name = "burnit", version)]
#[command(about = "Share secrets through links that work once", long_about = None)]
pub struct Cli {
    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "BURNIT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the secret service until SIGINT or SIGTERM
    Serve {
        /// Address to listen on
        #[arg(long, env = "BURNIT_ADDR", default_value = "0.0.0.0:8080")]
        addr: String,

        /// Directory whose files override the built-in page and script
        #[arg(long, env = "BURNIT_STATIC_DIR")]
        static_dir: Option<PathBuf>,

        /// Secret text limit in bytes (default: BURNIT_MAX_TEXT_BYTES or 1000)
        #[arg(long)]
        max_text_bytes: Option<usize>,
    },
    /// Submit one secret and print the resulting link
    Send {
        /// Origin of the burnit service
        #[arg(short, long, env = "BURNIT_SERVER", default_value = "http://127.0.0.1:8080")]
        server: Url,

        /// Secret text
        #[arg(short, long, conflicts_with = "stdin")]
        text: Option<String>,

        /// Read the secret text from standard input
        #[arg(long, default_value_t = false)]
        stdin: bool,

        /// Attach a file; switches to the multipart form
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Prints alerts to standard error.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("alert: {message}");
    }
}

pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve {
            addr,
            static_dir,
            max_text_bytes,
        } => serve(&addr, static_dir, max_text_bytes),
        Commands::Send {
            server,
            text,
            stdin,
            file,
        } => send(server, text, stdin, file),
    }
}

fn serve(addr: &str, static_dir: Option<PathBuf>, max_text_bytes: Option<usize>) -> anyhow::Result<()> {
    let mut config = RuntimeConfig::from_env();
    if let Some(limit) = max_text_bytes {
        config.max_text_bytes = limit;
    }
    config.apply();

    let store: Arc<dyn SecretStore> = Arc::new(MemoryStore::new());
    let service = BurnService::new(store, Limits::from(&config), static_dir);
    let handle = HttpServer(service)
        .start(addr)
        .with_context(|| format!("failed to start HTTP server on {addr}"))?;
    info!(addr = %handle.addr(), max_text_bytes = config.max_text_bytes, "burnit serving");
    wait_for_shutdown(handle)
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> anyhow::Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM]).context("failed to install signal handlers")?;
    if let Some(signal) = signals.forever().next() {
        info!(signal, "shutdown signal received");
    }
    handle.stop();
    info!("HTTP server closed");
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> anyhow::Result<()> {
    handle
        .join()
        .map_err(|e| anyhow!("HTTP server coroutine panicked: {e:?}"))
}

/// Gather the form fields and pick the payload mode from the flags.
pub(crate) fn form_fields(
    text: Option<String>,
    stdin: bool,
    file: Option<PathBuf>,
) -> anyhow::Result<(FormFields, PayloadMode)> {
    let text = match (text, stdin) {
        (Some(text), _) => text,
        (None, true) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read secret from stdin")?;
            buf
        }
        (None, false) => bail!("provide the secret with --text or --stdin"),
    };

    let Some(path) = file else {
        return Ok((FormFields::text(text), PayloadMode::Plain));
    };
    let bytes = std::fs::read(&path)
        .with_context(|| format!("failed to read attachment {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((
        FormFields::text(text).with_file(Attachment::new(name, bytes)),
        PayloadMode::Multipart,
    ))
}

fn send(server: Url, text: Option<String>, stdin: bool, file: Option<PathBuf>) -> anyhow::Result<()> {
    let (fields, mode) = form_fields(text, stdin, file)?;
    let config = RuntimeConfig::from_env();
    let transport = HttpTransport::new().context("failed to build HTTP client")?;
    let handler =
        SubmissionHandler::new(server, mode, transport).with_text_limit(config.max_text_bytes);

    let mut area = ResultArea::default();
    let latch = SubmitLatch::new();
    let attempt = handler.submit(fields, &mut area, &latch, &mut StderrNotifier);

    for paragraph in area.paragraphs() {
        println!("{paragraph}");
    }

    match attempt {
        Attempt::Succeeded { .. } => Ok(()),
        Attempt::Rejected(err) => Err(anyhow::Error::new(err).context("submission rejected")),
        Attempt::Failed(err) => Err(anyhow::Error::new(err).context("submission failed")),
        Attempt::Blocked => Err(anyhow!("submission blocked")),
    }
}
