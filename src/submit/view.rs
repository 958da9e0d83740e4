use askama::Template;
use std::sync::atomic::{AtomicBool, Ordering};

/// The result area a submission writes into.
pub trait ResultView {
    /// Append a paragraph `"Error: <error>"`, keeping whatever is already shown.
    fn append_error(&mut self, error: &str);
    /// Clear the area, then show `message` as its only paragraph.
    fn replace_message(&mut self, message: &str);
}

impl<V: ResultView + ?Sized> ResultView for &mut V {
    fn append_error(&mut self, error: &str) {
        (**self).append_error(error)
    }

    fn replace_message(&mut self, message: &str) {
        (**self).replace_message(message)
    }
}

/// Blocking user notification (the browser's `alert`).
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Drops every alert.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn alert(&mut self, _message: &str) {}
}

/// Keeps alerts for later inspection.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub alerts: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[derive(Template)]
#[template(path = "result.html")]
struct ResultFragment<'a> {
    paragraphs: &'a [String],
}

/// In-memory result area holding rendered paragraphs in display order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultArea {
    paragraphs: Vec<String>,
}

impl ResultArea {
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn last(&self) -> Option<&str> {
        self.paragraphs.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Render as a sequence of escaped `<p>` elements.
    pub fn render_html(&self) -> Result<String, askama::Error> {
        ResultFragment {
            paragraphs: &self.paragraphs,
        }
        .render()
    }
}

impl ResultView for ResultArea {
    fn append_error(&mut self, error: &str) {
        self.paragraphs.push(format!("Error: {error}"));
    }

    fn replace_message(&mut self, message: &str) {
        self.paragraphs.clear();
        self.paragraphs.push(message.to_string());
    }
}

/// One-way disable of the submit control.
///
/// Once [`SubmitLatch::disable`] is called it stays disabled for the latch's lifetime.
#[derive(Debug, Default)]
pub struct SubmitLatch {
    disabled: AtomicBool,
}

impl SubmitLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Release);
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }
}
