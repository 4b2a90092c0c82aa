//! Snippet-created notifications
//!
//! The engine hands a `SnippetCreatedNotice` to a `NotificationDispatcher`
//! after the snippet is committed. Dispatch cannot fail the create; an
//! implementation that cannot deliver drops the notice.

use std::sync::Mutex;

/// What the engine knows about a freshly created snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetCreatedNotice {
    pub snippet_name: String,
    pub snippet_description: String,
    pub recipient: Option<String>,
}

/// A rendered notification message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl SnippetCreatedNotice {
    pub fn new(
        snippet_name: impl Into<String>,
        snippet_description: impl Into<String>,
        recipient: Option<String>,
    ) -> Self {
        Self {
            snippet_name: snippet_name.into(),
            snippet_description: snippet_description.into(),
            recipient,
        }
    }

    /// Render the message, or `None` when there is nobody to send it to
    pub fn compose(&self) -> Option<ComposedMessage> {
        let to = self.recipient.as_deref().map(str::trim)?;
        if to.is_empty() {
            return None;
        }
        Some(ComposedMessage {
            to: to.to_string(),
            subject: format!("Snippet \"{}\" created successfully", self.snippet_name),
            body: format!(
                "The snippet \"{}\" was created successfully with the following description:\n{}",
                self.snippet_name, self.snippet_description
            ),
        })
    }
}

/// Best-effort hand-off for creation notices
pub trait NotificationDispatcher: Send + Sync {
    fn dispatch(&self, notice: SnippetCreatedNotice);
}

/// Discards every notice
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDispatcher;

impl NotificationDispatcher for NoopDispatcher {
    fn dispatch(&self, _notice: SnippetCreatedNotice) {}
}

/// Keeps every dispatched notice in memory
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    notices: Mutex<Vec<SnippetCreatedNotice>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<SnippetCreatedNotice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, notice: SnippetCreatedNotice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
