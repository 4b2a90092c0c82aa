//! Background delivery of creation notices
//!
//! `MailQueue` is the web layer's `NotificationDispatcher`. Dispatch is a
//! `try_send` into a bounded channel, so a full or closed queue drops the
//! notice instead of slowing the request. A worker task drains the channel
//! into a `Mailer`.

use std::sync::Arc;

use snipx_core::errors::ExError;
use snipx_core::notify::{ComposedMessage, NotificationDispatcher, SnippetCreatedNotice};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

/// Delivers one composed message
pub trait Mailer: Send + Sync {
    fn send(&self, from: &str, message: &ComposedMessage) -> Result<(), ExError>;
}

/// Writes messages to the log instead of sending them
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, from: &str, message: &ComposedMessage) -> Result<(), ExError> {
        tracing::info!(
            from = from,
            to = %message.to,
            subject = %message.subject,
            body_len = message.body.len(),
            "mail delivered to log"
        );
        Ok(())
    }
}

/// Counters reported by the worker when the queue closes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MailStats {
    pub sent: usize,
    pub failed: usize,
    /// Notices without a usable recipient
    pub skipped: usize,
}

#[derive(Clone)]
pub struct MailQueue {
    sender: mpsc::Sender<SnippetCreatedNotice>,
}

/// Handle on the worker task
pub struct MailWorker {
    handle: JoinHandle<MailStats>,
}

impl MailQueue {
    /// Spawn the worker on the current runtime
    ///
    /// The worker stops once every `MailQueue` clone has been dropped and
    /// the channel is drained. `capacity` must be non-zero.
    pub fn start(capacity: usize, from: String, mailer: Arc<dyn Mailer>) -> (Self, MailWorker) {
        let (sender, receiver) = mpsc::channel(capacity);
        let handle = tokio::spawn(run_worker(receiver, from, mailer));
        (Self { sender }, MailWorker { handle })
    }
}

impl NotificationDispatcher for MailQueue {
    fn dispatch(&self, notice: SnippetCreatedNotice) {
        match self.sender.try_send(notice) {
            Ok(()) => tracing::debug!("notice queued"),
            Err(TrySendError::Full(notice)) => {
                tracing::warn!(snippet_name = %notice.snippet_name, "mail queue full, notice dropped");
            }
            Err(TrySendError::Closed(notice)) => {
                tracing::warn!(snippet_name = %notice.snippet_name, "mail queue closed, notice dropped");
            }
        }
    }
}

impl MailWorker {
    /// Wait for the worker to drain and stop
    pub async fn join(self) -> MailStats {
        match self.handle.await {
            Ok(stats) => stats,
            Err(err) => {
                tracing::error!(error = %err, "mail worker panicked");
                MailStats::default()
            }
        }
    }
}

async fn run_worker(
    mut receiver: mpsc::Receiver<SnippetCreatedNotice>,
    from: String,
    mailer: Arc<dyn Mailer>,
) -> MailStats {
    let mut stats = MailStats::default();
    while let Some(notice) = receiver.recv().await {
        let Some(message) = notice.compose() else {
            stats.skipped += 1;
            continue;
        };
        match mailer.send(&from, &message) {
            Ok(()) => stats.sent += 1,
            Err(err) => {
                stats.failed += 1;
                tracing::warn!(err_code = err.code(), to = %message.to, "mail delivery failed");
            }
        }
    }
    tracing::debug!(?stats, "mail worker stopped");
    stats
}
