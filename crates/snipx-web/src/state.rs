use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use snipx_core::errors::{ExError, ExErrorKind};
use snipx_core::notify::NotificationDispatcher;
use snipx_engine::commands::session::SessionPolicy;

use crate::highlight::Highlighter;

/// Shared handler state
///
/// One connection serves every request. The lock is only taken inside
/// `with_conn`, which is synchronous, so it is never held across an await.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    highlighter: Arc<dyn Highlighter>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    sessions: SessionPolicy,
}

impl AppState {
    pub fn new(
        conn: Connection,
        highlighter: Arc<dyn Highlighter>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            highlighter,
            dispatcher,
            sessions: SessionPolicy::default(),
        }
    }

    pub fn with_session_policy(mut self, sessions: SessionPolicy) -> Self {
        self.sessions = sessions;
        self
    }

    /// Run `f` with exclusive access to the connection
    ///
    /// A poisoned lock is reported as `Internal`.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, ExError>,
    ) -> Result<T, ExError> {
        let guard = self.db.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("db_lock")
                .with_message("database lock poisoned")
        })?;
        f(&guard)
    }

    pub fn highlighter(&self) -> &dyn Highlighter {
        self.highlighter.as_ref()
    }

    pub fn sessions(&self) -> &SessionPolicy {
        &self.sessions
    }

    pub fn dispatcher(&self) -> &dyn NotificationDispatcher {
        self.dispatcher.as_ref()
    }
}
