//! Engine-level mutation commands.

use rusqlite::Connection;
use snipx_core::model::{SnippetDraft, Viewer};
use snipx_core::notify::NotificationDispatcher;
use snipx_store::errors::Result;

use crate::commands::snippet::{snippet_create, snippet_delete, snippet_update};

/// Mutations a viewer can request
#[derive(Debug, Clone)]
pub enum EngineCommand {
    SnippetCreate { draft: SnippetDraft },
    SnippetUpdate { snippet_id: i64, draft: SnippetDraft },
    SnippetDelete { snippet_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommandResult {
    SnippetCreated { snippet_id: i64 },
    SnippetUpdated { snippet_id: i64 },
    SnippetDeleted { snippet_id: i64 },
}

impl EngineCommandResult {
    pub fn snippet_id(&self) -> i64 {
        match self {
            EngineCommandResult::SnippetCreated { snippet_id }
            | EngineCommandResult::SnippetUpdated { snippet_id }
            | EngineCommandResult::SnippetDeleted { snippet_id } => *snippet_id,
        }
    }
}

/// Apply a mutation on behalf of `viewer`
///
/// `dispatcher` receives the creation notice; other commands ignore it.
pub fn apply_engine_command(
    cmd: EngineCommand,
    conn: &Connection,
    viewer: &Viewer,
    dispatcher: &dyn NotificationDispatcher,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::SnippetCreate { draft } => {
            let snippet_id = snippet_create(&draft, viewer, conn, dispatcher)?;
            Ok(EngineCommandResult::SnippetCreated { snippet_id })
        }
        EngineCommand::SnippetUpdate { snippet_id, draft } => {
            snippet_update(snippet_id, &draft, viewer, conn)?;
            Ok(EngineCommandResult::SnippetUpdated { snippet_id })
        }
        EngineCommand::SnippetDelete { snippet_id } => {
            snippet_delete(snippet_id, viewer, conn)?;
            Ok(EngineCommandResult::SnippetDeleted { snippet_id })
        }
    }
}
