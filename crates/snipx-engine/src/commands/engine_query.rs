//! Engine-level read-only query surface.
//!
//! `apply_engine_query` is the single entry point for reads. It never
//! writes, and it applies the same access rules as the mutations: a
//! snippet the viewer may not see is reported exactly like a missing one
//! would be to the caller (both are silent-deny kinds).

use rusqlite::Connection;
use snipx_core::errors::{ExError, ExErrorKind, SnipError};
use snipx_core::model::{Language, Snippet, User, Viewer};
use snipx_core::rules::access::{authorize, Action};
use snipx_core::{log_op_end, log_op_error, log_op_start};
use snipx_store::errors::Result;
use snipx_store::repo::{AccountsRepo, SnippetFilter, SqliteRepo};

use super::elapsed_ms;

/// Read-only queries supported by the engine.
#[derive(Debug, Clone)]
pub enum EngineQuery {
    /// Public snippets, newest first
    SnippetListPublic,
    /// Public snippets in one language; the slug must exist
    SnippetListByLanguage { slug: String },
    /// A user's snippets: all of them for the user themself, public ones for anyone else
    SnippetListByUser { username: String },
    /// One snippet for display
    SnippetGet { snippet_id: i64 },
    /// One snippet for its edit form (owner only)
    SnippetGetForEdit { snippet_id: i64 },
    /// One snippet for its delete confirmation (owner only)
    SnippetGetForDelete { snippet_id: i64 },
    /// The language catalog
    LanguageList,
}

impl EngineQuery {
    fn op(&self) -> &'static str {
        match self {
            EngineQuery::SnippetListPublic => "snippet_list_public",
            EngineQuery::SnippetListByLanguage { .. } => "snippet_list_by_language",
            EngineQuery::SnippetListByUser { .. } => "snippet_list_by_user",
            EngineQuery::SnippetGet { .. } => "snippet_get",
            EngineQuery::SnippetGetForEdit { .. } => "snippet_get_for_edit",
            EngineQuery::SnippetGetForDelete { .. } => "snippet_get_for_delete",
            EngineQuery::LanguageList => "language_list",
        }
    }
}

#[derive(Debug, Clone)]
pub enum EngineQueryResult {
    Snippets(Vec<Snippet>),
    LanguageSnippets {
        language: Language,
        snippets: Vec<Snippet>,
    },
    UserSnippets {
        owner: User,
        snippets: Vec<Snippet>,
        /// True when private snippets were included
        complete: bool,
    },
    Snippet(Box<Snippet>),
    Languages(Vec<Language>),
}

impl EngineQueryResult {
    fn len(&self) -> usize {
        match self {
            EngineQueryResult::Snippets(snippets)
            | EngineQueryResult::LanguageSnippets { snippets, .. }
            | EngineQueryResult::UserSnippets { snippets, .. } => snippets.len(),
            EngineQueryResult::Snippet(_) => 1,
            EngineQueryResult::Languages(languages) => languages.len(),
        }
    }

    /// Unwrap a single-snippet result
    pub fn into_snippet(self) -> Result<Snippet> {
        match self {
            EngineQueryResult::Snippet(snippet) => Ok(*snippet),
            other => Err(unexpected("snippet", &other)),
        }
    }

    /// Unwrap a language catalog result
    pub fn into_languages(self) -> Result<Vec<Language>> {
        match self {
            EngineQueryResult::Languages(languages) => Ok(languages),
            other => Err(unexpected("languages", &other)),
        }
    }
}

fn unexpected(wanted: &str, got: &EngineQueryResult) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("engine_query")
        .with_message(format!("expected {} result, got {:?}", wanted, got))
}

/// Run a read on behalf of `viewer`
pub fn apply_engine_query(
    query: EngineQuery,
    conn: &Connection,
    viewer: &Viewer,
) -> Result<EngineQueryResult> {
    let op = query.op();
    log_op_start!(op);
    let start = std::time::Instant::now();

    let result = run_query(query, conn, viewer);

    match &result {
        Ok(found) => {
            log_op_end!(op, duration_ms = elapsed_ms(start), result_len = found.len());
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = elapsed_ms(start));
        }
    }
    result
}

fn run_query(query: EngineQuery, conn: &Connection, viewer: &Viewer) -> Result<EngineQueryResult> {
    match query {
        EngineQuery::SnippetListPublic => {
            let snippets = SqliteRepo::list_snippets(conn, &SnippetFilter::public())?;
            Ok(EngineQueryResult::Snippets(snippets))
        }

        EngineQuery::SnippetListByLanguage { slug } => {
            let language = SqliteRepo::get_language_by_slug(conn, &slug)?
                .ok_or(SnipError::LanguageNotFound { slug: slug.clone() })?;
            let snippets =
                SqliteRepo::list_snippets(conn, &SnippetFilter::public().with_language(slug))?;
            Ok(EngineQueryResult::LanguageSnippets { language, snippets })
        }

        EngineQuery::SnippetListByUser { username } => {
            let owner = AccountsRepo::get_user_by_username(conn, &username)?
                .ok_or(SnipError::UserNotFound {
                    username: username.clone(),
                })?;

            let action = Action::ListAllForUser {
                username: &owner.username,
            };
            let complete = authorize(viewer, &action).is_ok();
            let filter = if complete {
                SnippetFilter::all()
            } else {
                SnippetFilter::public()
            };
            let snippets = SqliteRepo::list_snippets(conn, &filter.with_owner(username))?;
            Ok(EngineQueryResult::UserSnippets {
                owner,
                snippets,
                complete,
            })
        }

        EngineQuery::SnippetGet { snippet_id } => {
            let snippet = SqliteRepo::get_snippet(conn, snippet_id)?
                .ok_or(SnipError::SnippetNotFound { snippet_id })?;
            let action = Action::View(&snippet);
            authorize(viewer, &action)
                .map_err(|denied| ExError::from(denied.into_error(&action)))?;
            Ok(EngineQueryResult::Snippet(Box::new(snippet)))
        }

        EngineQuery::SnippetGetForEdit { snippet_id } => {
            let snippet = SqliteRepo::get_snippet(conn, snippet_id)?
                .ok_or(SnipError::SnippetNotFound { snippet_id })?;
            let action = Action::Edit(&snippet);
            authorize(viewer, &action)
                .map_err(|denied| ExError::from(denied.into_error(&action)))?;
            Ok(EngineQueryResult::Snippet(Box::new(snippet)))
        }

        EngineQuery::SnippetGetForDelete { snippet_id } => {
            let snippet = SqliteRepo::get_snippet(conn, snippet_id)?
                .ok_or(SnipError::SnippetNotFound { snippet_id })?;
            let action = Action::Delete(&snippet);
            authorize(viewer, &action)
                .map_err(|denied| ExError::from(denied.into_error(&action)))?;
            Ok(EngineQueryResult::Snippet(Box::new(snippet)))
        }

        EngineQuery::LanguageList => Ok(EngineQueryResult::Languages(SqliteRepo::list_languages(
            conn,
        )?)),
    }
}
