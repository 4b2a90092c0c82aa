//! Snippet mutations
//!
//! Every mutation authorizes the viewer before the store is touched.

use rusqlite::Connection;
use snipx_core::errors::{ExError, FieldError, SnipError};
use snipx_core::model::{Language, SnippetDraft, Viewer};
use snipx_core::notify::{NotificationDispatcher, SnippetCreatedNotice};
use snipx_core::rules::access::{authorize, Action};
use snipx_core::rules::validation::draft_field_errors;
use snipx_core::{log_op_end, log_op_error, log_op_start};
use snipx_store::errors::Result;
use snipx_store::repo::SqliteRepo;

use super::elapsed_ms;

const UNKNOWN_LANGUAGE: &str = "Select a valid choice. That choice is not one of the available choices.";

/// Create a snippet owned by the viewer
///
/// A notice goes to `dispatcher` after the insert, and only when the owner
/// has an email address.
///
/// ## Errors
///
/// - `Unauthorised`: anonymous viewer
/// - `InvalidInput`: draft problems, including an unknown language slug
/// - `Persistence`: database error
pub fn snippet_create(
    draft: &SnippetDraft,
    viewer: &Viewer,
    conn: &Connection,
    dispatcher: &dyn NotificationDispatcher,
) -> Result<i64> {
    log_op_start!("snippet_create", language_slug = %draft.language_slug);
    let start = std::time::Instant::now();

    let snippet_id = snippet_create_impl(draft, viewer, conn, dispatcher).map_err(|e| {
        log_op_error!("snippet_create", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "snippet_create",
        duration_ms = elapsed_ms(start),
        snippet_id = snippet_id
    );
    Ok(snippet_id)
}

fn snippet_create_impl(
    draft: &SnippetDraft,
    viewer: &Viewer,
    conn: &Connection,
    dispatcher: &dyn NotificationDispatcher,
) -> Result<i64> {
    let action = Action::Create;
    authorize(viewer, &action).map_err(|denied| ExError::from(denied.into_error(&action)))?;
    let owner = viewer.user().ok_or_else(|| {
        ExError::from(SnipError::AuthenticationRequired {
            action: action.name().to_string(),
        })
    })?;

    let language = checked_language(draft, conn)?;
    let snippet_id =
        SqliteRepo::insert_snippet(conn, owner.id, language.id, draft, chrono::Utc::now())?;

    if let Some(address) = owner.notification_address() {
        dispatcher.dispatch(SnippetCreatedNotice::new(
            draft.name.trim(),
            draft.description.clone(),
            Some(address.to_string()),
        ));
    } else {
        tracing::debug!(snippet_id, "owner has no email, no notice");
    }

    Ok(snippet_id)
}

/// Replace the editable fields of a snippet the viewer owns
///
/// ## Errors
///
/// - `NotFound`: no such snippet
/// - `Forbidden`: viewer is not the owner
/// - `InvalidInput`: draft problems
pub fn snippet_update(
    snippet_id: i64,
    draft: &SnippetDraft,
    viewer: &Viewer,
    conn: &Connection,
) -> Result<()> {
    log_op_start!("snippet_update", snippet_id = snippet_id);
    let start = std::time::Instant::now();

    snippet_update_impl(snippet_id, draft, viewer, conn).map_err(|e| {
        log_op_error!("snippet_update", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "snippet_update",
        duration_ms = elapsed_ms(start),
        snippet_id = snippet_id
    );
    Ok(())
}

fn snippet_update_impl(
    snippet_id: i64,
    draft: &SnippetDraft,
    viewer: &Viewer,
    conn: &Connection,
) -> Result<()> {
    let snippet = SqliteRepo::get_snippet(conn, snippet_id)?
        .ok_or(SnipError::SnippetNotFound { snippet_id })?;

    let action = Action::Edit(&snippet);
    authorize(viewer, &action).map_err(|denied| ExError::from(denied.into_error(&action)))?;

    let language = checked_language(draft, conn)?;
    let updated =
        SqliteRepo::update_snippet(conn, snippet_id, language.id, draft, chrono::Utc::now())?;
    if !updated {
        return Err(SnipError::SnippetNotFound { snippet_id }.into());
    }
    Ok(())
}

/// Hard-delete a snippet the viewer owns
///
/// ## Errors
///
/// - `NotFound`: no such snippet
/// - `Forbidden`: viewer is not the owner
pub fn snippet_delete(snippet_id: i64, viewer: &Viewer, conn: &Connection) -> Result<()> {
    log_op_start!("snippet_delete", snippet_id = snippet_id);
    let start = std::time::Instant::now();

    snippet_delete_impl(snippet_id, viewer, conn).map_err(|e| {
        log_op_error!("snippet_delete", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "snippet_delete",
        duration_ms = elapsed_ms(start),
        snippet_id = snippet_id
    );
    Ok(())
}

fn snippet_delete_impl(snippet_id: i64, viewer: &Viewer, conn: &Connection) -> Result<()> {
    let snippet = SqliteRepo::get_snippet(conn, snippet_id)?
        .ok_or(SnipError::SnippetNotFound { snippet_id })?;

    let action = Action::Delete(&snippet);
    authorize(viewer, &action).map_err(|denied| ExError::from(denied.into_error(&action)))?;

    if !SqliteRepo::delete_snippet(conn, snippet_id)? {
        return Err(SnipError::SnippetNotFound { snippet_id }.into());
    }
    Ok(())
}

/// Validate the draft and resolve its language in one pass
///
/// An unknown slug is reported as a `language` field error next to any
/// other field problems.
fn checked_language(draft: &SnippetDraft, conn: &Connection) -> Result<Language> {
    let mut errors = draft_field_errors(draft);

    let slug = draft.language_slug.trim();
    let language = if slug.is_empty() {
        None
    } else {
        SqliteRepo::get_language_by_slug(conn, slug)?
    };
    if !slug.is_empty() && language.is_none() {
        errors.push(FieldError::new("language", UNKNOWN_LANGUAGE));
    }

    match language {
        Some(language) if errors.is_empty() => Ok(language),
        _ => Err(SnipError::InvalidDraft { errors }.into()),
    }
}
