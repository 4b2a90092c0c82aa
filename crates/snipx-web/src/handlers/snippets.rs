use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use snipx_core::errors::{ExError, ExErrorKind};
use snipx_core::model::{SnippetDraft, Viewer};
use snipx_core::rules::access::{authorize, Action};
use snipx_engine::{
    apply_engine_command, apply_engine_query, EngineCommand, EngineQuery, EngineQueryResult,
};

use super::{current_viewer, parse_snippet_id, SnippetForm};
use crate::error::WebError;
use crate::state::AppState;
use crate::views::{self, FormMode};

fn page(markup: maud::Markup) -> Response {
    Html(markup.into_string()).into_response()
}

fn run_query(
    state: &AppState,
    viewer: &Viewer,
    query: EngineQuery,
) -> Result<EngineQueryResult, ExError> {
    state.with_conn(|conn| apply_engine_query(query, conn, viewer))
}

fn unexpected(op: &str, result: &EngineQueryResult) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op)
        .with_message(format!("unexpected query result: {:?}", result))
}

pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let viewer = current_viewer(&state, &headers)?;
    match run_query(&state, &viewer, EngineQuery::SnippetListPublic)? {
        EngineQueryResult::Snippets(snippets) => {
            Ok(page(views::snippet_list(&viewer, "Public snippets", &snippets)))
        }
        other => Err(unexpected("index", &other).into()),
    }
}

pub async fn by_language(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let viewer = current_viewer(&state, &headers)?;
    match run_query(&state, &viewer, EngineQuery::SnippetListByLanguage { slug })? {
        EngineQueryResult::LanguageSnippets { language, snippets } => {
            let heading = format!("{} snippets", language.name);
            Ok(page(views::snippet_list(&viewer, &heading, &snippets)))
        }
        other => Err(unexpected("by_language", &other).into()),
    }
}

pub async fn by_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(username): Path<String>,
) -> Result<Response, WebError> {
    let viewer = current_viewer(&state, &headers)?;
    match run_query(&state, &viewer, EngineQuery::SnippetListByUser { username })? {
        EngineQueryResult::UserSnippets {
            owner, snippets, ..
        } => {
            let heading = format!("Snippets by {}", owner.username);
            Ok(page(views::snippet_list(&viewer, &heading, &snippets)))
        }
        other => Err(unexpected("by_user", &other).into()),
    }
}

pub async fn show(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Result<Response, WebError> {
    let snippet_id = parse_snippet_id(&raw_id)?;
    let viewer = current_viewer(&state, &headers)?;
    let snippet =
        run_query(&state, &viewer, EngineQuery::SnippetGet { snippet_id })?.into_snippet()?;

    let highlighted = state
        .highlighter()
        .highlight(&snippet.body, &snippet.language.slug);
    Ok(page(views::snippet_page(&viewer, &snippet, &highlighted)))
}

/// Re-render a form with its field errors, or pass any other error through
fn form_or_error(
    state: &AppState,
    viewer: &Viewer,
    mode: FormMode,
    draft: &SnippetDraft,
    err: ExError,
) -> Result<Response, WebError> {
    if err.kind() != ExErrorKind::InvalidInput || err.field_errors().is_empty() {
        return Err(err.into());
    }
    let languages = run_query(state, viewer, EngineQuery::LanguageList)?.into_languages()?;
    let markup = views::snippet_form(viewer, mode, draft, &languages, err.field_errors());
    Ok((StatusCode::BAD_REQUEST, Html(markup.into_string())).into_response())
}

pub async fn add_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let viewer = current_viewer(&state, &headers)?;
    authorize(&viewer, &Action::Create)
        .map_err(|denied| ExError::from(denied.into_error(&Action::Create)))?;

    let languages = run_query(&state, &viewer, EngineQuery::LanguageList)?.into_languages()?;
    let draft = SnippetDraft {
        public: true,
        ..SnippetDraft::default()
    };
    Ok(page(views::snippet_form(&viewer, FormMode::Create, &draft, &languages, &[])))
}

/// The submitted form, or `InvalidInput` when the body is not one
fn form_body(form: Result<Form<SnippetForm>, FormRejection>, op: &str) -> Result<SnippetForm, ExError> {
    form.map(|Form(form)| form).map_err(|rejection| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op(op)
            .with_message(rejection.body_text())
    })
}

pub async fn add_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<SnippetForm>, FormRejection>,
) -> Result<Response, WebError> {
    let viewer = current_viewer(&state, &headers)?;
    authorize(&viewer, &Action::Create)
        .map_err(|denied| ExError::from(denied.into_error(&Action::Create)))?;

    let draft = form_body(form, "snippet_create")?.into_draft();
    let cmd = EngineCommand::SnippetCreate {
        draft: draft.clone(),
    };
    let created =
        state.with_conn(|conn| apply_engine_command(cmd, conn, &viewer, state.dispatcher()));
    match created {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(err) => form_or_error(&state, &viewer, FormMode::Create, &draft, err),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Result<Response, WebError> {
    let snippet_id = parse_snippet_id(&raw_id)?;
    let viewer = current_viewer(&state, &headers)?;
    let snippet =
        run_query(&state, &viewer, EngineQuery::SnippetGetForEdit { snippet_id })?.into_snippet()?;
    let languages = run_query(&state, &viewer, EngineQuery::LanguageList)?.into_languages()?;

    let draft = SnippetDraft::from_snippet(&snippet);
    let mode = FormMode::Edit { snippet_id };
    Ok(page(views::snippet_form(&viewer, mode, &draft, &languages, &[])))
}

pub async fn edit_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    form: Result<Form<SnippetForm>, FormRejection>,
) -> Result<Response, WebError> {
    let snippet_id = parse_snippet_id(&raw_id)?;
    let viewer = current_viewer(&state, &headers)?;
    run_query(&state, &viewer, EngineQuery::SnippetGetForEdit { snippet_id })?;

    let draft = form_body(form, "snippet_update")?.into_draft();
    let cmd = EngineCommand::SnippetUpdate {
        snippet_id,
        draft: draft.clone(),
    };
    let updated =
        state.with_conn(|conn| apply_engine_command(cmd, conn, &viewer, state.dispatcher()));
    match updated {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(err) => form_or_error(&state, &viewer, FormMode::Edit { snippet_id }, &draft, err),
    }
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Result<Response, WebError> {
    let snippet_id = parse_snippet_id(&raw_id)?;
    let viewer = current_viewer(&state, &headers)?;
    let snippet = run_query(&state, &viewer, EngineQuery::SnippetGetForDelete { snippet_id })?
        .into_snippet()?;
    Ok(page(views::delete_confirm_page(&viewer, &snippet)))
}

pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Result<Response, WebError> {
    let snippet_id = parse_snippet_id(&raw_id)?;
    let viewer = current_viewer(&state, &headers)?;
    let cmd = EngineCommand::SnippetDelete { snippet_id };
    state.with_conn(|conn| apply_engine_command(cmd, conn, &viewer, state.dispatcher()))?;
    Ok(Redirect::to("/").into_response())
}
