use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use snipx_core::core_types::Sensitive;
use snipx_core::errors::{ExError, ExErrorKind};
use snipx_core::{log_op_end, log_op_error, log_op_start};
use snipx_engine::commands::session;

use super::current_viewer;
use crate::error::WebError;
use crate::session::{cleared_session_cookie, session_cookie, session_token};
use crate::state::AppState;
use crate::views;

const BAD_CREDENTIALS: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: Sensitive<String>,
}

pub async fn login_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    if current_viewer(&state, &headers)?.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(Html(views::login_page("", None).into_string()).into_response())
}

/// Credentials are looked up and the session opened under the connection
/// lock; the password hash check runs on the blocking pool without it.
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    log_op_start!("login", username = form.username.as_str());
    let start = std::time::Instant::now();

    match authenticate(&state, &form).await {
        Ok(outcome) => {
            log_op_end!(
                "login",
                duration_ms = elapsed_ms(start),
                user_id = outcome.user.id
            );
            let cookie = session_cookie(outcome.token.expose(), state.sessions().max_age_secs())
                .ok_or_else(|| {
                    ExError::new(ExErrorKind::Internal)
                        .with_op("login")
                        .with_message("session token is not a valid header value")
                })?;
            let mut response = Redirect::to("/").into_response();
            response.headers_mut().insert(SET_COOKIE, cookie);
            Ok(response)
        }
        Err(err) => {
            log_op_error!("login", err.clone(), duration_ms = elapsed_ms(start));
            if err.kind() == ExErrorKind::InvalidCredentials {
                return Ok(
                    Html(views::login_page(&form.username, Some(BAD_CREDENTIALS)).into_string())
                        .into_response(),
                );
            }
            Err(err.into())
        }
    }
}

async fn authenticate(
    state: &AppState,
    form: &LoginForm,
) -> Result<session::LoginOutcome, ExError> {
    let stored = state.with_conn(|conn| session::find_credentials(&form.username, conn))?;

    let password = form.password.clone();
    let user = tokio::task::spawn_blocking(move || session::check_credentials(stored, &password))
        .await
        .map_err(|e| {
            ExError::new(ExErrorKind::Internal)
                .with_op("login")
                .with_message(format!("password check did not complete: {e}"))
        })??;

    let policy = *state.sessions();
    state.with_conn(|conn| session::open_session(user, &policy, conn))
}

/// `GET /logout/` only sends the viewer home; the session ends on POST
pub async fn logout_link() -> Redirect {
    Redirect::to("/")
}

/// An anonymous viewer is just sent home
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let Some(token) = session_token(&headers) else {
        return Ok(Redirect::to("/").into_response());
    };
    state.with_conn(|conn| session::logout(&token, conn))?;

    let mut response = Redirect::to("/").into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, cleared_session_cookie());
    Ok(response)
}

fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
