use std::future::Future;
use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use snipx_core::errors::{ExError, ExErrorKind};
use tokio::net::TcpListener;

use crate::handlers::{auth, snippets};
use crate::middleware::trace_request;
use crate::state::AppState;

/// All routes, wrapped in the request-tracing layer
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(snippets::index))
        .route("/health", get(health))
        .route("/login/", get(auth::login_form).post(auth::login_submit))
        .route("/logout/", get(auth::logout_link).post(auth::logout))
        .route("/snippets/lang/:slug/", get(snippets::by_language))
        .route("/snippets/user/:username/", get(snippets::by_user))
        .route("/snippets/snippet/:id/", get(snippets::show))
        .route(
            "/snippets/add/",
            get(snippets::add_form).post(snippets::add_submit),
        )
        .route(
            "/snippets/edit/:id/",
            get(snippets::edit_form).post(snippets::edit_submit),
        )
        .route(
            "/snippets/delete/:id/",
            get(snippets::delete_confirm).post(snippets::delete),
        )
        .layer(axum::middleware::from_fn(trace_request))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Bind `addr` and serve until `shutdown` resolves
///
/// # Errors
///
/// `Io` when the address cannot be bound or the server fails.
pub async fn serve(
    state: AppState,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ExError> {
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("serve")
            .with_entity_id(addr.to_string())
            .with_message(format!("failed to bind: {}", e))
    })?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("serve")
                .with_message(e.to_string())
        })?;
    tracing::info!("server stopped");
    Ok(())
}
