use std::sync::Arc;

use anyhow::Context;
use snipx_core::logging_facility;
use snipx_web::highlight::SyntectHighlighter;
use snipx_web::mailer::{LogMailer, MailQueue};
use snipx_web::AppState;
use tokio::signal;

use crate::config::{ServeArgs, ServeConfig};

pub async fn execute(args: ServeArgs) -> anyhow::Result<()> {
    let config = ServeConfig::try_from(args)?;
    logging_facility::init(config.log_format.profile());

    let conn = snipx_store::db::open_migrated(&config.db_path)
        .with_context(|| format!("cannot open database {}", config.db_path.display()))?;
    tracing::info!(db = %config.db_path.display(), "database ready");

    let (queue, worker) =
        MailQueue::start(config.mail_queue, config.mail_from.clone(), Arc::new(LogMailer));
    let state = AppState::new(
        conn,
        Arc::new(SyntectHighlighter::new()),
        Arc::new(queue),
    )
    .with_session_policy(config.sessions);

    let served = snipx_web::serve(state, config.addr, shutdown_signal()).await;

    // The server dropped the last queue handle, so the worker drains and stops.
    let stats = worker.join().await;
    tracing::info!(
        sent = stats.sent,
        failed = stats.failed,
        skipped = stats.skipped,
        "mail worker stopped"
    );
    served?;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
    tracing::info!("shutting down");
}
