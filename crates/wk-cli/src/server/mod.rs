//! HTTP surface: the two calendar feeds and the progress dashboard, one
//! shared client and response cache for every learner.
//!
//! Endpoints:
//! - GET /calendars/{api_key}/blocker.ics
//! - GET /calendars/{api_key}/reviews.ics
//! - GET /calendars/{api_key}/progress.json
//! - GET /healthz

mod error;
mod handlers;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::get;

use crate::context::AppContext;

#[derive(Clone)]
pub struct AppState {
    ctx: Arc<AppContext>,
}

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route(
            "/calendars/{api_key}/blocker.ics",
            get(handlers::blocker_calendar),
        )
        .route(
            "/calendars/{api_key}/reviews.ics",
            get(handlers::review_calendar),
        )
        .route(
            "/calendars/{api_key}/progress.json",
            get(handlers::level_progress),
        )
        .with_state(AppState { ctx: Arc::new(ctx) })
}

/// Bind `server.host:server.port` and serve until Ctrl+C or SIGTERM.
pub async fn run(ctx: AppContext) -> anyhow::Result<()> {
    let addr = ctx.config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "serving calendar feeds");

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
