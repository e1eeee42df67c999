use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::handlers::{edit_form_handler, index_handler, save_handler};
use crate::state::AppState;

/// Slack for the form encoding around the `content` field
const FORM_OVERHEAD_BYTES: usize = 4096;

pub fn router(state: AppState) -> Router {
    // Percent-encoding can triple the size of the submitted text.
    let body_limit = state
        .max_content_length()
        .saturating_mul(3)
        .saturating_add(FORM_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(index_handler))
        .route("/edit/:filename", get(edit_form_handler).post(save_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until a shutdown signal arrives
pub async fn run_server(state: AppState, shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<()> {
    let host = state.config.server.host.clone();
    let port = state.config.server.port;

    let listener = TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    serve(listener, state, shutdown_rx).await
}

/// Serve on an already bound listener
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            tracing::info!("Server shutting down signal received");
        })
        .await?;

    Ok(())
}
