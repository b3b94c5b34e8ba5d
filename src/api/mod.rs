pub mod error;
pub mod handlers;
pub mod state;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use crate::config::DashboardConfig;
use crate::price::RateSource;
use crate::refresh::Refresher;

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Page
        .route("/", get(handlers::dashboard::index))
        // Health
        .route("/health", get(|| async { "ok" }))
        // Data
        .route("/api/snapshot", get(handlers::dashboard::snapshot))
        .route("/api/events", get(handlers::events::event_stream))
        .fallback(handlers::dashboard::not_found)
        .layer(cors)
        .with_state(state)
}

/// Serve the dashboard and run the refresh loop until Ctrl-C.
pub async fn serve(
    host: &str,
    port: u16,
    config: DashboardConfig,
    rates: Box<dyn RateSource>,
) -> Result<()> {
    let state = AppState::new(config.title.clone(), config.refresh_interval);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;

    log::info!("dashboard listening on http://{addr}");
    log::info!(
        "  data: {}  refresh: {:?}  quote: {}",
        config.data_path.display(),
        config.refresh_interval,
        config.price_url
    );

    let refresher = Refresher::new(config, rates);
    let target = state.clone();
    let shutdown_rx = state.shutdown_signal();
    let refresh_task = tokio::spawn(async move {
        refresher.run(&target, shutdown_rx).await;
    });

    let signal_state = state.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("shutting down");
            signal_state.shutdown();
        })
        .await
        .context("running server")?;

    refresh_task.await.context("joining refresh loop")?;

    Ok(())
}
