//! Serve command - run the HTTP API

use std::sync::Arc;

use anyhow::{Context, Result};
use pacsocial_api::{AppState, PageLimits, build_router};
use pacsocial_config::Config;
use pacsocial_timeline::{CompetitionClock, SystemClock};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::cmd::{open_archive, wait_for_shutdown};

pub async fn run(config: Config) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS,
        "PacSocial starting"
    );

    let archive = open_archive(&config).await?;
    let clock = CompetitionClock::new(&config.competition, Arc::new(SystemClock));
    let moment = clock.moment();
    info!(
        phase = ?moment.phase,
        virtual_now = moment.current_virtual_time(),
        "competition clock ready"
    );

    let state = AppState::new(
        archive,
        clock,
        PageLimits {
            default_size: config.competition.default_page_size,
            max_size: config.competition.max_page_size,
        },
    );
    let app = build_router(state);

    let addr = config.api_server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind API server to {}", addr))?;
    info!(addr = %addr, "API server listening");

    let cancel = CancellationToken::new();
    let server_cancel = cancel.clone();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                server_cancel.cancelled().await;
            })
            .await
    });

    wait_for_shutdown().await;
    info!("shutdown signal received, stopping server...");
    cancel.cancel();

    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "API server error"),
        Err(e) => error!(error = %e, "API server task failed"),
    }

    info!("PacSocial shutdown complete");
    Ok(())
}
