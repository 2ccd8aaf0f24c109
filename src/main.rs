//! Bead Timer - a round-robin topic timer
//!
//! This is the main entry point for the bead-timer application.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use bead_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{cue_player_task, tick_driver_task, TICK_PERIOD},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("bead_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting bead-timer v{}", env!("CARGO_PKG_VERSION"));

    let topics = config.topic_list()?;
    info!(
        "Configuration: host={}, port={}, duration={}s, topics={:?}",
        config.host, config.port, config.duration, topics
    );

    let state = Arc::new(
        AppState::start(config.port, config.host.clone(), topics, config.duration)
            .context("Failed to start timer")?,
    );
    if config.start_paused {
        state.take_startup_effects();
        state.pause()?;
        info!("Timer starts paused, POST /resume to begin");
    }

    // Effects first so the start cue has a consumer
    let cue_state = Arc::clone(&state);
    let player = Arc::new(config.cue_player());
    tokio::spawn(async move {
        cue_player_task(cue_state, player).await;
    });

    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_driver_task(tick_state, TICK_PERIOD).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /pause     - Pause the timer");
    info!("  POST /resume    - Resume the timer");
    info!("  POST /reset     - Back to the first topic");
    info!("  PUT  /duration  - Set seconds per topic");
    info!("  GET  /status    - Current topic, countdown and overall time");
    info!("  GET  /health    - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            match signal {
                Ok(_) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Signal handling failed: {:#}", e),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
