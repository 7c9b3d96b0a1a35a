//! Rest Timer - countdown and premium gate state service
//!
//! This is the main entry point for the rest-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use rest_timer::{
    api::create_router,
    config::Config,
    services::StaticEntitlements,
    state::AppState,
    tasks::{upgrade_listener_task, TokioClock},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("rest_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting rest-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, presets={:?}, premium users={}",
          config.host, config.port, config.tick_ms, config.presets, config.premium_users.len());

    // Create application state
    let state = Arc::new(AppState::new(
        Arc::new(TokioClock::new()),
        config.tick_interval(),
        config.preset_catalog(),
        Arc::new(StaticEntitlements::new(config.premium_users.iter().cloned())),
    ));

    // Start the upgrade listener background task
    tokio::spawn(upgrade_listener_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /presets                      - List rest presets");
    info!("  POST   /timers                       - Mount a rest timer");
    info!("  GET    /timers/:id                   - Timer status");
    info!("  DELETE /timers/:id                   - Unmount a timer");
    info!("  POST   /timers/:id/start|pause|reset - Drive a timer");
    info!("  POST   /timers/:id/preset/:seconds   - Start toward a preset");
    info!("  POST   /gates                        - Mount a premium gate");
    info!("  GET    /gates/:id                    - Gate status");
    info!("  DELETE /gates/:id                    - Unmount a gate");
    info!("  POST   /gates/:id/dismiss            - Hide a gate");
    info!("  POST   /gates/:id/upgrade            - Open the subscription offer");
    info!("  GET    /health                       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
