//! Upgrade request listener background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::state::AppState;

/// Background task that hands upgrade requests to the purchase flow
///
/// Returns once every sender is gone.
pub async fn upgrade_listener_task(state: Arc<AppState>) {
    info!("Starting upgrade listener task");

    let mut upgrade_rx = state.upgrade_tx.subscribe();
    // The receiver keeps its own copy of the channel; drop ours so the task
    // ends with the state.
    drop(state);

    loop {
        match upgrade_rx.recv().await {
            Ok(request) => {
                info!(
                    "Opening subscription offer for gate {} (requested at {})",
                    request.gate_id, request.requested_at
                );
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Upgrade listener lagged, skipped {} requests", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Upgrade channel closed, stopping listener");
                break;
            }
        }
    }
}
