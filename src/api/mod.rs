//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod extract;
pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/presets", get(presets_handler))
        .route("/timers", post(mount_timer_handler))
        .route("/timers/:id", get(timer_status_handler).delete(unmount_timer_handler))
        .route("/timers/:id/start", post(start_timer_handler))
        .route("/timers/:id/pause", post(pause_timer_handler))
        .route("/timers/:id/reset", post(reset_timer_handler))
        .route("/timers/:id/preset/:seconds", post(select_preset_handler))
        .route("/gates", post(mount_gate_handler))
        .route("/gates/:id", get(gate_status_handler).delete(unmount_gate_handler))
        .route("/gates/:id/dismiss", post(dismiss_gate_handler))
        .route("/gates/:id/upgrade", post(upgrade_gate_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
