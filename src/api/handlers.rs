//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};
use super::extract::{ApiJson, ApiPath};
use super::responses::{
    GateResponse, HealthResponse, MountGateRequest, PresetEntry, PresetsResponse, TimerResponse,
    UpgradeResponse,
};

type ApiResult<T> = Result<Json<T>, AppError>;

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}

/// Handle GET /presets - List the preset catalog
pub async fn presets_handler(State(state): State<Arc<AppState>>) -> Json<PresetsResponse> {
    Json(PresetsResponse {
        presets: state.presets().presets().iter().map(PresetEntry::from).collect(),
    })
}

/// Handle POST /timers - Mount a new idle timer
pub async fn mount_timer_handler(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<TimerResponse>), AppError> {
    let (id, timer) = state.mount_timer()?;
    Ok((StatusCode::CREATED, Json(TimerResponse::new(id, &timer))))
}

/// Handle GET /timers/:id
pub async fn timer_status_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<TimerResponse> {
    let timer = state.timer_snapshot(id)?;
    Ok(Json(TimerResponse::new(id, &timer)))
}

/// Handle DELETE /timers/:id - Unmount and stop the clock
pub async fn unmount_timer_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.unmount_timer(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle POST /timers/:id/start
pub async fn start_timer_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<TimerResponse> {
    let timer = state.start_timer(id)?;
    Ok(Json(TimerResponse::new(id, &timer)))
}

/// Handle POST /timers/:id/pause
pub async fn pause_timer_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<TimerResponse> {
    let timer = state.pause_timer(id)?;
    Ok(Json(TimerResponse::new(id, &timer)))
}

/// Handle POST /timers/:id/reset
pub async fn reset_timer_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<TimerResponse> {
    let timer = state.reset_timer(id)?;
    Ok(Json(TimerResponse::new(id, &timer)))
}

/// Handle POST /timers/:id/preset/:seconds - Restart toward a target
pub async fn select_preset_handler(
    State(state): State<Arc<AppState>>,
    ApiPath((id, seconds)): ApiPath<(Uuid, u32)>,
) -> ApiResult<TimerResponse> {
    let timer = state.select_preset(id, seconds)?;
    Ok(Json(TimerResponse::new(id, &timer)))
}

/// Handle POST /gates - Mount a premium gate for a user
pub async fn mount_gate_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<MountGateRequest>,
) -> Result<(StatusCode, Json<GateResponse>), AppError> {
    let (id, gate) = state.mount_gate(&request.user_id)?;
    Ok((StatusCode::CREATED, Json(GateResponse::new(id, &gate))))
}

/// Handle GET /gates/:id
pub async fn gate_status_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<GateResponse> {
    let gate = state.gate_snapshot(id)?;
    Ok(Json(GateResponse::new(id, &gate)))
}

/// Handle DELETE /gates/:id
pub async fn unmount_gate_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.unmount_gate(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle POST /gates/:id/dismiss - Hide the overlay for this mount
pub async fn dismiss_gate_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<GateResponse> {
    let gate = state.dismiss_gate(id)?;
    Ok(Json(GateResponse::new(id, &gate)))
}

/// Handle POST /gates/:id/upgrade - Open the subscription offer
pub async fn upgrade_gate_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<UpgradeResponse> {
    let gate = state.request_upgrade(id)?;
    Ok(Json(UpgradeResponse::subscription_offer(GateResponse::new(id, &gate))))
}
