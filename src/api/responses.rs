//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::{PremiumGate, Preset, TimerState, TimerStatus};

/// Snapshot of one mounted rest timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub id: Uuid,
    pub status: TimerStatus,
    pub elapsed_seconds: u32,
    pub target_seconds: Option<u32>,
    pub remaining_seconds: Option<u32>,
    pub is_running: bool,
    /// Elapsed time as `MM:SS`
    pub display: String,
    pub timestamp: DateTime<Utc>,
}

impl TimerResponse {
    pub fn new(id: Uuid, state: &TimerState) -> Self {
        Self {
            id,
            status: state.status(),
            elapsed_seconds: state.elapsed_seconds(),
            target_seconds: state.target_seconds().map(|t| t.get()),
            remaining_seconds: state.remaining_seconds(),
            is_running: state.is_running(),
            display: state.format_display(),
            timestamp: Utc::now(),
        }
    }
}

/// Snapshot of one mounted premium gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateResponse {
    pub id: Uuid,
    pub is_visible: bool,
    pub has_access: bool,
    pub timestamp: DateTime<Utc>,
}

impl GateResponse {
    pub fn new(id: Uuid, gate: &PremiumGate) -> Self {
        Self {
            id,
            is_visible: gate.is_visible(),
            has_access: gate.has_access(),
            timestamp: Utc::now(),
        }
    }
}

/// Response to an upgrade request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeResponse {
    pub gate: GateResponse,
    pub navigate_to: String,
}

impl UpgradeResponse {
    pub fn subscription_offer(gate: GateResponse) -> Self {
        Self {
            gate,
            navigate_to: "subscription_offer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetEntry {
    pub seconds: u32,
    pub label: String,
}

impl From<&Preset> for PresetEntry {
    fn from(preset: &Preset) -> Self {
        Self {
            seconds: preset.seconds.get(),
            label: preset.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetsResponse {
    pub presets: Vec<PresetEntry>,
}

/// Body of a gate mount request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountGateRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self {
            error,
            timestamp: Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok(uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
        }
    }
}
