//! Navigation to the subscription purchase flow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

/// Emitted when a user asks to upgrade from a premium gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeRequest {
    pub gate_id: Uuid,
    pub requested_at: DateTime<Utc>,
}

/// Outward call that opens the subscription offer
pub trait UpgradeNavigator: Send + Sync {
    fn navigate_to_subscription_offer(&self, gate_id: Uuid);
}

/// Publishes upgrade requests on a broadcast channel
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: broadcast::Sender<UpgradeRequest>,
}

impl ChannelNavigator {
    pub fn new(tx: broadcast::Sender<UpgradeRequest>) -> Self {
        Self { tx }
    }
}

impl UpgradeNavigator for ChannelNavigator {
    fn navigate_to_subscription_offer(&self, gate_id: Uuid) {
        info!("Navigating to subscription offer from gate {}", gate_id);
        let request = UpgradeRequest {
            gate_id,
            requested_at: Utc::now(),
        };
        // No receivers just means nobody is listening yet
        if let Err(e) = self.tx.send(request) {
            warn!("Failed to send upgrade request: {}", e);
        }
    }
}
