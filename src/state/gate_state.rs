//! Premium gate visibility state

use uuid::Uuid;

use crate::services::UpgradeNavigator;

/// Overlay that hides premium content from users without access
///
/// Visibility starts as `!has_access`. Dismissing only hides the overlay for
/// this mount; nothing is persisted and access is never re-evaluated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumGate {
    has_access: bool,
    is_visible: bool,
}

impl PremiumGate {
    /// Create a gate from an externally computed access check
    pub fn new(has_access: bool) -> Self {
        Self {
            has_access,
            is_visible: !has_access,
        }
    }

    pub fn has_access(&self) -> bool {
        self.has_access
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Hide the overlay. Does not grant access.
    pub fn dismiss(&mut self) {
        self.is_visible = false;
    }

    /// Send the user to the subscription offer. Visibility is left to the caller.
    pub fn request_upgrade(&self, gate_id: Uuid, navigator: &dyn UpgradeNavigator) {
        navigator.navigate_to_subscription_offer(gate_id);
    }
}
