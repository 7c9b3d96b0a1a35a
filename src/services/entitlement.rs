//! Premium entitlement lookup

use std::collections::HashSet;
use tracing::debug;

/// Answers whether a user may see premium content
pub trait EntitlementSource: Send + Sync {
    fn has_premium_access(&self, user_id: &str) -> bool;
}

/// Entitlements from a fixed set of premium user ids
#[derive(Debug, Clone, Default)]
pub struct StaticEntitlements {
    premium_users: HashSet<String>,
}

impl StaticEntitlements {
    pub fn new<I, S>(premium_users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            premium_users: premium_users.into_iter().map(Into::into).collect(),
        }
    }
}

impl EntitlementSource for StaticEntitlements {
    fn has_premium_access(&self, user_id: &str) -> bool {
        let has_access = self.premium_users.contains(user_id);
        debug!("Entitlement check for {}: {}", user_id, has_access);
        has_access
    }
}
