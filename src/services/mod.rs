//! External collaborators
//!
//! Entitlement lookup feeds the premium gate; the navigator carries upgrade
//! requests out to the purchase flow.

pub mod entitlement;
pub mod navigation;

// Re-export main types
pub use entitlement::{EntitlementSource, StaticEntitlements};
pub use navigation::{ChannelNavigator, UpgradeNavigator, UpgradeRequest};
