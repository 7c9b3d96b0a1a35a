//! Background tasks module
//!
//! The clock drivers that tick rest timers, and the tasks that run
//! alongside the HTTP server.

pub mod clock;
pub mod upgrade_listener;

// Re-export main types
pub use clock::{ClockDriver, ManualClock, SubscriptionHandle, TickCallback, TokioClock};
pub use upgrade_listener::upgrade_listener_task;
