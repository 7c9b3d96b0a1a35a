//! State management module
//!
//! Pure state machines for the rest timer and premium gate, the controller
//! that ties a timer to its clock, and the registry of mounted screens.

pub mod app_state;
pub mod gate_state;
pub mod presets;
pub mod rest_timer;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use gate_state::PremiumGate;
pub use presets::{Preset, PresetCatalog, DEFAULT_PRESETS};
pub use rest_timer::RestTimer;
pub use timer_state::{format_clock, TimerState, TimerStatus};
