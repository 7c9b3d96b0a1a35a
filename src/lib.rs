//! Rest Timer - countdown and premium gate state for a fitness app
//!
//! This library provides the rest timer state machine with its cancellable
//! clock, the preset catalog, the premium gate overlay state, and an HTTP
//! service that lets screens mount and drive them.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
