//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::state::{PresetCatalog, DEFAULT_PRESETS};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "rest-timer")]
#[command(about = "Rest timer and premium gate state service")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Interval between timer ticks in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Preset rest durations in seconds, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_PRESETS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub presets: Vec<u32>,

    /// User id with premium access (repeatable)
    #[arg(long = "premium-user")]
    pub premium_users: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn preset_catalog(&self) -> PresetCatalog {
        PresetCatalog::new(self.presets.iter().copied())
    }
}
