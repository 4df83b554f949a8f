//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - Timer engine alternating work and break intervals
//! - Type definitions for configuration, phases, and run states
//! - JSON configuration file loading with default profiles
//! - Desktop alerts for completed intervals
//! - CLI command parsing, keyboard handling, and terminal rendering

pub mod cli;
pub mod config;
pub mod engine;
pub mod notification;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ConfigError, Phase, Profile, RunState, TimerConfig};

pub use engine::{ChannelHooks, TimerEngine, TimerEvent, TimerHooks};

pub use config::{merge_objects, ConfigStore, LoadedConfig};

pub use notification::{
    alert_message, AlertSender, CommandAlertSender, MockAlertSender, NotificationError,
};
