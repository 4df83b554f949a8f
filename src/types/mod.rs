//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Interval phases and run states
//! - Timer configuration with validation
//! - Named default configuration profiles

mod error;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use error::ConfigError;

// ============================================================================
// Phase
// ============================================================================

/// The kind of interval the engine is armed with or running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// A focused work interval
    Work,
    /// A break between work intervals
    Break,
}

impl Phase {
    /// Returns the phase that follows the given number of elapsed cycles.
    ///
    /// Even cycle counts are work intervals, odd ones are breaks.
    pub fn for_cycle(cycle_count: u64) -> Self {
        if cycle_count % 2 == 0 {
            Phase::Work
        } else {
            Phase::Break
        }
    }

    /// Returns the label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Pomodoro",
            Phase::Break => "Break",
        }
    }

    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// RunState
// ============================================================================

/// Whether the countdown is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Armed but never started
    #[default]
    Idle,
    /// Countdown active
    Running,
    /// Halted by the caller or completed
    Stopped,
}

impl RunState {
    /// Returns the string representation of the run state.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Stopped => "stopped",
        }
    }

    /// Returns true if the countdown is active.
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Named default configuration presets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Long work intervals (52 min / 7 min)
    Library,
    /// Short work intervals (30 min / 1 min)
    #[default]
    Cli,
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Configuration for the timer engine.
///
/// Field names on disk follow the keys of the persisted JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work interval length in seconds
    #[serde(rename = "pomodoroTime")]
    pub pomodoro_seconds: u32,
    /// Break length in seconds
    #[serde(rename = "breakTime")]
    pub break_seconds: u32,
    /// Long break length in seconds (not scheduled yet)
    #[serde(rename = "longBreakTime")]
    pub long_break_seconds: u32,
    /// Work intervals per day (informational)
    #[serde(rename = "perDay")]
    pub cycles_per_day: u32,
    /// Work intervals before a long break (informational)
    #[serde(rename = "whenToLongBreak")]
    pub cycles_until_long_break: u32,
    /// Whether a restart after stop continues from where it stopped
    #[serde(rename = "resumeAfterStop", default)]
    pub resume_after_stop: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::preset(Profile::Library)
    }
}

impl TimerConfig {
    /// Returns the defaults of a named profile.
    pub fn preset(profile: Profile) -> Self {
        match profile {
            Profile::Library => Self {
                pomodoro_seconds: 3120,
                break_seconds: 420,
                long_break_seconds: 900,
                cycles_per_day: 8,
                cycles_until_long_break: 4,
                resume_after_stop: false,
            },
            Profile::Cli => Self {
                pomodoro_seconds: 1800,
                break_seconds: 60,
                long_break_seconds: 900,
                cycles_per_day: 20,
                cycles_until_long_break: 10,
                resume_after_stop: false,
            },
        }
    }

    /// Sets the work interval length.
    pub fn with_pomodoro_seconds(mut self, seconds: u32) -> Self {
        self.pomodoro_seconds = seconds;
        self
    }

    /// Sets the break length.
    pub fn with_break_seconds(mut self, seconds: u32) -> Self {
        self.break_seconds = seconds;
        self
    }

    /// Sets the long break length.
    pub fn with_long_break_seconds(mut self, seconds: u32) -> Self {
        self.long_break_seconds = seconds;
        self
    }

    /// Enables or disables resuming after stop.
    pub fn with_resume_after_stop(mut self, resume: bool) -> Self {
        self.resume_after_stop = resume;
        self
    }

    /// Returns the nominal length of an interval of the given phase.
    pub fn duration_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.pomodoro_seconds,
            Phase::Break => self.break_seconds,
        }
    }

    /// Validates the configuration.
    ///
    /// Every duration and count must be positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("pomodoroTime", self.pomodoro_seconds),
            ("breakTime", self.break_seconds),
            ("longBreakTime", self.long_break_seconds),
            ("perDay", self.cycles_per_day),
            ("whenToLongBreak", self.cycles_until_long_break),
        ];

        match checks.iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(ConfigError::NotPositive(*field)),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
