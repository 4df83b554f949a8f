//! Desktop alerts for completed intervals.
//!
//! Alerts are shown by spawning a platform tool:
//! - macOS: `osascript` with a System Events `display alert`
//! - other Unix: `xmessage -center`
//!
//! Other platforms report [`NotificationError::UnsupportedPlatform`]. The
//! spawned process is never waited on by the timer.

mod error;

use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::debug;

pub use error::NotificationError;

use crate::types::Phase;

/// Returns the alert text for a completed interval.
pub fn alert_message(completed: Phase) -> &'static str {
    match completed {
        Phase::Work => "Have a break!",
        Phase::Break => "Get back to work!",
    }
}

/// Trait for alert dispatch implementations.
pub trait AlertSender {
    /// Shows an alert with the given message.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be dispatched.
    fn send(&self, message: &str) -> Result<(), NotificationError>;

    /// Returns true if alerts can be shown at all. Callers skip `send` when
    /// this is false.
    fn is_available(&self) -> bool;
}

// ============================================================================
// Platform commands
// ============================================================================

/// Platform families with different alert tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Unix,
    Unsupported(&'static str),
}

impl Platform {
    /// Returns the platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(unix) {
            Platform::Unix
        } else {
            Platform::Unsupported(std::env::consts::OS)
        }
    }
}

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertCommand {
    pub program: &'static str,
    pub args: Vec<String>,
}

/// Builds the alert command for a platform.
///
/// # Errors
///
/// Returns an error if the platform has no alert tool.
pub fn alert_command(
    platform: Platform,
    message: &str,
) -> Result<AlertCommand, NotificationError> {
    match platform {
        Platform::MacOs => Ok(AlertCommand {
            program: "osascript",
            args: vec![
                "-e".to_string(),
                format!(
                    "tell app \"System Events\" to display alert \"{}\"",
                    escape_applescript(message)
                ),
            ],
        }),
        Platform::Unix => Ok(AlertCommand {
            program: "xmessage",
            args: vec!["-center".to_string(), message.to_string()],
        }),
        Platform::Unsupported(os) => Err(NotificationError::UnsupportedPlatform(os)),
    }
}

fn escape_applescript(message: &str) -> String {
    message.replace('\\', "\\\\").replace('"', "\\\"")
}

// ============================================================================
// CommandAlertSender
// ============================================================================

/// Shows alerts by spawning the platform alert tool.
#[derive(Debug, Clone)]
pub struct CommandAlertSender {
    platform: Platform,
}

impl Default for CommandAlertSender {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandAlertSender {
    /// Creates a sender for the current platform.
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    /// Creates a sender for a specific platform.
    pub fn for_platform(platform: Platform) -> Self {
        Self { platform }
    }
}

impl AlertSender for CommandAlertSender {
    fn send(&self, message: &str) -> Result<(), NotificationError> {
        let command = alert_command(self.platform, message)?;

        let mut child = Command::new(command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| NotificationError::SpawnFailed {
                command: command.program,
                source,
            })?;

        // Reap the child without blocking the timer
        let program = command.program;
        std::thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => debug!("{} exited with {}", program, status),
            Ok(_) => {}
            Err(e) => debug!("failed to wait for {}: {}", program, e),
        });

        Ok(())
    }

    fn is_available(&self) -> bool {
        !matches!(self.platform, Platform::Unsupported(_))
    }
}

// ============================================================================
// MockAlertSender
// ============================================================================

/// Mock alert sender for testing.
#[derive(Debug)]
pub struct MockAlertSender {
    messages: Mutex<Vec<String>>,
    should_fail: AtomicBool,
    available: AtomicBool,
}

impl Default for MockAlertSender {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAlertSender {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl AlertSender for MockAlertSender {
    fn send(&self, message: &str) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Tests
// ============================================================================
