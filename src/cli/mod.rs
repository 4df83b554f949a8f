//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Progress bar, log, and help rendering
//! - `keyboard`: Raw-mode key reading and key mapping
//! - `session`: The interactive loop tying keys, engine, and display together

pub mod commands;
pub mod display;
pub mod keyboard;
pub mod session;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
pub use keyboard::KeyAction;
pub use session::{run_interactive, Session};
