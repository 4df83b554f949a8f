//! Timer engine and the hooks it notifies.
//!
//! - `timer`: the work/break state machine and its countdown
//! - `hooks`: the notification interface and a channel-backed implementation

pub mod hooks;
pub mod timer;

pub use hooks::{ChannelHooks, TimerEvent, TimerHooks};
pub use timer::TimerEngine;
