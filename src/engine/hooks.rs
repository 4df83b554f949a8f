//! Notification hooks consumed by the timer engine.

use tokio::sync::mpsc;
use tracing::trace;

use crate::types::Phase;

/// Receives notifications from a [`TimerEngine`](super::TimerEngine).
///
/// All methods are called on the thread that drives the engine.
pub trait TimerHooks {
    /// Called after every one-second decrement, and once more with 0 when the
    /// interval deadline fires.
    fn on_tick(&mut self, remaining_seconds: u32);

    /// Called with short status messages such as `"Pomodoro to start"`.
    fn on_log(&mut self, message: &str);

    /// Called once when an interval runs to completion.
    fn on_interval_complete(&mut self, phase: Phase);
}

// ============================================================================
// TimerEvent
// ============================================================================

/// Hook invocations as messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed (or the deadline fired)
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// Status message
    Log {
        /// Message text
        message: String,
    },
    /// An interval ran to completion
    IntervalComplete {
        /// Phase of the completed interval
        phase: Phase,
    },
}

// ============================================================================
// ChannelHooks
// ============================================================================

/// Forwards every hook invocation as a [`TimerEvent`] over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelHooks {
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl ChannelHooks {
    /// Creates hooks that send into the given channel.
    pub fn new(event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self { event_tx }
    }

    /// Creates hooks together with the receiving end of their channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: TimerEvent) {
        if let Err(e) = self.event_tx.send(event) {
            trace!("event receiver dropped: {:?}", e.0);
        }
    }
}

impl TimerHooks for ChannelHooks {
    fn on_tick(&mut self, remaining_seconds: u32) {
        self.send(TimerEvent::Tick { remaining_seconds });
    }

    fn on_log(&mut self, message: &str) {
        self.send(TimerEvent::Log {
            message: message.to_string(),
        });
    }

    fn on_interval_complete(&mut self, phase: Phase) {
        self.send(TimerEvent::IntervalComplete { phase });
    }
}
