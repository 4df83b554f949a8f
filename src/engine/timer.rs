//! Timer engine for the Pomodoro Timer.
//!
//! This module provides the core timer functionality:
//! - Alternating work/break intervals chosen by cycle parity
//! - Countdown with a one-second `tokio::time::Interval`
//! - A one-shot deadline that ends the interval and arms the next one
//! - Hook dispatch for ticks, log messages, and completed intervals
//!
//! The engine is single-owner. Timing activities are driven by awaiting
//! [`TimerEngine::drive`] on the same task that calls the controls, so no
//! locking is involved and cancelling a countdown is just dropping it.

use std::future::pending;
use std::pin::Pin;

use tokio::time::{
    interval_at, sleep_until, Duration, Instant, Interval, MissedTickBehavior, Sleep,
};
use tracing::debug;

use super::hooks::TimerHooks;
use crate::types::{ConfigError, Phase, RunState, TimerConfig};

/// Period of the remaining-time tick.
const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// Countdown
// ============================================================================

enum CountdownEvent {
    Tick,
    Deadline,
}

/// The two timing activities of a running interval.
///
/// Dropping a `Countdown` cancels both.
struct Countdown {
    ticker: Interval,
    deadline: Pin<Box<Sleep>>,
}

impl Countdown {
    fn new(seconds: u32) -> Self {
        let started = Instant::now();

        let mut ticker = interval_at(started + TICK_PERIOD, TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let deadline = Box::pin(sleep_until(
            started + Duration::from_secs(u64::from(seconds)),
        ));

        Self { ticker, deadline }
    }

    /// Waits for the next activity. Ticks win over the deadline when both
    /// are due at the same instant.
    async fn next(&mut self) -> CountdownEvent {
        tokio::select! {
            biased;
            _ = self.ticker.tick() => CountdownEvent::Tick,
            _ = &mut self.deadline => CountdownEvent::Deadline,
        }
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that manages the work/break cycle and notifies its hooks.
pub struct TimerEngine<H: TimerHooks> {
    config: TimerConfig,
    hooks: H,
    cycle_count: u64,
    phase: Option<Phase>,
    planned_seconds: Option<u32>,
    remaining_seconds: u32,
    /// Remainder recorded by the last stop, used when `resume_after_stop` is set
    resume_from: Option<u32>,
    run_state: RunState,
    countdown: Option<Countdown>,
}

impl<H: TimerHooks> TimerEngine<H> {
    /// Creates a new engine. Nothing is armed yet.
    ///
    /// # Errors
    ///
    /// Returns an error if any duration or count in `config` is zero.
    pub fn new(config: TimerConfig, hooks: H) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            hooks,
            cycle_count: 0,
            phase: None,
            planned_seconds: None,
            remaining_seconds: 0,
            resume_from: None,
            run_state: RunState::Idle,
            countdown: None,
        })
    }

    /// Determines the next interval from the cycle count and announces it.
    ///
    /// Does not start counting down and does not reset the remaining time.
    pub fn arm(&mut self) {
        self.arm_next();
    }

    fn arm_next(&mut self) -> (Phase, u32) {
        let phase = Phase::for_cycle(self.cycle_count);
        let planned = self.config.duration_for(phase);

        self.phase = Some(phase);
        self.planned_seconds = Some(planned);
        self.remaining_seconds = self.remaining_seconds.min(planned);
        self.resume_from = None;

        debug!(
            "armed {} for {}s (cycle {})",
            phase.as_str(),
            planned,
            self.cycle_count
        );
        self.hooks.on_log(&format!("{} to start", phase.label()));

        (phase, planned)
    }

    /// Starts counting down the armed interval, arming one first if needed.
    ///
    /// Any countdown already in progress is replaced.
    pub fn start(&mut self) {
        let (phase, planned) = match (self.phase, self.planned_seconds) {
            (Some(phase), Some(planned)) => (phase, planned),
            _ => self.arm_next(),
        };

        self.countdown = None;

        let snapshot = match self.resume_from.take() {
            Some(remaining) if self.config.resume_after_stop && remaining > 0 => remaining,
            _ => planned,
        };

        self.remaining_seconds = snapshot;
        self.run_state = RunState::Running;
        self.countdown = Some(Countdown::new(snapshot));

        debug!("started {} with {}s remaining", phase.as_str(), snapshot);
    }

    /// Halts the countdown.
    ///
    /// Does nothing if the engine is not running.
    pub fn stop(&mut self) {
        if !self.run_state.is_running() {
            debug!("stop ignored: timer is {}", self.run_state.as_str());
            return;
        }

        self.countdown = None;
        self.resume_from = Some(self.remaining_seconds);
        self.run_state = RunState::Stopped;

        debug!("stopped with {}s remaining", self.remaining_seconds);
        self.hooks.on_log("Stopped");
    }

    /// Abandons the current interval and arms the next one without starting it.
    pub fn skip(&mut self) {
        self.countdown = None;
        if self.run_state.is_running() {
            self.run_state = RunState::Stopped;
        }

        self.cycle_count += 1;
        self.arm_next();
    }

    /// Waits for the next timing activity and applies it.
    ///
    /// Never completes while no countdown is active, which makes it suitable
    /// as a `tokio::select!` branch. Cancel-safe.
    pub async fn drive(&mut self) {
        let event = match self.countdown.as_mut() {
            Some(countdown) => countdown.next().await,
            None => pending().await,
        };

        match event {
            CountdownEvent::Tick => self.handle_tick(),
            CountdownEvent::Deadline => self.handle_deadline(),
        }
    }

    fn handle_tick(&mut self) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.hooks.on_tick(self.remaining_seconds);
    }

    fn handle_deadline(&mut self) {
        self.countdown = None;

        // Periodic ticks may have drifted short of zero
        self.remaining_seconds = 0;
        self.hooks.on_tick(0);

        self.run_state = RunState::Stopped;
        self.hooks.on_log("Ended");

        if let Some(phase) = self.phase {
            debug!("{} completed", phase.as_str());
            self.hooks.on_interval_complete(phase);
        }

        self.skip();
    }

    /// Returns the armed or running phase, `None` before the first arming.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Returns the current run state.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Returns true if a countdown is active.
    pub fn is_running(&self) -> bool {
        self.run_state.is_running()
    }

    /// Returns the nominal length of the armed interval.
    pub fn planned_seconds(&self) -> Option<u32> {
        self.planned_seconds
    }

    /// Returns the seconds left in the current countdown.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns how many intervals have been completed or skipped.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns the hooks.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }
}

// ============================================================================
// Tests
// ============================================================================
