//! Interactive timer session.
//!
//! Wires the timer engine to the terminal: key presses drive the controls,
//! engine events are rendered, and completed intervals raise a desktop alert.
//! Everything runs on one task; the engine's countdown is polled from the
//! same `select!` loop that handles input.

use std::io::{self, Write};
use std::ops::ControlFlow;

use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal};
use tokio::sync::mpsc;
use tracing::debug;

use super::display::Display;
use super::keyboard::{report_key_reader, spawn_key_reader, KeyAction, RawModeGuard};
use crate::engine::{ChannelHooks, TimerEngine, TimerEvent};
use crate::notification::{alert_message, AlertSender, CommandAlertSender};
use crate::types::TimerConfig;

/// A running terminal session.
pub struct Session<A: AlertSender, W: Write> {
    engine: TimerEngine<ChannelHooks>,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    display: Display<W>,
    alerts: A,
}

impl<A: AlertSender, W: Write> Session<A, W> {
    /// Creates a session with a fresh engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: TimerConfig, alerts: A, display: Display<W>) -> Result<Self> {
        let (hooks, events) = ChannelHooks::channel();
        let engine = TimerEngine::new(config, hooks).context("タイマーを初期化できません")?;

        Ok(Self {
            engine,
            events,
            display,
            alerts,
        })
    }

    /// Arms the first interval and runs until a quit key, Ctrl-C, or the end
    /// of the key stream.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub async fn run(&mut self, mut keys: mpsc::UnboundedReceiver<KeyAction>) -> Result<()> {
        self.engine.arm();

        loop {
            tokio::select! {
                biased;
                Some(event) = self.events.recv() => self.handle_event(event)?,
                action = keys.recv() => {
                    let Some(action) = action else {
                        debug!("key stream closed");
                        break;
                    };
                    if self.handle_key(action)?.is_break() {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
                _ = self.engine.drive() => {}
            }
        }

        // Flush what the last control produced
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event)?;
        }
        self.display.break_progress_line()?;
        Ok(())
    }

    /// Applies a key press to the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn handle_key(&mut self, action: KeyAction) -> Result<ControlFlow<()>> {
        match action {
            KeyAction::ToggleStartStop => {
                if self.engine.is_running() {
                    self.engine.stop();
                } else {
                    self.engine.start();
                }
            }
            KeyAction::Skip => {
                self.display.break_progress_line()?;
                self.engine.skip();
            }
            KeyAction::Quit => return Ok(ControlFlow::Break(())),
            KeyAction::Help => self.display.show_help()?,
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Renders an engine event.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails. Alert failures are
    /// shown as a warning line and never end the session.
    pub fn handle_event(&mut self, event: TimerEvent) -> Result<()> {
        match event {
            TimerEvent::Tick { remaining_seconds } => {
                let total = self.engine.planned_seconds().unwrap_or(remaining_seconds);
                self.display.show_progress(total, remaining_seconds)?;
            }
            TimerEvent::Log { message } => self.display.show_log(&message)?,
            TimerEvent::IntervalComplete { phase } => self.send_alert(alert_message(phase))?,
        }
        Ok(())
    }

    fn send_alert(&mut self, message: &str) -> Result<()> {
        if !self.alerts.is_available() {
            debug!("alerts unavailable, skipping: {}", message);
            return Ok(());
        }

        if let Err(e) = self.alerts.send(message) {
            self.display
                .show_warning(&format!("アラートを表示できません: {} ({})", e, e.suggestion()))?;
        }
        Ok(())
    }

    /// Returns the engine.
    pub fn engine(&self) -> &TimerEngine<ChannelHooks> {
        &self.engine
    }

    /// Returns the alert sender.
    pub fn alerts(&self) -> &A {
        &self.alerts
    }

    /// Consumes the session and returns the display.
    pub fn into_display(self) -> Display<W> {
        self.display
    }
}

/// Clears the screen and moves the cursor to the top-left corner.
fn clear_screen() -> io::Result<()> {
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )
}

/// Runs the interactive timer on the current terminal.
///
/// # Errors
///
/// Returns an error if the terminal cannot be put in raw mode, the
/// configuration is invalid, or writing to the terminal fails.
pub async fn run_interactive(config: TimerConfig) -> Result<()> {
    let raw = RawModeGuard::enable()?;
    let mut display = Display::stdout();

    if let Err(e) = clear_screen() {
        display.show_warning(&format!("画面をクリアできません: {}", e))?;
    }
    display.show_help()?;

    let (keys, reader) = spawn_key_reader();
    let mut session = Session::new(config, CommandAlertSender::new(), display)?;
    let result = session.run(keys).await;

    drop(raw);
    report_key_reader(reader);
    result
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::MockAlertSender;
    use crate::types::{Phase, RunState};

    fn create_session(config: TimerConfig) -> Session<MockAlertSender, Vec<u8>> {
        Session::new(config, MockAlertSender::new(), Display::new(Vec::new())).unwrap()
    }

    fn fast_config() -> TimerConfig {
        TimerConfig::default()
            .with_pomodoro_seconds(2)
            .with_break_seconds(1)
    }

    fn output(session: Session<MockAlertSender, Vec<u8>>) -> String {
        String::from_utf8(session.into_display().into_inner()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Session::new(
            TimerConfig::default().with_pomodoro_seconds(0),
            MockAlertSender::new(),
            Display::new(Vec::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_quit_breaks() {
        let mut session = create_session(fast_config());
        let flow = session.handle_key(KeyAction::Quit).unwrap();
        assert!(flow.is_break());
    }

    #[test]
    fn test_skip_key_advances_cycle() {
        let mut session = create_session(fast_config());

        let flow = session.handle_key(KeyAction::Skip).unwrap();

        assert!(flow.is_continue());
        assert_eq!(session.engine().cycle_count(), 1);
        assert_eq!(session.engine().phase(), Some(Phase::Break));
    }

    #[test]
    fn test_help_key_prints_help() {
        let mut session = create_session(fast_config());
        session.handle_key(KeyAction::Help).unwrap();
        assert!(output(session).contains("Show help"));
    }

    #[test]
    fn test_alert_failure_is_not_fatal() {
        let mut session = create_session(fast_config());
        session.alerts().set_should_fail(true);

        let result = session.handle_event(TimerEvent::IntervalComplete { phase: Phase::Work });

        assert!(result.is_ok());
        assert_eq!(session.alerts().alert_count(), 0);
        let out = output(session);
        assert!(out.contains("アラートを表示できません"));
        assert!(out.ends_with("\x1b[0m\r\n"));
    }

    #[test]
    fn test_unavailable_alerts_are_skipped() {
        let mut session = create_session(fast_config());
        session.alerts().set_available(false);

        session
            .handle_event(TimerEvent::IntervalComplete { phase: Phase::Break })
            .unwrap();

        assert_eq!(session.alerts().alert_count(), 0);
        assert!(output(session).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_starts_and_stops() {
        let mut session = create_session(fast_config());

        session.handle_key(KeyAction::ToggleStartStop).unwrap();
        assert_eq!(session.engine().run_state(), RunState::Running);

        session.handle_key(KeyAction::ToggleStartStop).unwrap();
        assert_eq!(session.engine().run_state(), RunState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_completes_interval_and_alerts() {
        use tokio::time::{sleep, Duration};

        let mut session = create_session(fast_config());
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(KeyAction::ToggleStartStop).unwrap();
        tokio::spawn(async move {
            sleep(Duration::from_secs(5)).await;
            let _ = tx.send(KeyAction::Quit);
        });

        session.run(rx).await.unwrap();

        assert_eq!(session.alerts().messages(), vec!["Have a break!"]);
        assert_eq!(session.engine().phase(), Some(Phase::Break));
        assert!(!session.engine().is_running());

        let out = output(session);
        assert!(out.contains("Pomodoro to start"));
        assert!(out.contains("100%"));
        assert!(out.contains("Ended"));
        assert!(out.contains("Break to start"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_intervals_each_draw_a_bar() {
        use tokio::time::{sleep, Duration};

        let mut session = create_session(fast_config());
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(KeyAction::ToggleStartStop).unwrap();
        tokio::spawn(async move {
            sleep(Duration::from_secs(3)).await;
            let _ = tx.send(KeyAction::ToggleStartStop);
            sleep(Duration::from_secs(3)).await;
            let _ = tx.send(KeyAction::Quit);
        });

        session.run(rx).await.unwrap();

        assert_eq!(
            session.alerts().messages(),
            vec!["Have a break!", "Get back to work!"]
        );
        assert_eq!(output(session).matches("100%").count(), 2);
    }
}
