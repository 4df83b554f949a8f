//! Keyboard input for the interactive session.
//!
//! The terminal is switched to raw mode so single key presses arrive without
//! waiting for Enter. A background thread blocks on crossterm events and
//! forwards mapped actions over a channel; it never touches timer state.

use std::io;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Space: start if stopped, stop if running
    ToggleStartStop,
    /// `s`: skip to the next interval
    Skip,
    /// `q` or `c` (Ctrl-C arrives as `c` in raw mode)
    Quit,
    /// Anything else
    Help,
}

impl KeyAction {
    /// Maps a key event to an action.
    pub fn from_key(key: &KeyEvent) -> Self {
        match key.code {
            KeyCode::Char(' ') => KeyAction::ToggleStartStop,
            KeyCode::Char('s') => KeyAction::Skip,
            KeyCode::Char('q') | KeyCode::Char('c') => KeyAction::Quit,
            _ => KeyAction::Help,
        }
    }
}

/// Keeps the terminal in raw mode for as long as it lives.
#[derive(Debug)]
pub struct RawModeGuard(());

impl RawModeGuard {
    /// Enables raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin is not a terminal.
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("ターミナルをrawモードにできません")?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("rawモードの解除に失敗しました: {}", e);
        }
    }
}

/// Spawns the key reader thread and returns the action stream.
///
/// The thread exits with `Ok` when the receiver is dropped and the next key
/// arrives, or with the read error. It does not log, since the terminal is
/// in raw mode while it runs; see [`report_key_reader`].
pub fn spawn_key_reader() -> (mpsc::UnboundedReceiver<KeyAction>, JoinHandle<io::Result<()>>) {
    let (tx, rx) = mpsc::unbounded_channel();

    let handle = thread::spawn(move || -> io::Result<()> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if tx.send(KeyAction::from_key(&key)).is_err() {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    });

    (rx, handle)
}

/// Logs how the key reader ended, if it has.
///
/// Call after raw mode is disabled. A reader still blocked on input is left
/// alone.
pub fn report_key_reader(handle: JoinHandle<io::Result<()>>) {
    if !handle.is_finished() {
        debug!("key reader still waiting for input");
        return;
    }

    match handle.join() {
        Ok(Ok(())) => debug!("key reader stopped"),
        Ok(Err(e)) => warn!("キー入力の読み取りに失敗しました: {}", e),
        Err(_) => warn!("キー入力スレッドが異常終了しました"),
    }
}
