//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted terminal output for:
//! - The progress bar redrawn on every tick
//! - Prefixed log messages from the engine
//! - Keyboard help
//! - Error messages
//!
//! The terminal runs in raw mode during a session, so every line ends with
//! `\r\n` and the progress bar is redrawn in place with `\r`.

use std::io::{self, Write};
use std::path::Path;

/// Red bold module tag printed before every message.
pub const MODULE_TAG: &str = "\x1b[1;31m[Pomodoro]\x1b[0m";

/// Width of the progress bar in cells.
pub const BAR_WIDTH: usize = 30;

const COMPLETE_CELL: &str = "\x1b[42m \x1b[0m";
const INCOMPLETE_CELL: &str = "\x1b[41m \x1b[0m";

// ============================================================================
// Formatting
// ============================================================================

/// Formats remaining time: seconds under a minute, otherwise rounded-up minutes.
pub fn format_remaining(seconds: u32) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else {
        format!("{}m", seconds.div_ceil(60))
    }
}

/// Returns the completed fraction as whole percent.
pub fn percent_complete(total: u32, remaining: u32) -> u32 {
    if total == 0 {
        return 100;
    }
    let remaining = remaining.min(total);
    let done = u64::from(total - remaining);
    (done * 100 / u64::from(total)) as u32
}

/// Renders one progress line without a trailing newline.
pub fn render_progress(total: u32, remaining: u32) -> String {
    let percent = percent_complete(total, remaining) as usize;
    let filled = BAR_WIDTH * percent / 100;

    let mut bar = String::with_capacity(BAR_WIDTH * COMPLETE_CELL.len());
    for cell in 0..BAR_WIDTH {
        bar.push_str(if cell < filled {
            COMPLETE_CELL
        } else {
            INCOMPLETE_CELL
        });
    }

    format!(
        "{} {} \x1b[1m{}%\x1b[0m \x1b[33m|\x1b[0m Remaining: \x1b[1m{}\x1b[0m",
        MODULE_TAG,
        bar,
        percent,
        format_remaining(remaining.min(total))
    )
}

/// Formats an engine log message, or `None` if it should not be shown.
pub fn format_log(message: &str) -> Option<String> {
    if message == "Stopped" {
        return None;
    }
    Some(format!("{} {}", MODULE_TAG, message))
}

/// Returns the keyboard help lines.
pub fn help_lines() -> Vec<String> {
    vec![
        format!("{}\x1b[32m Help\x1b[0m", MODULE_TAG),
        "       \x1b[1mH\x1b[0m       Show help".to_string(),
        "       \x1b[1mSpace\x1b[0m   Start/stop actual timer".to_string(),
        "       \x1b[1mS\x1b[0m       Skip the actual timer".to_string(),
        "       \x1b[1mQ\x1b[0m       Quit".to_string(),
    ]
}

// ============================================================================
// Display
// ============================================================================

/// Session output writer.
///
/// Tracks whether a progress bar is drawn on the current line so that the
/// next message starts on a fresh one.
#[derive(Debug)]
pub struct Display<W: Write> {
    out: W,
    in_progress: bool,
    /// A 100% bar was drawn and nothing has counted down since
    finished: bool,
}

impl Display<io::Stdout> {
    /// Creates a display writing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Shows the notice printed when a config file was written for the first time.
    pub fn show_config_created(path: &Path) {
        eprintln!("* 設定ファイルを作成しました: {}", path.display());
    }

    /// Shows an error message on stderr.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }
}

impl<W: Write> Display<W> {
    /// Creates a display writing to the given sink.
    pub fn new(out: W) -> Self {
        Self {
            out,
            in_progress: false,
            finished: false,
        }
    }

    /// Redraws the progress bar in place.
    ///
    /// A repeated zero tick after the bar is already complete draws nothing.
    pub fn show_progress(&mut self, total: u32, remaining: u32) -> io::Result<()> {
        if remaining == 0 && self.finished {
            return Ok(());
        }

        write!(self.out, "\r{}", render_progress(total, remaining))?;
        self.in_progress = remaining > 0;
        self.finished = remaining == 0;
        if self.finished {
            write!(self.out, "\r\n")?;
        }
        self.out.flush()
    }

    /// Prints an engine log message.
    ///
    /// Every engine message closes the current bar, so the next zero tick
    /// belongs to a new interval and is drawn.
    pub fn show_log(&mut self, message: &str) -> io::Result<()> {
        self.finished = false;
        let Some(line) = format_log(message) else {
            return Ok(());
        };
        self.break_progress_line()?;
        write!(self.out, "{}\r\n", line)?;
        self.out.flush()
    }

    /// Prints a warning in the session layout.
    ///
    /// Used instead of `tracing` while the terminal is in raw mode, where
    /// lines must end with `\r\n`.
    pub fn show_warning(&mut self, message: &str) -> io::Result<()> {
        self.break_progress_line()?;
        write!(self.out, "{} \x1b[33m{}\x1b[0m\r\n", MODULE_TAG, message)?;
        self.out.flush()
    }

    /// Prints the keyboard help.
    pub fn show_help(&mut self) -> io::Result<()> {
        self.break_progress_line()?;
        write!(self.out, "\r\n")?;
        for line in help_lines() {
            write!(self.out, "{}\r\n", line)?;
        }
        write!(self.out, "\r\n")?;
        self.out.flush()
    }

    /// Ends a partially drawn progress line.
    pub fn break_progress_line(&mut self) -> io::Result<()> {
        if self.in_progress {
            write!(self.out, "\r\n")?;
            self.in_progress = false;
        }
        Ok(())
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

// ============================================================================
// Tests
// ============================================================================
