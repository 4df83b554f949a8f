//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::{Profile, TimerConfig};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer CLI - a keyboard-driven terminal timer
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-cli",
    version,
    about = "ターミナルで動作するポモドーロタイマー",
    long_about = "作業と休憩を交互に繰り返すシンプルなポモドーロタイマー。\n\
                  スペースで開始/停止、sでスキップ、qで終了します。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the JSON configuration file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "local")]
    pub config: Option<PathBuf>,

    /// Use `.pomodoro.json` in the current directory instead of the home directory
    #[arg(long, global = true)]
    pub local: bool,

    /// Default profile written on first run and used for missing keys
    #[arg(long, global = true, value_enum, default_value_t = Profile::Cli)]
    pub profile: Profile,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive timer
    Run(RunArgs),

    /// Print the effective configuration as JSON
    Config,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Overrides applied on top of the configuration file for one session
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Work duration in seconds
    #[arg(short, long, value_name = "SECONDS", value_parser = clap::value_parser!(u32).range(1..))]
    pub work: Option<u32>,

    /// Break duration in seconds
    #[arg(short, long, value_name = "SECONDS", value_parser = clap::value_parser!(u32).range(1..))]
    pub break_time: Option<u32>,

    /// Long break duration in seconds
    #[arg(short, long, value_name = "SECONDS", value_parser = clap::value_parser!(u32).range(1..))]
    pub long_break: Option<u32>,

    /// Continue from the remaining time when restarting a stopped interval
    #[arg(short, long)]
    pub resume: bool,
}

impl RunArgs {
    /// Applies the overrides to a loaded configuration.
    pub fn apply(&self, mut config: TimerConfig) -> TimerConfig {
        if let Some(work) = self.work {
            config.pomodoro_seconds = work;
        }
        if let Some(break_time) = self.break_time {
            config.break_seconds = break_time;
        }
        if let Some(long_break) = self.long_break {
            config.long_break_seconds = long_break;
        }
        if self.resume {
            config.resume_after_stop = true;
        }
        config
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["pomodoro-cli"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
            assert!(!cli.local);
            assert!(cli.config.is_none());
            assert_eq!(cli.profile, Profile::Cli);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["pomodoro-cli", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_config_path() {
            let cli = Cli::parse_from(["pomodoro-cli", "--config", "/tmp/p.json", "config"]);
            assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.json")));
            assert!(matches!(cli.command, Some(Commands::Config)));
        }

        #[test]
        fn test_parse_global_flags_after_subcommand() {
            let cli = Cli::parse_from(["pomodoro-cli", "config", "--local", "--profile", "library"]);
            assert!(cli.local);
            assert_eq!(cli.profile, Profile::Library);
        }

        #[test]
        fn test_config_conflicts_with_local() {
            let result =
                Cli::try_parse_from(["pomodoro-cli", "--config", "a.json", "--local", "config"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_unknown_profile() {
            let result = Cli::try_parse_from(["pomodoro-cli", "--profile", "turbo"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_completions_bash() {
            let cli = Cli::parse_from(["pomodoro-cli", "completions", "bash"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Bash);
                }
                _ => panic!("Expected Completions command"),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Run Command Tests
    // ------------------------------------------------------------------------

    mod run_args_tests {
        use super::*;

        #[test]
        fn test_parse_run_defaults() {
            let cli = Cli::parse_from(["pomodoro-cli", "run"]);
            match cli.command {
                Some(Commands::Run(args)) => {
                    assert!(args.work.is_none());
                    assert!(args.break_time.is_none());
                    assert!(args.long_break.is_none());
                    assert!(!args.resume);
                }
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_parse_run_all_options() {
            let cli = Cli::parse_from([
                "pomodoro-cli",
                "run",
                "--work",
                "1500",
                "--break-time",
                "300",
                "--long-break",
                "900",
                "--resume",
            ]);
            match cli.command {
                Some(Commands::Run(args)) => {
                    assert_eq!(args.work, Some(1500));
                    assert_eq!(args.break_time, Some(300));
                    assert_eq!(args.long_break, Some(900));
                    assert!(args.resume);
                }
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_parse_run_short_options() {
            let cli = Cli::parse_from(["pomodoro-cli", "run", "-w", "10", "-b", "5"]);
            match cli.command {
                Some(Commands::Run(args)) => {
                    assert_eq!(args.work, Some(10));
                    assert_eq!(args.break_time, Some(5));
                }
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_parse_run_rejects_zero() {
            let result = Cli::try_parse_from(["pomodoro-cli", "run", "--work", "0"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_apply_overrides() {
            let args = RunArgs {
                work: Some(10),
                break_time: None,
                long_break: Some(30),
                resume: true,
            };

            let config = args.apply(TimerConfig::preset(Profile::Cli));

            assert_eq!(config.pomodoro_seconds, 10);
            assert_eq!(config.break_seconds, 60);
            assert_eq!(config.long_break_seconds, 30);
            assert!(config.resume_after_stop);
        }

        #[test]
        fn test_apply_no_overrides() {
            let config = RunArgs::default().apply(TimerConfig::default());
            assert_eq!(config, TimerConfig::default());
        }
    }
}
