//! Pomodoro Timer CLI - a keyboard-driven terminal timer
//!
//! Alternates work and break intervals:
//! - Space starts or stops the current interval
//! - `s` skips to the next interval
//! - `q` quits
//!
//! Durations come from `~/.pomodoro.json`, written with defaults on first run.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use pomodoro_cli::cli::{run_interactive, Cli, Commands, Display, RunArgs};
use pomodoro_cli::config::{ConfigStore, LoadedConfig};
use pomodoro_cli::TimerConfig;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins over `--verbose`. Output goes to stderr. While the session
/// holds the terminal in raw mode, user-facing warnings go through `Display`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command.clone() {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        Some(Commands::Config) => {
            let loaded = load_config(&cli)?;
            println!("{}", serde_json::to_string_pretty(&loaded.document)?);
        }
        Some(Commands::Run(args)) => run(&cli, &args).await?,
        None => run(&cli, &RunArgs::default()).await?,
    }

    Ok(())
}

/// Loads the configuration and runs the interactive timer.
async fn run(cli: &Cli, args: &RunArgs) -> Result<()> {
    let loaded = load_config(cli)?;
    let config = args.apply(loaded.config);
    config.validate()?;

    tracing::debug!(
        "タイマーを開始します: 作業{}秒, 休憩{}秒",
        config.pomodoro_seconds,
        config.break_seconds
    );

    run_interactive(config).await
}

/// Resolves the configuration file from the global flags and loads it.
fn load_config(cli: &Cli) -> Result<LoadedConfig> {
    let store = match (&cli.config, cli.local) {
        (Some(path), _) => ConfigStore::new(path),
        (None, true) => ConfigStore::project(),
        (None, false) => ConfigStore::home()?,
    };

    let loaded = match store.load_or_init(&TimerConfig::preset(cli.profile)) {
        Ok(loaded) => loaded,
        Err(e) if e.is_malformed_file() => {
            return Err(e).with_context(|| {
                format!(
                    "{} を修正するか削除してください (削除すると既定値で作り直します)",
                    store.path().display()
                )
            });
        }
        Err(e) => return Err(e.into()),
    };
    if loaded.created {
        Display::show_config_created(&loaded.path);
    }
    Ok(loaded)
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
