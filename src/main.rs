//! Editor Log Viewer - Entry Point

use clap::Parser;
use edlog::config::{self, CliOverrides};
use edlog::state::Session;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Editor Log Viewer - TUI for tailing and filtering editor logs
#[derive(Parser, Debug)]
#[command(name = "edlog")]
#[command(version)]
#[command(about = "TUI application for tailing and filtering growing editor log files")]
pub struct Args {
    /// Log file to tail (defaults to ~/.config/unity3d/Editor.log)
    pub file: Option<PathBuf>,

    /// Start with a filter applied
    #[arg(short, long)]
    pub search: Option<String>,

    /// Number of entries to retain (must be positive)
    #[arg(long, value_parser = parse_positive)]
    pub capacity: Option<usize>,

    /// Bytes read from the end of the file on startup
    #[arg(long)]
    pub backfill_bytes: Option<u64>,

    /// Poll interval in milliseconds (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: Option<u64>,

    /// Start with every entry expanded
    #[arg(long)]
    pub expand_all: bool,

    /// Print the backfilled (and filtered) entries to stdout and exit
    #[arg(long)]
    pub dump: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log at debug level to the diagnostics file
    #[arg(long)]
    pub debug_logs: bool,
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(err) => Err(err.to_string()),
    }
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            file: self.file.clone(),
            capacity: self.capacity,
            backfill_bytes: self.backfill_bytes,
            tick_ms: self.tick_ms,
            // Flags only override when given
            expand_all: self.expand_all.then_some(true),
            debug_logs: self.debug_logs.then_some(true),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);
        config::apply_cli_overrides(with_env, args.overrides())
    };

    edlog::logging::init(&config.log_file_path, config.debug_logs)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let mut session = Session::new(&config);
    session.start();
    if let Some(query) = &args.search {
        session.set_search_query(query);
    }

    if args.dump {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(session.copy_all_visible().as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    edlog::view::run(session, Duration::from_millis(config.tick_ms))?;

    Ok(())
}
