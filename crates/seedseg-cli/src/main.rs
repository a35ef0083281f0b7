//! seedseg CLI - interactive console for seeded region segmentation.

mod commands;
mod console;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use console::Console;
use log::info;
use seedseg::region::DEFAULT_TOLERANCE;
use seedseg::{SegmentationSession, SessionConfig};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seedseg")]
#[command(about = "Grow, outline and smooth image regions from a seed pixel")]
#[command(version)]
struct Cli {
    /// Log level specification (e.g. "info", "debug", "seedseg=debug").
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory for rotated log files. Logs go to stderr when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Read commands from this file instead of standard input.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Tolerance used by FIND_REGION when none is given.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = logging::setup_logging(&cli.log_level, cli.log_dir.as_deref())?;

    let config = SessionConfig::default().with_default_tolerance(cli.tolerance);
    let mut console = Console::new(SegmentationSession::with_config(config), io::stdout());
    info!("default tolerance {}", cli.tolerance);

    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open script {}", path.display()))?;
            info!("running script {}", path.display());
            console.run(BufReader::new(file), false)?;
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            console.run(stdin.lock(), interactive)?;
        }
    }

    Ok(())
}
