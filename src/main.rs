use std::path::PathBuf;

use clap::Parser;
use stock_sync::config::SyncPaths;
use stock_sync::diagnostics::TracingSink;
use stock_sync::sync;
use stock_sync::{Result, SyncError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&cli.log_level) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    if let Err(err) = run(cli) {
        error!(error = %err, "reconciliation failed");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = match cli.base_dir {
        Some(dir) => SyncPaths::in_dir(&dir),
        None => SyncPaths::beside_executable()?,
    };

    let summary = sync::run(&paths, &mut TracingSink)?;
    info!(
        stock_rows = summary.stock_rows,
        catalog_rows = summary.catalog_rows,
        updated = summary.updated,
        unmatched = summary.unmatched.len(),
        "reconciliation complete"
    );
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).map_err(|err| SyncError::Logging(err.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| SyncError::Logging(err.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Sync catalog export quantities with the stock-count sheet."
)]
struct Cli {
    /// Directory holding the input files and receiving the outputs. Defaults
    /// to the directory of the executable.
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `stock_sync=trace`.
    #[arg(long, default_value = "info")]
    log_level: String,
}
