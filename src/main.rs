//! Velocity Limits CLI
//!
//! Command-line interface for deciding fund-load requests from a
//! line-delimited JSON file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- input.txt > output.txt
//! cargo run -- --strategy sync input.txt -o output.txt
//! cargo run -- --config velocity.toml --strategy async --channel-capacity 64 input.txt
//! cargo run -- --max-daily-amount 1000 --max-daily-count 5 input.txt
//! ```
//!
//! The program reads one load request per line, decides each one against the
//! configured velocity limits, and writes one decision per line, in input
//! order, to stdout or to the output file.
//!
//! # Processing Strategies
//!
//! - **sync**: Single-threaded read, decide, write loop
//! - **async**: Three-stage tokio pipeline over bounded channels (default)
//!
//! # Logging
//!
//! Diagnostics go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=debug`) to see
//! per-request rejections.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing input, file not found, malformed line, invalid config, etc.)

use std::io;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;
use velocity_limits::cli::{self, RunSettings};
use velocity_limits::io::open_output;
use velocity_limits::strategy;
use velocity_limits::types::VelocityError;

fn main() {
    init_tracing();

    let args = cli::parse_args();
    if let Err(e) = args.resolve().and_then(|settings| run(&settings)) {
        error!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(settings: &RunSettings) -> Result<(), VelocityError> {
    let strategy = strategy::create_strategy(
        settings.strategy.clone(),
        settings.limits.clone(),
        Some(settings.pipeline.clone()),
    );

    let mut output = open_output(&settings.input_file, settings.output_file.as_deref())?;

    strategy.process(&settings.input_file, &mut *output)?;
    Ok(())
}
