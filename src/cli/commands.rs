//! Command execution for the CLAMS processor CLI.
//!
//! Wires argument validation, logging setup, and configuration into the
//! dataset processor.

use std::env;
use tracing::{debug, info};

use crate::cli::args::Args;
use crate::config::ClamsConfig;
use crate::error::Result;
use crate::models::ProcessingStats;
use crate::processor::DatasetProcessor;

/// Run the processor with the given CLI arguments
pub async fn run(args: Args) -> Result<ProcessingStats> {
    setup_logging(&args);

    info!("Starting CLAMS processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    // Both paths default to the current working directory.
    let working_dir = env::current_dir()?;
    let input_dir = args.input_path.clone().unwrap_or_else(|| working_dir.clone());
    let output_dir = args.output_path.clone().unwrap_or(working_dir);

    let mut config = ClamsConfig::default()
        .with_dialect(args.format)
        .with_float_precision(args.float_precision);
    if !args.show_progress() {
        config = config.without_progress();
    }

    let processor = DatasetProcessor::new(input_dir, output_dir).with_config(config);
    processor.process().await
}

/// Initialize tracing with a level derived from the verbosity flags;
/// RUST_LOG takes precedence when set.
fn setup_logging(args: &Args) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.get_log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
