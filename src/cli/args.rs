//! Command-line argument definitions for the CLAMS processor
//!
//! Defines the CLI interface using the clap derive API.

use clap::Parser;
use std::path::PathBuf;

use crate::error::{ClamsError, Result};
use crate::models::Dialect;

/// CLI arguments for the CLAMS export processor
///
/// Concatenates metabolic cage CSV exports into one normalized file for
/// analysis by clams-vis.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "clams-processor",
    version,
    about = "Concatenate CSV files from CLAMS to one file for analysis by clams-vis"
)]
pub struct Args {
    /// Path to the directory holding the input files
    ///
    /// All files with a case-insensitive .csv extension in this directory
    /// are candidate inputs. Defaults to the current working directory.
    #[arg(short = 'i', long = "input", value_name = "PATH", help = "Path to input files")]
    pub input_path: Option<PathBuf>,

    /// Path where the output will be stored
    ///
    /// The result file is named <today's date>_result_all.csv. Defaults to
    /// the current working directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Path where the output will be stored"
    )]
    pub output_path: Option<PathBuf>,

    /// Format of the data
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = Dialect::Classic,
        help = "Format of the data"
    )]
    pub format: Dialect,

    /// Fixed number of decimal digits for numeric output columns
    #[arg(
        long = "float-precision",
        value_name = "DIGITS",
        help = "Fixed number of decimal digits for numeric output columns"
    )]
    pub float_precision: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(input_path) = &self.input_path {
            if !input_path.exists() {
                return Err(ClamsError::Configuration {
                    message: format!("Input path does not exist: {}", input_path.display()),
                });
            }

            if !input_path.is_dir() {
                return Err(ClamsError::Configuration {
                    message: format!("Input path is not a directory: {}", input_path.display()),
                });
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
