//! Error handling for CLAMS export processing.
//!
//! Provides error types with context for file discovery, marker scanning,
//! dialect parsing, and output writing failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClamsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("No CSV files to process in directory: {path}")]
    NoInputFiles { path: PathBuf },

    #[error("TSE format expects exactly one export file, found {count}")]
    TooManyInputFiles { count: usize },

    #[error("No column header marker found in file: {path}")]
    NoHeaderMarker { path: PathBuf },

    #[error("Invalid export format in file: {path} - {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("Unrecognized timestamp: {value}")]
    TimestampParse { value: String },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, ClamsError>;
