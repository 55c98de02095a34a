//! CLAMS Processor Library
//!
//! A Rust library for consolidating metabolic cage monitoring exports into
//! one normalized CSV file for analysis by the clams-vis utility.
//!
//! This library provides tools for:
//! - Locating marker lines inside semi-structured instrument exports
//! - Parsing Columbus Instruments Oxymax/CLAMS per-subject exports
//! - Parsing TSE PhenoMaster wide multi-subject exports
//! - Normalizing timestamps and light-phase codes to one output vocabulary
//! - Merging sparse per-interval event annotations back into the row set
//! - Writing the aggregated dataset as a date-stamped CSV file

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod markers;
pub mod models;
pub mod processor;
pub mod schema;
pub mod timestamp;

// Re-export commonly used types
pub use config::ClamsConfig;
pub use error::{ClamsError, Result};
pub use models::{ClassicMarkers, Dialect, ProcessingStats};
pub use processor::DatasetProcessor;
