//! Configuration for CLAMS export processing.
//!
//! Provides the processing configuration consumed by the dataset
//! processor, with builder methods for the CLI layer.

use serde::{Deserialize, Serialize};

use crate::models::Dialect;

/// Global configuration for one processing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClamsConfig {
    /// Instrument dialect of the input files
    pub dialect: Dialect,

    /// Fixed number of decimal digits for numeric output columns
    /// (None = shortest round-trip representation)
    pub float_precision: Option<usize>,

    /// Show per-file progress while processing
    pub show_progress: bool,
}

impl Default for ClamsConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Classic,
            float_precision: None,
            show_progress: true,
        }
    }
}

impl ClamsConfig {
    /// Set the input dialect
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set a fixed float precision for the output writer
    pub fn with_float_precision(mut self, precision: Option<usize>) -> Self {
        self.float_precision = precision;
        self
    }

    /// Disable per-file progress reporting
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }
}
