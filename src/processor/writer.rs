//! Output writing for the aggregated dataset.
//!
//! Serializes the aggregated table as delimited text with a header row of
//! schema column names, no row index column, into a date-stamped file in
//! the output directory.

use chrono::Local;
use polars::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use tracing::debug;

use crate::config::ClamsConfig;
use crate::constants::result_filename;
use crate::error::Result;

/// CSV writer for the aggregated output dataset
#[derive(Debug)]
pub struct OutputWriter {
    output_dir: PathBuf,
    float_precision: Option<usize>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(output_dir: PathBuf, config: &ClamsConfig) -> Self {
        Self {
            output_dir,
            float_precision: config.float_precision,
        }
    }

    /// Write the aggregated dataset, returning the path written.
    ///
    /// The filename is stamped with today's date; rerunning on the same
    /// day overwrites the previous result.
    pub fn write(&self, dataset: &mut DataFrame) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self
            .output_dir
            .join(result_filename(Local::now().date_naive()));
        debug!("Writing {} rows to {}", dataset.height(), path.display());

        let mut file = File::create(&path)?;
        CsvWriter::new(&mut file)
            .with_float_precision(self.float_precision)
            .finish(dataset)?;

        Ok(path)
    }
}
