//! Main processing engine.
//!
//! Orchestrates the complete conversion workflow: input discovery, dialect
//! dispatch, aggregation of per-file tables, and output writing. Files are
//! processed strictly one at a time — each file's table is appended to the
//! output dataset before the next file begins — so output row order follows
//! the lexical file order exactly.

pub mod classic;
pub mod discovery;
pub mod tse;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::writer::OutputWriter;

use crate::config::ClamsConfig;
use crate::error::{ClamsError, Result};
use crate::models::{Dialect, ProcessingStats};
use crate::schema;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tokio::task;
use tracing::warn;

/// Main processor for CLAMS export conversion
#[derive(Debug)]
pub struct DatasetProcessor {
    input_dir: PathBuf,
    output_dir: PathBuf,
    config: ClamsConfig,
}

impl DatasetProcessor {
    /// Create a new dataset processor
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            config: ClamsConfig::default(),
        }
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ClamsConfig) -> Self {
        self.config = config;
        self
    }

    /// Main processing entry point
    pub async fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        println!(
            "{}",
            "Starting CLAMS export processing".bright_green().bold()
        );
        println!(
            "  {} {}",
            "Input:".bright_cyan(),
            self.input_dir.display()
        );
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.output_dir.display()
        );
        println!("  {} {}", "Dialect:".bright_cyan(), self.config.dialect);

        // Step 1: Discover candidate files (fatal when there are none)
        let files = discovery::discover_csv_files(&self.input_dir)?;
        println!(
            "  {} {} candidate files",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold()
        );

        // Step 2: Parse every file with the selected dialect, one at a time
        let (frames, files_processed, files_skipped) = match self.config.dialect {
            Dialect::Classic => self.process_classic(&files).await?,
            Dialect::Tse => self.process_tse(&files).await?,
        };

        // Step 3: Concatenate in append order
        let mut dataset = aggregate(frames)?;

        // Step 4: Write the date-stamped result file
        let output_writer = OutputWriter::new(self.output_dir.clone(), &self.config);
        let output_path = output_writer.write(&mut dataset)?;

        let total_time = start_time.elapsed().as_millis();
        println!("\n{}", "Processing Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            total_time.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Files processed:".bright_cyan(),
            files_processed.to_string().bright_white()
        );
        if files_skipped > 0 {
            println!(
                "  {} {}",
                "Files skipped:".bright_yellow(),
                files_skipped.to_string().bright_yellow().bold()
            );
        }
        println!(
            "  {} {}",
            "Total rows:".bright_cyan(),
            dataset.height().to_string().bright_white().bold()
        );
        println!(
            "  {} {}",
            "Results saved to:".bright_cyan(),
            output_path.display()
        );

        Ok(ProcessingStats {
            files_processed,
            files_skipped,
            total_rows: dataset.height(),
            output_path,
            processing_time_ms: total_time,
        })
    }

    /// Process classic exports: one table per animal file, parameter files
    /// skipped with a notice.
    async fn process_classic(
        &self,
        files: &[PathBuf],
    ) -> Result<(Vec<LazyFrame>, usize, usize)> {
        let pb = if self.config.show_progress {
            ProgressBar::new(files.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut frames = Vec::new();
        let mut files_processed = 0usize;
        let mut files_skipped = 0usize;

        for file_path in files {
            if let Some(file_name) = file_path.file_name() {
                pb.set_message(format!("Processing: {}", file_name.to_string_lossy()));
            }

            let path = file_path.clone();
            let parsed = task::spawn_blocking(move || classic::parse_classic_file(&path))
                .await
                .map_err(|e| ClamsError::ProcessingFailed {
                    path: file_path.clone(),
                    reason: format!("parser task failed: {e}"),
                })??;
            pb.inc(1);

            match parsed {
                Some(df) => {
                    frames.push(df.lazy());
                    files_processed += 1;
                }
                None => files_skipped += 1,
            }
        }

        pb.finish_with_message("All CSV files processed");
        Ok((frames, files_processed, files_skipped))
    }

    /// Process a TSE export: exactly one file carries every subject.
    async fn process_tse(&self, files: &[PathBuf]) -> Result<(Vec<LazyFrame>, usize, usize)> {
        if files.len() > 1 {
            return Err(ClamsError::TooManyInputFiles { count: files.len() });
        }

        let file_path = files[0].clone();
        let path = file_path.clone();
        let df = task::spawn_blocking(move || tse::parse_tse_file(&path))
            .await
            .map_err(|e| ClamsError::ProcessingFailed {
                path: file_path,
                reason: format!("parser task failed: {e}"),
            })??;

        Ok((vec![df.lazy()], 1, 0))
    }
}

/// Concatenate per-file tables in append order; zero tables yield an empty
/// schema-conformant dataset.
fn aggregate(frames: Vec<LazyFrame>) -> Result<DataFrame> {
    if frames.is_empty() {
        warn!("No animal data files were processed; writing an empty result");
        return Ok(schema::empty_dataset()?);
    }

    Ok(concat(frames, UnionArgs::default())?.collect()?)
}
