//! Core data structures and types for CLAMS export processing.
//!
//! Defines the dialect selector, the anchor-set value produced by marker
//! scanning, and processing statistics.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{CLASSIC_DATA_OFFSET, CLASSIC_EVENTS_OFFSET};

/// Instrument export dialects supported by the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Columbus Instruments Oxymax/CLAMS export, one file per subject
    Classic,
    /// TSE PhenoMaster wide export, one file for all subjects
    Tse,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Classic => write!(f, "classic"),
            Dialect::Tse => write!(f, "tse"),
        }
    }
}

/// Marker line positions found in one classic export.
///
/// Indices refer to the blank-line-stripped document. When a marker occurs
/// more than once the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassicMarkers {
    /// Whether the animal-data file-type marker occurred anywhere.
    pub is_animal_export: bool,
    /// Line carrying the subject identifier.
    pub subject_line: Option<usize>,
    /// `:DATA` marker line; data rows start at a fixed offset below it.
    pub data_marker: Option<usize>,
    /// `:EVENTS` marker line; also bounds the data region from above.
    pub events_marker: Option<usize>,
}

impl ClassicMarkers {
    /// Half-open line range of the data region, or None when the region
    /// cannot be located or is empty.
    ///
    /// The region ends one line before the `:EVENTS` marker; without an
    /// events marker it runs to the end of the document.
    pub fn data_region(&self, total_lines: usize) -> Option<(usize, usize)> {
        let start = self.data_marker? + CLASSIC_DATA_OFFSET;
        let end = match self.events_marker {
            Some(events) => events.saturating_sub(1),
            None => total_lines,
        };
        let end = end.min(total_lines);
        (start < end).then_some((start, end))
    }

    /// Half-open line range of the events region, or None when the export
    /// has no events marker or no rows after the offset.
    pub fn events_region(&self, total_lines: usize) -> Option<(usize, usize)> {
        let start = self.events_marker? + CLASSIC_EVENTS_OFFSET;
        (start < total_lines).then_some((start, total_lines))
    }
}

/// Processing statistics for one run
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub total_rows: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}
