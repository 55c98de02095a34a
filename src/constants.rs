//! Application constants for the CLAMS processor
//!
//! This module contains the marker patterns, region offsets, instrument
//! codes, and filename conventions used throughout the application.

// =============================================================================
// Marker Line Patterns
// =============================================================================
//
// All patterns are anchored at the start of the line; the marker line itself
// is never data.

/// Identifies a classic export as an animal data file (as opposed to a
/// parameter/configuration export, which is skipped).
pub const CLASSIC_FILE_TYPE_PATTERN: &str = "^Oxymax CSV File";

/// Line carrying the subject identifier in a classic export.
pub const CLASSIC_SUBJECT_PATTERN: &str = "^Subject ID";

/// Start of the data section header in a classic export.
pub const CLASSIC_DATA_PATTERN: &str = "^:DATA";

/// Start of the events section in a classic export.
pub const CLASSIC_EVENTS_PATTERN: &str = "^:EVENTS";

/// Column header line of a TSE PhenoMaster wide export.
pub const TSE_HEADER_PATTERN: &str = "^Date,Time";

// =============================================================================
// Region Offsets
// =============================================================================

/// First data row sits this many lines after the `:DATA` marker.
/// Might change in CLAMS system updates.
pub const CLASSIC_DATA_OFFSET: usize = 5;

/// First event row sits this many lines after the `:EVENTS` marker.
/// Might change in CLAMS system updates.
pub const CLASSIC_EVENTS_OFFSET: usize = 4;

/// First data row of a TSE export sits this many lines after the
/// `Date,Time` header marker.
pub const TSE_DATA_OFFSET: usize = 3;

// =============================================================================
// Field Layout
// =============================================================================

/// Field delimiter in both dialects.
pub const FIELD_DELIMITER: char = ',';

/// The subject identifier is the second field of the `Subject ID` line.
pub const CLASSIC_SUBJECT_FIELD: usize = 1;

/// A classic data row must reach up to the Light/Dark field at position 31.
pub const CLASSIC_MIN_FIELDS: usize = 32;

/// Interval and description positions within a classic event row.
pub const EVENT_INTERVAL_FIELD: usize = 0;
pub const EVENT_DESCRIPTION_FIELD: usize = 3;

/// Minimum column count of a TSE export; the last column is a discardable
/// housekeeping column.
pub const TSE_MIN_COLUMNS: usize = 46;

/// Zero-based position of the TSE housekeeping column.
pub const TSE_DISCARD_COLUMN: usize = 45;

/// Missing-value token in TSE exports.
pub const TSE_MISSING_VALUE: &str = "-";

// =============================================================================
// Instrument Codes
// =============================================================================

/// Classic light-phase codes, mapped in place to the output vocabulary.
pub const CLASSIC_LIGHT_CODE: &str = "ON";
pub const CLASSIC_DARK_CODE: &str = "OFF";

/// TSE delivers light phase as a numeric intensity; above this threshold a
/// row counts as "Light".
pub const TSE_LIGHT_THRESHOLD: f64 = 50.0;

/// Output vocabulary for the Light/Dark column.
pub const LIGHT_PHASE: &str = "Light";
pub const DARK_PHASE: &str = "Dark";

// =============================================================================
// Output Conventions
// =============================================================================

/// Date stamp used in the output filename.
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Get the output filename for a given run date.
pub fn result_filename(date: chrono::NaiveDate) -> String {
    format!("{}_result_all.csv", date.format(OUTPUT_DATE_FORMAT))
}
