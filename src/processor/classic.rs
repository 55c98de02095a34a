//! Classic (Oxymax/CLAMS) dialect parsing.
//!
//! One export per subject: metadata lines, a data region at a fixed offset
//! below the `:DATA` marker, and an optional events region below the
//! `:EVENTS` marker. The parser carves both regions out, projects the data
//! region onto the output schema through `schema::CLASSIC_FIELD_MAP`, and
//! merges event descriptions back in keyed by Interval value.

use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::constants::{
    CLASSIC_DARK_CODE, CLASSIC_LIGHT_CODE, CLASSIC_MIN_FIELDS, CLASSIC_SUBJECT_FIELD,
    DARK_PHASE, EVENT_DESCRIPTION_FIELD, EVENT_INTERVAL_FIELD, FIELD_DELIMITER, LIGHT_PHASE,
};
use crate::error::{ClamsError, Result};
use crate::markers::{read_document, scan_classic};
use crate::models::ClassicMarkers;
use crate::schema::{
    measurement_columns, CLASSIC_FIELD_MAP, DATETIME_COLUMN, EVENT_LOG_COLUMN, INTERVAL_COLUMN,
    LIGHT_DARK_COLUMN, SUBJECT_COLUMN,
};
use crate::timestamp::normalize_timestamp;

/// Parse one classic export into a schema-conformant table.
///
/// Returns `Ok(None)` when the file is not an animal data export (for
/// example a parameter file); the run continues with the remaining files.
/// Structural faults inside an animal file are errors.
pub fn parse_classic_file(path: &Path) -> Result<Option<DataFrame>> {
    let lines = read_document(path)?;
    let markers = scan_classic(&lines);

    if !markers.is_animal_export {
        warn!("Skipping {} - not an animal data file", path.display());
        return Ok(None);
    }
    info!("Processing: {}", path.display());

    let subject_id = extract_subject_id(path, &lines, &markers)?;

    if markers.data_marker.is_none() {
        return Err(invalid(path, "no :DATA section marker"));
    }
    let (data_start, data_end) = markers
        .data_region(lines.len())
        .ok_or_else(|| invalid(path, "data region is empty"))?;

    let rows: Vec<Vec<&str>> = lines[data_start..data_end]
        .iter()
        .map(|line| line.split(FIELD_DELIMITER).collect())
        .collect();

    let events = match markers.events_region(lines.len()) {
        Some((events_start, events_end)) => {
            parse_events(path, &lines[events_start..events_end])?
        }
        None => HashMap::new(),
    };

    let df = build_subject_table(path, &subject_id, &rows, &events)?;
    debug!(
        "Parsed {}: subject {}, {} rows, {} events",
        path.display(),
        subject_id,
        df.height(),
        events.len()
    );

    Ok(Some(df))
}

/// The subject identifier is the second field of the `Subject ID` line.
fn extract_subject_id(path: &Path, lines: &[String], markers: &ClassicMarkers) -> Result<String> {
    let line_idx = markers
        .subject_line
        .ok_or_else(|| invalid(path, "no Subject ID line"))?;

    let field = lines[line_idx]
        .split(FIELD_DELIMITER)
        .nth(CLASSIC_SUBJECT_FIELD)
        .ok_or_else(|| invalid(path, "Subject ID line has no identifier field"))?;

    Ok(field.trim().to_string())
}

/// Build the sparse Interval -> description mapping from the events region.
///
/// A non-numeric interval value is fatal: event annotations are keyed by
/// interval and an unkeyable row cannot be merged.
fn parse_events(path: &Path, rows: &[String]) -> Result<HashMap<i64, String>> {
    let mut events = HashMap::new();

    for line in rows {
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();

        let interval_text = fields
            .get(EVENT_INTERVAL_FIELD)
            .map(|f| f.trim())
            .unwrap_or_default();
        let interval: i64 = interval_text.parse().map_err(|_| {
            invalid(
                path,
                &format!("non-numeric interval '{interval_text}' in events region"),
            )
        })?;

        let description = fields.get(EVENT_DESCRIPTION_FIELD).ok_or_else(|| {
            invalid(
                path,
                &format!("event row for interval {interval} has no description field"),
            )
        })?;

        events.insert(interval, (*description).to_string());
    }

    Ok(events)
}

/// Project the data region onto the output schema and merge events in.
fn build_subject_table(
    path: &Path,
    subject_id: &str,
    rows: &[Vec<&str>],
    events: &HashMap<i64, String>,
) -> Result<DataFrame> {
    let mut intervals: Vec<i64> = Vec::with_capacity(rows.len());
    let mut timestamps: Vec<String> = Vec::with_capacity(rows.len());
    let mut phases: Vec<String> = Vec::with_capacity(rows.len());
    let mut channels: Vec<Vec<Option<f64>>> = measurement_columns()
        .iter()
        .map(|_| Vec::with_capacity(rows.len()))
        .collect();

    for (row_num, fields) in rows.iter().enumerate() {
        if fields.len() < CLASSIC_MIN_FIELDS {
            return Err(invalid(
                path,
                &format!(
                    "data row {} has {} fields, expected at least {}",
                    row_num + 1,
                    fields.len(),
                    CLASSIC_MIN_FIELDS
                ),
            ));
        }

        let mut channel_idx = 0;
        for (source, target) in CLASSIC_FIELD_MAP {
            let value = fields[source].trim();
            match target {
                INTERVAL_COLUMN => {
                    let interval = value.parse().map_err(|_| {
                        invalid(path, &format!("non-numeric interval '{value}' in data region"))
                    })?;
                    intervals.push(interval);
                }
                DATETIME_COLUMN => timestamps.push(normalize_timestamp(value)?),
                LIGHT_DARK_COLUMN => phases.push(normalize_phase(value)),
                _ => {
                    channels[channel_idx].push(value.parse().ok());
                    channel_idx += 1;
                }
            }
        }
    }

    // Merge keyed by Interval value, not row position: a row picks up the
    // event registered for its own interval wherever that row sits.
    let event_log: Vec<String> = intervals
        .iter()
        .map(|interval| events.get(interval).cloned().unwrap_or_default())
        .collect();

    let mut columns: Vec<Series> = Vec::with_capacity(CLASSIC_FIELD_MAP.len() + 2);
    columns.push(Series::new(
        SUBJECT_COLUMN,
        vec![subject_id.to_string(); rows.len()],
    ));
    columns.push(Series::new(INTERVAL_COLUMN, intervals));
    columns.push(Series::new(DATETIME_COLUMN, timestamps));
    columns.push(Series::new(LIGHT_DARK_COLUMN, phases));
    for (values, name) in channels.into_iter().zip(measurement_columns()) {
        columns.push(Series::new(name, values));
    }
    columns.push(Series::new(EVENT_LOG_COLUMN, event_log));

    Ok(DataFrame::new(columns)?)
}

/// Map instrument light-phase codes to the output vocabulary; unknown
/// codes pass through untouched.
fn normalize_phase(code: &str) -> String {
    match code {
        CLASSIC_LIGHT_CODE => LIGHT_PHASE.to_string(),
        CLASSIC_DARK_CODE => DARK_PHASE.to_string(),
        other => other.to_string(),
    }
}

fn invalid(path: &Path, reason: &str) -> ClamsError {
    ClamsError::InvalidFormat {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
