//! Integration tests for the processor module
//!
//! Tests the complete conversion pipeline against synthetic instrument
//! exports written to temporary directories.

pub mod multi_subject;

use crate::constants::{CLASSIC_MIN_FIELDS, TSE_MIN_COLUMNS};
use std::fs;
use std::path::Path;

/// Create a classic data row with recognizable values at every mapped
/// position.
pub fn classic_data_row(interval: i64, timestamp: &str, phase: &str) -> String {
    let mut fields = vec!["x".to_string(); CLASSIC_MIN_FIELDS];
    fields[0] = interval.to_string();
    fields[2] = timestamp.to_string();
    for source in 3..=15 {
        fields[source] = format!("{interval}.{source}");
    }
    for source in 17..=25 {
        fields[source] = format!("{interval}.{source}");
    }
    fields[31] = phase.to_string();
    fields.join(",")
}

/// Assemble a classic export for one subject honoring the marker offsets:
/// data rows begin 5 lines below `:DATA`, events 4 lines below `:EVENTS`.
pub fn classic_export(subject: &str, data_rows: &[String], events: Option<&[String]>) -> String {
    let mut lines = vec![
        "Oxymax CSV File v3.1".to_string(),
        "Experiment Start,8/30/2021".to_string(),
        format!("Subject ID,{subject}"),
        "Subject Mass,23.1".to_string(),
        ":DATA".to_string(),
        "========".to_string(),
        "INTERVAL,CHAN,DATE/TIME".to_string(),
        "========".to_string(),
        "(units)".to_string(),
    ];
    lines.extend_from_slice(data_rows);

    if let Some(event_rows) = events {
        lines.push("========".to_string());
        lines.push(":EVENTS".to_string());
        lines.push("========".to_string());
        lines.push("INTERVAL,CHAN,DATE/TIME,DESCRIPTION".to_string());
        lines.push("========".to_string());
        lines.extend_from_slice(event_rows);
    }

    lines.join("\n")
}

/// Create a TSE body row with recognizable values at every mapped position.
pub fn tse_row(
    date: &str,
    time: &str,
    subject: &str,
    light: f64,
    feed_acc: f64,
    drink_acc: f64,
) -> String {
    let mut fields: Vec<String> = (0..TSE_MIN_COLUMNS)
        .map(|position| format!("{}.5", position))
        .collect();
    fields[0] = date.to_string();
    fields[1] = time.to_string();
    fields[2] = subject.to_string();
    fields[6] = light.to_string();
    fields[43] = drink_acc.to_string();
    fields[44] = feed_acc.to_string();
    fields[45] = "ok".to_string();
    fields.join(",")
}

/// Assemble a TSE export: the body begins 3 lines below the `Date,Time`
/// header marker.
pub fn tse_export(rows: &[String]) -> String {
    let mut lines = vec![
        "TSE PhenoMaster export".to_string(),
        "Box,1".to_string(),
        "Date,Time,Animal No.,Box".to_string(),
        "========".to_string(),
        "(units)".to_string(),
    ];
    lines.extend_from_slice(rows);
    lines.join("\n")
}

/// Write one export into the input directory.
pub fn write_export(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// Read the written result file back as text.
pub fn read_result(output_dir: &Path) -> String {
    let path = output_dir.join(crate::constants::result_filename(
        chrono::Local::now().date_naive(),
    ));
    fs::read_to_string(path).unwrap()
}
