//! Marker line scanning for raw instrument exports.
//!
//! Instrument exports are semi-structured: metadata, a variable-offset
//! header, a data region, and an events region are concatenated in one file
//! with only marker lines separating them. This module locates those
//! markers and returns their positions as plain values; region offsets are
//! applied by `ClassicMarkers` and the dialect parsers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::constants::{
    CLASSIC_DATA_PATTERN, CLASSIC_EVENTS_PATTERN, CLASSIC_FILE_TYPE_PATTERN,
    CLASSIC_SUBJECT_PATTERN, TSE_HEADER_PATTERN,
};
use crate::error::Result;
use crate::models::ClassicMarkers;

static CLASSIC_FILE_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(CLASSIC_FILE_TYPE_PATTERN).expect("valid file-type pattern"));
static CLASSIC_SUBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(CLASSIC_SUBJECT_PATTERN).expect("valid subject pattern"));
static CLASSIC_DATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(CLASSIC_DATA_PATTERN).expect("valid data pattern"));
static CLASSIC_EVENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(CLASSIC_EVENTS_PATTERN).expect("valid events pattern"));
static TSE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(TSE_HEADER_PATTERN).expect("valid tse header pattern"));

/// Read one export into its non-empty lines, order preserved.
///
/// Marker offsets count lines of this stripped representation, so blank
/// lines must be dropped before any scanning happens.
pub fn read_document(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.is_empty() {
            lines.push(line);
        }
    }

    debug!("Read {} non-empty lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Scan a classic export for its marker lines.
///
/// One pass over the document; when a marker matches more than once the
/// last occurrence wins.
pub fn scan_classic(lines: &[String]) -> ClassicMarkers {
    let mut markers = ClassicMarkers::default();

    for (i, line) in lines.iter().enumerate() {
        if CLASSIC_FILE_TYPE.is_match(line) {
            markers.is_animal_export = true;
        }
        if CLASSIC_SUBJECT.is_match(line) {
            markers.subject_line = Some(i);
        }
        if CLASSIC_DATA.is_match(line) {
            markers.data_marker = Some(i);
        }
        if CLASSIC_EVENTS.is_match(line) {
            markers.events_marker = Some(i);
        }
    }

    markers
}

/// Scan a TSE export for its column header marker line.
pub fn scan_tse(lines: &[String]) -> Option<usize> {
    let mut marker = None;
    for (i, line) in lines.iter().enumerate() {
        if TSE_HEADER.is_match(line) {
            marker = Some(i);
        }
    }
    marker
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn to_lines(text: &str) -> Vec<String> {
        text.lines().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_scan_classic_finds_all_markers() {
        let lines = to_lines(
            "Oxymax CSV File v3.1\n\
             Experiment Start,8/30/2021\n\
             Subject ID,M1\n\
             :DATA\n\
             header\n\
             :EVENTS\n\
             header",
        );

        let markers = scan_classic(&lines);
        assert!(markers.is_animal_export);
        assert_eq!(markers.subject_line, Some(2));
        assert_eq!(markers.data_marker, Some(3));
        assert_eq!(markers.events_marker, Some(5));
    }

    #[test]
    fn test_scan_classic_parameter_file() {
        let lines = to_lines("Oxymax Parameter File\nSetting,Value");

        let markers = scan_classic(&lines);
        assert!(!markers.is_animal_export);
        assert_eq!(markers.data_marker, None);
        assert_eq!(markers.events_marker, None);
    }

    #[test]
    fn test_markers_match_line_start_only() {
        // An event description mentioning a marker must not register.
        let lines = to_lines("Oxymax CSV File\nnote,about :DATA section");

        let markers = scan_classic(&lines);
        assert_eq!(markers.data_marker, None);
    }

    #[test]
    fn test_scan_tse() {
        let lines = to_lines("TSE Export\nBox,1\nDate,Time,Animal No.,Box\nrow");
        assert_eq!(scan_tse(&lines), Some(2));

        let lines = to_lines("TSE Export\nBox,1");
        assert_eq!(scan_tse(&lines), None);
    }

    #[test]
    fn test_read_document_strips_blank_lines() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Oxymax CSV File v3.1").unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, "Subject ID,M1").unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, ":DATA").unwrap();

        let lines = read_document(temp_file.path()).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Subject ID,M1");

        // Offsets count stripped lines: :DATA sits at index 2, not 4.
        let markers = scan_classic(&lines);
        assert_eq!(markers.data_marker, Some(2));
    }
}
