//! Timestamp normalization for instrument exports.
//!
//! Both dialects carry timestamps as locale-formatted text; the output
//! contract wants them as `MM/DD/YYYY hh:mm:ss AM/PM` text. Parsing tries a
//! fixed list of formats in order: the US month-first forms the Oxymax
//! software writes, ISO, then the dotted day-first forms the TSE apparatus
//! emits. There is no fallback parser; unrecognized text is fatal.

use chrono::NaiveDateTime;

use crate::error::{ClamsError, Result};

/// Output timestamp format expected by the visualization utility.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Recognized input formats, tried in order.
const CANDIDATE_FORMATS: [&str; 8] = [
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Parse a raw timestamp and reformat it to the output convention.
pub fn normalize_timestamp(raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    for format in CANDIDATE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.format(OUTPUT_TIMESTAMP_FORMAT).to_string());
        }
    }

    Err(ClamsError::TimestampParse {
        value: trimmed.to_string(),
    })
}
