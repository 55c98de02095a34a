//! Input file discovery.
//!
//! Lists the candidate export files in the input directory. Dialect
//! parsers never discover files themselves; they receive the concrete list
//! assembled here.

use glob::glob;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ClamsError, Result};

/// Discover candidate CSV files in the input directory.
///
/// Matches a case-insensitive `.csv` extension, non-recursively. The
/// result is sorted lexically so repeated runs over the same directory
/// produce identical output row order.
pub fn discover_csv_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.[Cc][Ss][Vv]", input_dir.display());
    debug!("Searching for input files with pattern: {}", pattern);

    let entries = glob(&pattern).map_err(|e| ClamsError::Configuration {
        message: format!("Invalid input path '{}': {}", input_dir.display(), e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        files.push(entry.map_err(|e| ClamsError::Io(e.into_error()))?);
    }
    files.sort();

    if files.is_empty() {
        return Err(ClamsError::NoInputFiles {
            path: input_dir.to_path_buf(),
        });
    }

    debug!("Found {} candidate files", files.len());
    Ok(files)
}
