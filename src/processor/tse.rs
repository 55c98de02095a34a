//! TSE (PhenoMaster) dialect parsing.
//!
//! One wide export holding every subject: a preamble, a `Date,Time` column
//! header marker, and the table body at a fixed offset below it. The body
//! is read as a headerless delimited table, gaps are filled by linear
//! interpolation, and the columns are projected onto the output schema
//! through `schema::TSE_FIELD_MAP`. Interval counters and incremental
//! weight deltas do not exist in this dialect and are derived here.

use polars::prelude::*;
use polars::series::ops::NullBehavior;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

use crate::constants::{
    DARK_PHASE, LIGHT_PHASE, TSE_DATA_OFFSET, TSE_DISCARD_COLUMN, TSE_LIGHT_THRESHOLD,
    TSE_MIN_COLUMNS, TSE_MISSING_VALUE,
};
use crate::error::{ClamsError, Result};
use crate::markers::{read_document, scan_tse};
use crate::schema::{
    DATETIME_COLUMN, DRINK_ACC_COLUMN, DRINK_WEIGHT_COLUMN, EVENT_LOG_COLUMN, FEED_ACC_COLUMN,
    FEED_WEIGHT_COLUMN, INTERVAL_COLUMN, LIGHT_DARK_COLUMN, OUTPUT_COLUMNS, SUBJECT_COLUMN,
    TSE_FIELD_MAP,
};
use crate::timestamp::normalize_timestamp;

/// Parse one TSE export into a schema-conformant table.
///
/// A missing column header marker is fatal: tse mode processes exactly one
/// file, so there is nothing to continue with.
pub fn parse_tse_file(path: &Path) -> Result<DataFrame> {
    let lines = read_document(path)?;
    let marker = scan_tse(&lines).ok_or_else(|| ClamsError::NoHeaderMarker {
        path: path.to_path_buf(),
    })?;
    info!("Processing: {}", path.display());

    let body_start = marker + TSE_DATA_OFFSET;
    if body_start >= lines.len() {
        return Err(invalid(path, "no data rows below the column header"));
    }
    let body = lines[body_start..].join("\n");

    let df = CsvReader::new(Cursor::new(body.into_bytes()))
        .has_header(false)
        .with_null_values(Some(NullValues::AllColumnsSingle(
            TSE_MISSING_VALUE.to_string(),
        )))
        .finish()?;

    if df.width() < TSE_MIN_COLUMNS {
        return Err(invalid(
            path,
            &format!(
                "expected at least {} columns, found {}",
                TSE_MIN_COLUMNS,
                df.width()
            ),
        ));
    }

    let df = df.drop(&source_column(TSE_DISCARD_COLUMN))?;
    let df = interpolate_gaps(df)?;
    let df = combine_timestamp(df)?;
    let df = project_columns(df)?;
    let df = assign_intervals(df)?;
    let df = finalize(df)?;

    debug!("Parsed {}: {} rows after first-interval drop", path.display(), df.height());
    Ok(df)
}

/// Polars name of a source column position in the headerless body.
fn source_column(position: usize) -> String {
    format!("column_{}", position + 1)
}

/// Fill missing cells by linear interpolation, per numeric column,
/// independently.
fn interpolate_gaps(df: DataFrame) -> Result<DataFrame> {
    let exprs: Vec<Expr> = df
        .schema()
        .iter_fields()
        .filter(|field| field.data_type().is_numeric())
        .map(|field| col(field.name().as_str()).interpolate(InterpolationMethod::Linear))
        .collect();

    if exprs.is_empty() {
        return Ok(df);
    }
    Ok(df.lazy().with_columns(exprs).collect()?)
}

/// Replace the date column with the normalized concatenation of the
/// separate date and time columns.
fn combine_timestamp(mut df: DataFrame) -> Result<DataFrame> {
    let combined: Vec<String> = {
        let dates = df.column(&source_column(0))?.cast(&DataType::Utf8)?;
        let times = df.column(&source_column(1))?.cast(&DataType::Utf8)?;

        let mut combined = Vec::with_capacity(df.height());
        for (date, time) in dates.utf8()?.into_iter().zip(times.utf8()?.into_iter()) {
            let raw = format!("{} {}", date.unwrap_or_default(), time.unwrap_or_default());
            combined.push(normalize_timestamp(&raw)?);
        }
        combined
    };

    df.replace(&source_column(0), Series::new(&source_column(0), combined))?;
    Ok(df)
}

/// Project source columns onto the output schema with output dtypes.
fn project_columns(df: DataFrame) -> Result<DataFrame> {
    let mut exprs: Vec<Expr> = Vec::with_capacity(TSE_FIELD_MAP.len());

    for (source, target) in TSE_FIELD_MAP {
        let source_col = col(&source_column(source));
        let expr = match target {
            SUBJECT_COLUMN => source_col.cast(DataType::Utf8),
            DATETIME_COLUMN => source_col,
            // Delivered as a numeric light intensity in this dialect.
            LIGHT_DARK_COLUMN => when(
                source_col
                    .cast(DataType::Float64)
                    .gt(lit(TSE_LIGHT_THRESHOLD)),
            )
            .then(lit(LIGHT_PHASE))
            .otherwise(lit(DARK_PHASE)),
            _ => source_col.cast(DataType::Float64),
        };
        exprs.push(expr.alias(target));
    }

    Ok(df.lazy().select(exprs).collect()?)
}

/// Assign a zero-based interval counter per subject, in row order.
fn assign_intervals(mut df: DataFrame) -> Result<DataFrame> {
    let counters: Vec<i64> = {
        let subjects = df.column(SUBJECT_COLUMN)?.utf8()?;
        let mut seen: HashMap<String, i64> = HashMap::new();
        let mut counters = Vec::with_capacity(df.height());

        for subject in subjects.into_iter() {
            let counter = seen.entry(subject.unwrap_or_default().to_string()).or_insert(0);
            counters.push(*counter);
            *counter += 1;
        }
        counters
    };

    df.with_column(Series::new(INTERVAL_COLUMN, counters))?;
    Ok(df)
}

/// Derive the incremental weight columns, blank the event log, drop each
/// subject's first interval, and order columns to the output schema.
///
/// Weight deltas are successive differences over the full table's row
/// order; the interval-0 rows they leave undefined are dropped afterwards.
fn finalize(df: DataFrame) -> Result<DataFrame> {
    let output: Vec<Expr> = OUTPUT_COLUMNS.iter().map(|name| col(name)).collect();

    Ok(df
        .lazy()
        .with_columns([
            col(FEED_ACC_COLUMN)
                .diff(1, NullBehavior::Ignore)
                .alias(FEED_WEIGHT_COLUMN),
            col(DRINK_ACC_COLUMN)
                .diff(1, NullBehavior::Ignore)
                .alias(DRINK_WEIGHT_COLUMN),
            lit("").alias(EVENT_LOG_COLUMN),
        ])
        .filter(col(INTERVAL_COLUMN).neq(lit(0i64)))
        .select(output)
        .collect()?)
}

fn invalid(path: &Path, reason: &str) -> ClamsError {
    ClamsError::InvalidFormat {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
