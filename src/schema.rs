//! Output schema and dialect field mappings.
//!
//! Defines the fixed column set every parser must produce, and the
//! table-driven mappings from instrument field positions to output columns
//! for both dialects. Parsers never index source fields directly; the
//! mapping tables here are the single place the instrument layouts live.

use polars::prelude::*;

/// Column name constants shared across parsers
pub const SUBJECT_COLUMN: &str = "Subject";
pub const INTERVAL_COLUMN: &str = "Interval";
pub const DATETIME_COLUMN: &str = "Date/Time";
pub const LIGHT_DARK_COLUMN: &str = "Light/Dark";
pub const EVENT_LOG_COLUMN: &str = "Event Log";
pub const FEED_WEIGHT_COLUMN: &str = "Feed Weight 1";
pub const FEED_ACC_COLUMN: &str = "Feed Acc. 1";
pub const DRINK_WEIGHT_COLUMN: &str = "Drink Weight 1";
pub const DRINK_ACC_COLUMN: &str = "Drink Acc. 1";

/// The output columns, in order. Every table appended to the output
/// dataset has exactly this column set.
pub const OUTPUT_COLUMNS: [&str; 27] = [
    SUBJECT_COLUMN,
    INTERVAL_COLUMN,
    DATETIME_COLUMN,
    LIGHT_DARK_COLUMN,
    "Volume O2",
    "O2 In",
    "O2 Out",
    "Delta O2",
    "Accumulated O2",
    "Volume CO2",
    "CO2 In",
    "CO2 Out",
    "Delta CO2",
    "Accumulated CO2",
    "RER",
    "Heat",
    "Flow",
    FEED_WEIGHT_COLUMN,
    FEED_ACC_COLUMN,
    DRINK_WEIGHT_COLUMN,
    DRINK_ACC_COLUMN,
    "X Total",
    "X Ambulatory",
    "Y Total",
    "Y Ambulatory",
    "Z Total",
    EVENT_LOG_COLUMN,
];

/// The numeric measurement channels (everything between Light/Dark and
/// Event Log).
pub fn measurement_columns() -> &'static [&'static str] {
    &OUTPUT_COLUMNS[4..26]
}

/// Classic dialect: source field position -> output column, listed in
/// output order. Subject and Event Log are synthesized by the parser and
/// carry no source position. The Light/Dark phase sits in field 31 of the
/// instrument layout but at position 3 of the output.
pub const CLASSIC_FIELD_MAP: [(usize, &str); 25] = [
    (0, INTERVAL_COLUMN),
    (2, DATETIME_COLUMN),
    (31, LIGHT_DARK_COLUMN),
    (3, "Volume O2"),
    (4, "O2 In"),
    (5, "O2 Out"),
    (6, "Delta O2"),
    (7, "Accumulated O2"),
    (8, "Volume CO2"),
    (9, "CO2 In"),
    (10, "CO2 Out"),
    (11, "Delta CO2"),
    (12, "Accumulated CO2"),
    (13, "RER"),
    (14, "Heat"),
    (15, "Flow"),
    (17, FEED_WEIGHT_COLUMN),
    (18, FEED_ACC_COLUMN),
    (19, DRINK_WEIGHT_COLUMN),
    (20, DRINK_ACC_COLUMN),
    (21, "X Total"),
    (22, "X Ambulatory"),
    (23, "Y Total"),
    (24, "Y Ambulatory"),
    (25, "Z Total"),
];

/// TSE dialect: source column position -> output column, listed in output
/// order. Interval and Event Log are synthesized by the parser. Date/Time
/// maps from position 0, which the parser has already replaced with the
/// concatenation of the separate date and time columns. Feed Weight 1 and
/// Drink Weight 1 are provisionally projected from the accumulated
/// positions (44 / 43) and recomputed as successive differences.
pub const TSE_FIELD_MAP: [(usize, &str); 25] = [
    (2, SUBJECT_COLUMN),
    (0, DATETIME_COLUMN),
    (6, LIGHT_DARK_COLUMN),
    (16, "Volume O2"),
    (8, "O2 In"),
    (12, "O2 Out"),
    (14, "Delta O2"),
    (18, "Accumulated O2"),
    (19, "Volume CO2"),
    (9, "CO2 In"),
    (13, "CO2 Out"),
    (15, "Delta CO2"),
    (21, "Accumulated CO2"),
    (22, "RER"),
    (23, "Heat"),
    (10, "Flow"),
    (44, FEED_WEIGHT_COLUMN),
    (44, FEED_ACC_COLUMN),
    (43, DRINK_WEIGHT_COLUMN),
    (43, DRINK_ACC_COLUMN),
    (27, "X Total"),
    (28, "X Ambulatory"),
    (30, "Y Total"),
    (31, "Y Ambulatory"),
    (33, "Z Total"),
];

/// Polars dtype of one output column.
pub fn column_dtype(name: &str) -> DataType {
    match name {
        INTERVAL_COLUMN => DataType::Int64,
        SUBJECT_COLUMN | DATETIME_COLUMN | LIGHT_DARK_COLUMN | EVENT_LOG_COLUMN => DataType::Utf8,
        _ => DataType::Float64,
    }
}

/// The full output schema.
pub fn output_schema() -> Schema {
    Schema::from_iter(
        OUTPUT_COLUMNS
            .iter()
            .map(|name| Field::new(name, column_dtype(name))),
    )
}

/// A zero-row dataframe conforming to the output schema, used when every
/// input file was rejected.
pub fn empty_dataset() -> PolarsResult<DataFrame> {
    let columns: Vec<Series> = OUTPUT_COLUMNS
        .iter()
        .map(|name| Series::new_empty(name, &column_dtype(name)))
        .collect();
    DataFrame::new(columns)
}
