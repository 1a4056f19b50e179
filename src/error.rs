//! Typed errors raised while loading and querying a segment table

use thiserror::Error;

/// Failures surfaced by the segmentation library.
///
/// Load-time variants are fatal for the binary; `SegmentNotFound` and
/// `InvalidInput` are turned into user-facing notices.
#[derive(Debug, Error, PartialEq)]
pub enum SegmentError {
    #[error("required column '{0}' is missing from the table")]
    MissingColumn(String),
    #[error("none of the identifier columns {0:?} are present in the table")]
    NoIdColumn(Vec<String>),
    #[error("invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
    #[error("negative value {value} in column '{column}' at row {row}")]
    NegativeValue {
        column: String,
        row: usize,
        value: f64,
    },
    #[error("the segment table contains no rows")]
    EmptyDataset,
    #[error("no customers found in segment '{0}'")]
    SegmentNotFound(String),
    #[error("'{0}' is not a valid customer identifier")]
    InvalidInput(String),
}
