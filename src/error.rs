//src/error.rs

use thiserror::Error;

/// Everything that can go wrong between receiving a response and writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("response contains no sequences")]
    EmptyResponse,

    #[error("sequence {sequence_id}: {field} = {value} is outside [0, 1]")]
    OutOfRange {
        sequence_id: String,
        field: &'static str,
        value: f64,
    },

    #[error("sequence {sequence_id}: {field} is not a finite number")]
    NonFinite {
        sequence_id: String,
        field: &'static str,
    },

    #[error("{field} is {declared} but the detailed results give {actual}")]
    CountMismatch {
        field: &'static str,
        declared: usize,
        actual: usize,
    },

    #[error("duplicate sequence id {0}")]
    DuplicateSequenceId(String),

    #[error("sequence at position {index} has an empty id")]
    EmptySequenceId { index: usize },

    #[error("processing time {0} is negative or not finite")]
    InvalidProcessingTime(f64),

    #[error("add at least one sequence in FASTA format to run")]
    NoSequences,

    #[error("classification service failed: {0}")]
    Service(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
