//! Error types for the SMO trainer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SVMError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Invalid label at sample {index}: expected -1 or +1, got {value}")]
    InvalidLabel { index: usize, value: f64 },

    #[error("Dimension mismatch at sample {index}: expected {expected} features, got {actual}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("At least 2 samples are required, got {0}")]
    InsufficientSamples(usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, SVMError>;
