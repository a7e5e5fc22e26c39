//! Error types for the prediction service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Invalid goal count '{value}' in column '{column}' at line {line}")]
    InvalidGoals {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Row at line {line} has {found} fields, header has {expected}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, PredictError>;
