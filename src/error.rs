//! Error types for ingestion and configuration

use thiserror::Error;

/// Why a single CSV row was rejected. Recovered per row, never fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("expected at least 9 fields, found {found}")]
    TooFewFields { found: usize },

    #[error("invalid number in column `{column}`: {value:?}")]
    InvalidNumber { column: &'static str, value: String },

    #[error("invalid timestamp: {value:?}")]
    InvalidTimestamp { value: String },
}

/// Failure to produce a usable time series.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no valid orbital records inside or after the series window ({skipped} rows skipped)")]
    EmptyDataset { skipped: usize },
}

/// Invalid or unreadable playback configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
