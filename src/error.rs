// Faultgen - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for Faultgen

use thiserror::Error;

/// Main error type for generation and dataset I/O.
#[derive(Error, Debug)]
pub enum FaultgenError {
    /// Invalid generator configuration, rejected before any sampling.
    #[error("Invalid configuration for `{parameter}`: {message}")]
    Configuration {
        parameter: &'static str,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (config or manifest) error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Timestamp that cannot be parsed or represented
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Required column absent from a loaded table
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Dataset without any rows
    #[error("Empty dataset")]
    Empty,
}

impl FaultgenError {
    /// Shorthand for a configuration error.
    pub fn config(parameter: &'static str, message: impl Into<String>) -> Self {
        FaultgenError::Configuration {
            parameter,
            message: message.into(),
        }
    }
}

/// Result type alias for Faultgen operations
pub type Result<T> = std::result::Result<T, FaultgenError>;
