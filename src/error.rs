//! Error types for the wearable physics calculators.
//!
//! This module provides a unified error type [`SimError`] that covers
//! all error conditions that can occur during configuration, parameter
//! evaluation, grid relaxation, and report output.

use thiserror::Error;

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Unified error type for all calculator operations.
#[derive(Error, Debug)]
pub enum SimError {
    // ============ Parameter Errors ============
    /// A physical parameter is outside its valid domain
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// A numeric value could not be parsed
    #[error("Cannot parse value '{text}' (expected a number with optional SI suffix)")]
    InvalidValue { text: String },

    /// Invalid run configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ============ Grid Errors ============
    /// A source or sink lies outside the grid
    #[error("Grid index out of bounds: row={row}, col={col} (grid is {size}x{size})")]
    GridOutOfBounds { row: usize, col: usize, size: usize },

    /// A relaxation step produced a non-finite voltage
    #[error("Numerical overflow detected at cell ({row}, {col}) (value: {value:.2e})")]
    NumericalOverflow { row: usize, col: usize, value: f64 },

    // ============ Selection Errors ============
    /// Unknown simulation name
    #[error("Unknown simulation '{name}' (run with --list to see available simulations)")]
    UnknownSimulation { name: String },

    // ============ I/O Errors ============
    /// Error reading a configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error decoding a configuration file or encoding a report
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing report output
    #[error("Report output error: {message}")]
    Output { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl SimError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }
}

/// Reject zero, negative and non-finite values for a named parameter.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid_parameter(
            name,
            format!("must be positive and finite, got {value}"),
        ))
    }
}
