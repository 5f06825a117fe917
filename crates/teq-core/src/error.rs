//! Error types for the EQ engine

use thiserror::Error;

/// Core error type
///
/// All variants are configuration-time errors. The audio path itself is
/// infallible: validation happens when parameters enter the system or when
/// the processor is prepared, never per sample.
#[derive(Error, Debug)]
pub enum EqError {
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    #[error("Invalid slope index: {0} (expected 0..=3)")]
    InvalidSlope(usize),

    #[error("Invalid parameter: {0}")]
    InvalidParam(String),
}

/// Result type alias
pub type EqResult<T> = Result<T, EqError>;
