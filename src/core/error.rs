//! Error types for segment construction and collapse.
//!
//! Malformed configuration is rejected before any batch work begins; a
//! failed unit invocation is fatal to its batch. Everything else in the
//! pipeline degrades locally and never surfaces here.

use thiserror::Error;

/// Result type for segment operations.
pub type Result<T> = core::result::Result<T, SegmentError>;

#[derive(Debug, Error)]
pub enum SegmentError {
    /// Jitter is a standard deviation; it must be finite and non-negative.
    #[error("position jitter must be finite and non-negative, got {0}")]
    InvalidJitter(f64),

    #[error("classifier depth must be at least 1, got {0}")]
    InvalidClassifierDepth(usize),

    #[error("classifier passes must be at least 1, got {0}")]
    InvalidClassifierPasses(usize),

    #[error("classifier rate must be finite and positive, got {0}")]
    InvalidClassifierRate(f32),

    #[error("unit spectrum length must be at least 1, got {0}")]
    InvalidSpectrumLen(usize),

    /// A unit that produces no reading aborts the whole batch. Dropping the
    /// reading instead would shift the reverse-order seal for every unit
    /// after it.
    #[error("unit at depth {depth} produced no reading: {reason}")]
    UnitFailed { depth: u64, reason: &'static str },
}
