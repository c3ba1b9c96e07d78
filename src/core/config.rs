//! Segment configuration.
//!
//! All tuning lives here and is threaded explicitly into the pipeline; there
//! is no ambient process-wide lookup. Validation runs once, up front, in
//! `Segment::new`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentError};

/// Execution tier for reading collection.
///
/// - `Scalar`: strictly sequential (default, works everywhere)
/// - `Parallel`: fork-join over units via rayon (requires the `parallel`
///   feature; degrades to scalar without it)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExecutionTier {
    #[default]
    Scalar,
    Parallel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentConfig {
    /// Standard deviation of the Gaussian jitter added to each spiral
    /// coordinate at spawn time.
    pub position_jitter: f64,

    /// Hidden layer count of the relabeling network.
    pub classifier_depth: usize,
    /// Training passes over the batch before inference.
    pub classifier_passes: usize,
    /// Gradient step size for relabeler training.
    pub classifier_rate: f32,

    /// Length of each unit's spectrum vector.
    pub spectrum_len: usize,

    pub tier: ExecutionTier,

    /// If set, makes spawning, collection, and relabeling reproducible.
    pub seed: Option<u64>,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            position_jitter: 0.05,
            classifier_depth: 2,
            classifier_passes: 5,
            classifier_rate: 0.01,
            spectrum_len: 3,
            tier: ExecutionTier::Scalar,
            seed: None,
        }
    }
}

impl SegmentConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.position_jitter = jitter;
        self
    }

    pub fn with_classifier_depth(mut self, depth: usize) -> Self {
        self.classifier_depth = depth;
        self
    }

    pub fn with_tier(mut self, tier: ExecutionTier) -> Self {
        self.tier = tier;
        self
    }

    /// Reject malformed values before any batch work begins.
    pub fn validate(&self) -> Result<()> {
        if !self.position_jitter.is_finite() || self.position_jitter < 0.0 {
            return Err(SegmentError::InvalidJitter(self.position_jitter));
        }
        if self.classifier_depth == 0 {
            return Err(SegmentError::InvalidClassifierDepth(self.classifier_depth));
        }
        if self.classifier_passes == 0 {
            return Err(SegmentError::InvalidClassifierPasses(
                self.classifier_passes,
            ));
        }
        if !self.classifier_rate.is_finite() || self.classifier_rate <= 0.0 {
            return Err(SegmentError::InvalidClassifierRate(self.classifier_rate));
        }
        if self.spectrum_len == 0 {
            return Err(SegmentError::InvalidSpectrumLen(self.spectrum_len));
        }
        Ok(())
    }
}
