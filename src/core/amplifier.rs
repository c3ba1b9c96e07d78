//! Deterministic qualia amplification.
//!
//! The last mutation a reading sees before seal composition. Total and
//! pure: no randomness, no failure modes.

use crate::unit::{Reading, LABEL_SURGE};

/// Gain applied to a reading's qualia: 1.5 ± 0.5 depending on where the
/// qualia sits on the sine.
pub fn gain(qualia: f64) -> f64 {
    1.5 + 0.5 * qualia.sin()
}

/// Label override is strictly greater-than: a reading that lands exactly on
/// 1.0 keeps its label.
fn crosses_threshold(amplified: f64) -> bool {
    amplified > 1.0
}

/// Rescale every reading's qualia, overriding the label where the
/// amplified value crosses 1.0.
pub fn amplify(readings: &mut [Reading]) {
    for reading in readings {
        let amplified = reading.qualia * gain(reading.qualia);
        reading.amplified_qualia = Some(amplified);
        if crosses_threshold(amplified) {
            reading.label = LABEL_SURGE.to_string();
        }
    }
}
