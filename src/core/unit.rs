//! Units and the readings they produce.
//!
//! A unit is one independently placed computational entity. Its reading is a
//! pure function of unit state plus the batch's shared context token, so the
//! collector can invoke units in any order and on any thread.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentError};

/// The three base labels a reading can carry.
pub const LABEL_CREST: &str = "CREST";
pub const LABEL_TROUGH: &str = "TROUGH";
pub const LABEL_DRIFT: &str = "DRIFT";

/// Distinguished label applied when amplification pushes qualia past 1.0.
pub const LABEL_SURGE: &str = "SURGE";

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One spawned computational unit.
///
/// Position is fixed at spawn time. The spectrum drives both the unit's
/// entanglement phase and its reading.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unit {
    pub depth: u64,
    pub position: Position,
    pub spectrum: Vec<f64>,
}

/// One unit's contribution to a batch.
///
/// `label` starts as one of the three base labels; the amplifier may
/// overwrite it with [`LABEL_SURGE`]. The relabeler writes
/// `augmented_label` without touching `label`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    pub position: Position,
    pub depth: u64,
    pub qualia: f64,
    pub label: String,
    pub augmented_label: Option<String>,
    pub amplified_qualia: Option<f64>,
}

impl Reading {
    /// The label that ends up in the seal: the augmented label when the
    /// relabeler produced one, the (possibly amplifier-overwritten) base
    /// label otherwise.
    pub fn effective_label(&self) -> &str {
        self.augmented_label.as_deref().unwrap_or(&self.label)
    }
}

impl Unit {
    pub fn new(depth: u64, position: Position, spectrum: Vec<f64>) -> Self {
        Self {
            depth,
            position,
            spectrum,
        }
    }

    /// Phase angle derived from the spectrum, wrapped into [0, 2π).
    pub fn phase(&self) -> f64 {
        self.spectrum
            .iter()
            .sum::<f64>()
            .rem_euclid(core::f64::consts::TAU)
    }

    /// Produce this unit's reading for the shared context token.
    ///
    /// Pure and deterministic: the same unit and token always give the same
    /// reading. A unit with an empty spectrum has nothing to read and fails
    /// the batch.
    pub fn invoke(&self, context_token: &str) -> Result<Reading> {
        if self.spectrum.is_empty() {
            return Err(SegmentError::UnitFailed {
                depth: self.depth,
                reason: "empty spectrum",
            });
        }

        let tau = core::f64::consts::TAU;
        let mix = self.spectrum.iter().sum::<f64>()
            + tau * token_signature(context_token)
            + 0.1 * self.depth as f64;

        let qualia = 0.5 * (1.0 + mix.sin());

        // Partition the circle into thirds, one base label per sector.
        let sector = mix.rem_euclid(tau) / (tau / 3.0);
        let label = if sector < 1.0 {
            LABEL_CREST
        } else if sector < 2.0 {
            LABEL_TROUGH
        } else {
            LABEL_DRIFT
        };

        Ok(Reading {
            position: self.position,
            depth: self.depth,
            qualia,
            label: label.to_string(),
            augmented_label: None,
            amplified_qualia: None,
        })
    }
}

/// FNV-1a over the token bytes, folded into [0, 1).
///
/// The token is opaque; only a stable scalar signature of it matters.
fn token_signature(token: &str) -> f64 {
    let mut h: u64 = 0xCBF29CE484222325;
    for b in token.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(0x100000001B3);
    }
    ((h >> 11) as f64) * (1.0 / (1u64 << 53) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(depth: u64, spectrum: Vec<f64>) -> Unit {
        Unit::new(depth, Position { x: 0.25, y: -0.5 }, spectrum)
    }

    #[test]
    fn invoke_is_deterministic() {
        let unit = unit_at(3, vec![0.4, -0.2, 1.1]);
        let a = unit.invoke("token").unwrap();
        let b = unit.invoke("token").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invoke_depends_on_token() {
        let unit = unit_at(3, vec![0.4, -0.2, 1.1]);
        let a = unit.invoke("alpha").unwrap();
        let b = unit.invoke("beta").unwrap();
        assert_ne!(a.qualia, b.qualia);
    }

    #[test]
    fn reading_carries_unit_identity() {
        let unit = unit_at(8, vec![0.1]);
        let reading = unit.invoke("t").unwrap();
        assert_eq!(reading.depth, 8);
        assert_eq!(reading.position, unit.position);
        assert!(reading.augmented_label.is_none());
        assert!(reading.amplified_qualia.is_none());
    }

    #[test]
    fn qualia_stays_in_unit_interval() {
        for depth in 0..32 {
            let unit = unit_at(depth, vec![depth as f64 * 0.37, -0.9]);
            let reading = unit.invoke("bounds").unwrap();
            assert!((0.0..=1.0).contains(&reading.qualia));
        }
    }

    #[test]
    fn label_is_one_of_the_base_set() {
        for depth in 0..32 {
            let unit = unit_at(depth, vec![depth as f64 * 0.61]);
            let reading = unit.invoke("labels").unwrap();
            assert!(
                [LABEL_CREST, LABEL_TROUGH, LABEL_DRIFT].contains(&reading.label.as_str()),
                "unexpected label {}",
                reading.label
            );
        }
    }

    #[test]
    fn empty_spectrum_fails_the_invocation() {
        let unit = unit_at(5, Vec::new());
        let err = unit.invoke("t").unwrap_err();
        assert!(matches!(
            err,
            SegmentError::UnitFailed { depth: 5, .. }
        ));
    }

    #[test]
    fn phase_wraps_into_the_circle() {
        let unit = unit_at(0, vec![10.0, 10.0]);
        let phase = unit.phase();
        assert!((0.0..core::f64::consts::TAU).contains(&phase));

        let negative = unit_at(0, vec![-1.0]);
        assert!(negative.phase() >= 0.0);
    }
}
