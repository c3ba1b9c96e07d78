//! Final seal composition.
//!
//! The seal is the batch's only externally consumed artifact. Downstream
//! consumers split it on the separator, so label order and token structure
//! are load-bearing.

use crate::entangle::JointState;
use crate::unit::Reading;

/// Separator used throughout the seal.
pub const SEAL_SEPARATOR: &str = "::";

/// Sign used when no joint state is available.
pub const CLASSICAL_MARKER: &str = "CLASSICAL";

/// Fold a batch into its seal: `SEGMENT_<id>::<sign>::<label>::…`.
///
/// Labels are taken in reverse unit order, each reading contributing its
/// augmented label when present and its (possibly amplifier-overwritten)
/// base label otherwise. The sign is the dominant joint outcome with its
/// characters reversed, or the classical marker when the joint state is
/// absent. Pure function of its three inputs.
pub fn compose(segment_id: u64, readings: &[Reading], joint: Option<&JointState>) -> String {
    let wisdom: Vec<&str> = readings.iter().rev().map(Reading::effective_label).collect();

    let sign: String = match joint.and_then(JointState::dominant) {
        Some(bits) => bits.chars().rev().collect(),
        None => CLASSICAL_MARKER.to_string(),
    };

    format!(
        "SEGMENT_{segment_id}{SEAL_SEPARATOR}{sign}{SEAL_SEPARATOR}{}",
        wisdom.join(SEAL_SEPARATOR)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Position;
    use std::collections::BTreeMap;

    fn reading(depth: u64, label: &str) -> Reading {
        Reading {
            position: Position { x: 0.0, y: 0.0 },
            depth,
            qualia: 0.0,
            label: label.to_string(),
            augmented_label: None,
            amplified_qualia: None,
        }
    }

    fn joint(entries: &[(&str, f64)]) -> JointState {
        let mut outcomes = BTreeMap::new();
        for (bits, p) in entries {
            outcomes.insert(bits.to_string(), *p);
        }
        JointState::from_outcomes(outcomes)
    }

    #[test]
    fn classical_seal_reverses_label_order() {
        let readings = vec![reading(0, "X"), reading(1, "Y")];
        let seal = compose(0, &readings, None);
        assert_eq!(seal, "SEGMENT_0::CLASSICAL::Y::X");
    }

    #[test]
    fn dominant_outcome_sign_is_reversed() {
        let readings = vec![reading(0, "A"), reading(1, "B"), reading(2, "C")];
        let state = joint(&[("011", 0.8), ("100", 0.1)]);
        let seal = compose(4, &readings, Some(&state));
        assert_eq!(seal, "SEGMENT_4::110::C::B::A");
    }

    #[test]
    fn probability_ties_pick_the_lexicographically_smallest_outcome() {
        let readings = vec![reading(0, "A"), reading(1, "B")];
        let state = joint(&[("01", 0.5), ("10", 0.5)]);
        let seal = compose(0, &readings, Some(&state));
        assert_eq!(seal, "SEGMENT_0::10::B::A");
    }

    #[test]
    fn augmented_labels_win_over_base_labels() {
        let mut first = reading(0, "X");
        first.augmented_label = Some("X_PRIME".to_string());
        let readings = vec![first, reading(1, "Y")];
        let seal = compose(0, &readings, None);
        assert_eq!(seal, "SEGMENT_0::CLASSICAL::Y::X_PRIME");
    }

    #[test]
    fn token_count_is_two_plus_batch_size() {
        for n in [1usize, 2, 5, 8] {
            let readings: Vec<Reading> =
                (0..n).map(|i| reading(i as u64, "L")).collect();
            let seal = compose(3, &readings, None);
            let tokens: Vec<&str> = seal.split(SEAL_SEPARATOR).collect();
            assert_eq!(tokens.len(), 2 + n);
            assert_eq!(tokens[0], "SEGMENT_3");
            assert_eq!(tokens[1], CLASSICAL_MARKER);
        }
    }

    #[test]
    fn empty_batch_leaves_a_trailing_empty_token() {
        let seal = compose(3, &[], None);
        assert_eq!(seal, "SEGMENT_3::CLASSICAL::");
        assert_eq!(seal.split(SEAL_SEPARATOR).count(), 3);
    }
}
