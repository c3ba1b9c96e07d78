//! Joint-state simulation over a spawn batch.
//!
//! Each unit contributes one two-level subsystem. The walk is fixed:
//! per-unit phase rotations, a mixing gate on unit 0, then a coupling chain
//! over consecutive pairs. The output is a pruned probability map over
//! outcome bit-strings, or `None` whenever the capability is absent, the
//! batch is too small, or the numbers stop making sense. Degradation is
//! logged and never aborts the batch.

use std::collections::BTreeMap;

use num_complex::Complex64;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::unit::Unit;

/// Retention floor for joint outcomes.
const PROB_EPSILON: f64 = 1e-6;

/// Tolerance on total probability mass before pruning.
const MASS_TOLERANCE: f64 = 1e-9;

/// Default cap on simulated units. 2^20 amplitudes is as large a state
/// vector as a toy joint distribution is worth.
pub const DEFAULT_MAX_UNITS: usize = 20;

/// Joint probability distribution over unit outcome bit-strings.
///
/// Keys are bit strings of length = unit count, unit 0 most significant.
/// Entries at or below the retention floor are pruned, so the retained mass
/// can be below 1; callers must not assume normalization. The ordered map
/// gives the tie-break rule a deterministic iteration order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointState {
    outcomes: BTreeMap<String, f64>,
}

impl JointState {
    pub(crate) fn from_outcomes(outcomes: BTreeMap<String, f64>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &BTreeMap<String, f64> {
        &self.outcomes
    }

    pub fn retained(&self) -> usize {
        self.outcomes.len()
    }

    /// The maximum-probability outcome.
    ///
    /// Ties resolve to the lexicographically smallest bit-string: iteration
    /// follows key order and only a strictly larger probability displaces
    /// the current best.
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (bits, &p) in &self.outcomes {
            match best {
                Some((_, bp)) if p <= bp => {}
                _ => best = Some((bits, p)),
            }
        }
        best.map(|(bits, _)| bits)
    }
}

/// Capability provider for the joint-state simulation.
///
/// `Disabled` is the fallback branch made first-class: a segment built with
/// it behaves exactly like one whose simulation failed, without any
/// simulation machinery in the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entangler {
    StateVector { max_units: usize },
    Disabled,
}

impl Default for Entangler {
    fn default() -> Self {
        Self::StateVector {
            max_units: DEFAULT_MAX_UNITS,
        }
    }
}

impl Entangler {
    /// Build the joint state over all units.
    ///
    /// Returns `None` for batches of fewer than 2 units, when the capability
    /// is disabled, when the batch exceeds the simulation cap, or when the
    /// walk goes numerically bad. The caller composes the classical marker
    /// in every one of those cases.
    pub fn entangle(&self, units: &[Unit]) -> Option<JointState> {
        let n = units.len();
        if n < 2 {
            debug!(units = n, "joint state skipped: fewer than 2 units");
            return None;
        }

        match *self {
            Entangler::Disabled => {
                warn!("entanglement capability disabled, using classical fallback");
                None
            }
            Entangler::StateVector { max_units } => {
                if n > max_units {
                    warn!(
                        units = n,
                        max_units, "batch too large to entangle, using classical fallback"
                    );
                    return None;
                }
                let state = simulate(units);
                if state.is_none() {
                    warn!("joint state simulation unstable, using classical fallback");
                }
                state
            }
        }
    }
}

/// Run the fixed gate walk and extract the pruned outcome distribution.
fn simulate(units: &[Unit]) -> Option<JointState> {
    let n = units.len();
    let dim = 1usize.checked_shl(n as u32)?;

    // |00…0⟩ as the tensor product of per-unit zero states.
    let mut amps = vec![Complex64::new(0.0, 0.0); dim];
    amps[0] = Complex64::new(1.0, 0.0);

    // Per-unit rotation by half the spectrum phase.
    for (i, unit) in units.iter().enumerate() {
        let (sin, cos) = (unit.phase() / 2.0).sin_cos();
        let rot = [
            [Complex64::new(cos, 0.0), Complex64::new(-sin, 0.0)],
            [Complex64::new(sin, 0.0), Complex64::new(cos, 0.0)],
        ];
        apply_single(&mut amps, n, i, &rot);
    }

    // Mixing gate on unit 0.
    let h = core::f64::consts::FRAC_1_SQRT_2;
    let mix = [
        [Complex64::new(h, 0.0), Complex64::new(h, 0.0)],
        [Complex64::new(h, 0.0), Complex64::new(-h, 0.0)],
    ];
    apply_single(&mut amps, n, 0, &mix);

    // Coupling chain over consecutive pairs.
    for i in 0..n - 1 {
        apply_cnot(&mut amps, n, i, i + 1);
    }

    let mut outcomes = BTreeMap::new();
    let mut total = 0.0;
    for (idx, amp) in amps.iter().enumerate() {
        let p = amp.norm_sqr();
        if !p.is_finite() {
            return None;
        }
        total += p;
        if p > PROB_EPSILON {
            outcomes.insert(bit_label(idx, n), p);
        }
    }

    // The walk is unitary; drifting mass means the numbers went bad.
    if (total - 1.0).abs() > MASS_TOLERANCE {
        return None;
    }

    Some(JointState { outcomes })
}

/// Apply a 2x2 operator to one subsystem of the joint state.
///
/// Unit 0 owns the most significant bit, so subsystem `qubit` strides
/// 2^(n-1-qubit).
fn apply_single(amps: &mut [Complex64], n: usize, qubit: usize, m: &[[Complex64; 2]; 2]) {
    let stride = 1usize << (n - 1 - qubit);
    for idx in 0..amps.len() {
        if idx & stride == 0 {
            let a0 = amps[idx];
            let a1 = amps[idx | stride];
            amps[idx] = m[0][0] * a0 + m[0][1] * a1;
            amps[idx | stride] = m[1][0] * a0 + m[1][1] * a1;
        }
    }
}

/// Controlled NOT: flip the target bit wherever the control bit is set.
fn apply_cnot(amps: &mut [Complex64], n: usize, control: usize, target: usize) {
    let cbit = 1usize << (n - 1 - control);
    let tbit = 1usize << (n - 1 - target);
    for idx in 0..amps.len() {
        if idx & cbit != 0 && idx & tbit == 0 {
            amps.swap(idx, idx | tbit);
        }
    }
}

/// Bit string for a joint outcome index, unit 0 most significant.
fn bit_label(idx: usize, n: usize) -> String {
    (0..n)
        .map(|q| {
            if idx & (1usize << (n - 1 - q)) != 0 {
                '1'
            } else {
                '0'
            }
        })
        .collect()
}
