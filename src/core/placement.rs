//! Deterministic spiral placement.
//!
//! Spawn batches land on a golden-ratio spiral: radius shrinks as φ^-depth,
//! angle advances by 2πφ per offset. Jitter is the only source of
//! randomness, and it flows from the segment's seeded PRNG.

use crate::config::SegmentConfig;
use crate::prng::Prng;
use crate::unit::{Position, Unit};

/// Golden ratio φ, the spiral's contraction constant.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_894_8;

/// Place `count` units starting at `start_depth`.
///
/// Offset `i` gets true depth `start_depth + i`, radius `φ^-depth`, and
/// angle `2πφi`, plus independent zero-mean Gaussian jitter on each
/// coordinate scaled by the configured standard deviation. Each unit's
/// spectrum is seeded from the same PRNG.
pub fn place(
    start_depth: u64,
    count: usize,
    cfg: &SegmentConfig,
    rng: &mut Prng,
) -> Vec<Unit> {
    let tau = core::f64::consts::TAU;
    let mut units = Vec::with_capacity(count);

    for offset in 0..count {
        let depth = start_depth + offset as u64;
        let radius = GOLDEN_RATIO.powf(-(depth as f64));
        let angle = tau * GOLDEN_RATIO * offset as f64;

        let x = radius * angle.cos() + rng.next_gaussian() * cfg.position_jitter;
        let y = radius * angle.sin() + rng.next_gaussian() * cfg.position_jitter;

        let spectrum = (0..cfg.spectrum_len).map(|_| rng.next_gaussian()).collect();

        units.push(Unit::new(depth, Position { x, y }, spectrum));
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> SegmentConfig {
        SegmentConfig::default().with_jitter(0.0).with_seed(42)
    }

    #[test]
    fn places_exactly_count_units_with_sequential_depths() {
        let cfg = quiet_config();
        let mut rng = Prng::new(42);
        for count in [0usize, 1, 5, 12] {
            let units = place(10, count, &cfg, &mut rng);
            assert_eq!(units.len(), count);
            for (i, unit) in units.iter().enumerate() {
                assert_eq!(unit.depth, 10 + i as u64);
            }
        }
    }

    #[test]
    fn zero_jitter_follows_the_spiral_law_exactly() {
        let cfg = quiet_config();
        let mut rng = Prng::new(1);
        let units = place(2, 4, &cfg, &mut rng);

        let tau = core::f64::consts::TAU;
        for (i, unit) in units.iter().enumerate() {
            let depth = 2 + i as u64;
            let radius = GOLDEN_RATIO.powf(-(depth as f64));
            let angle = tau * GOLDEN_RATIO * i as f64;
            assert!((unit.position.x - radius * angle.cos()).abs() < 1e-12);
            assert!((unit.position.y - radius * angle.sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn radius_shrinks_with_depth() {
        let cfg = quiet_config();
        let mut rng = Prng::new(3);
        let units = place(0, 6, &cfg, &mut rng);
        for pair in units.windows(2) {
            let r0 = pair[0].position.x.hypot(pair[0].position.y);
            let r1 = pair[1].position.x.hypot(pair[1].position.y);
            assert!(r1 < r0, "spiral should contract inward");
        }
    }

    #[test]
    fn same_seed_reproduces_the_batch() {
        let cfg = SegmentConfig::default().with_jitter(0.2);
        let mut a = Prng::new(99);
        let mut b = Prng::new(99);
        let ua = place(0, 5, &cfg, &mut a);
        let ub = place(0, 5, &cfg, &mut b);
        for (x, y) in ua.iter().zip(&ub) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.spectrum, y.spectrum);
        }
    }

    #[test]
    fn spectrum_has_the_configured_length() {
        let mut cfg = quiet_config();
        cfg.spectrum_len = 7;
        let mut rng = Prng::new(5);
        let units = place(0, 3, &cfg, &mut rng);
        assert!(units.iter().all(|u| u.spectrum.len() == 7));
    }
}
