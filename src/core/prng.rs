// Minimal seeded PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It drives position jitter, spectrum seeding, and relabeler weight init,
// so a fixed seed reproduces a whole batch.

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
    // Box-Muller produces draws in pairs; the second is held here.
    spare_gauss: Option<f64>,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self {
            state: seed,
            spare_gauss: None,
        }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        // Marsaglia / Vigna family. Simple, fast, decent for simulation noise.
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform in [0, 1), 53 mantissa bits.
    #[inline]
    pub fn next_f64_01(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64) * (1.0 / (1u64 << 53) as f64)
    }

    #[inline]
    pub fn gen_range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64_01()
    }

    /// Standard normal draw via Box-Muller.
    pub fn next_gaussian(&mut self) -> f64 {
        if let Some(z) = self.spare_gauss.take() {
            return z;
        }

        // u1 must stay off zero so the log is finite.
        let mut u1 = self.next_f64_01();
        while u1 == 0.0 {
            u1 = self.next_f64_01();
        }
        let u2 = self.next_f64_01();

        let r = (-2.0 * u1.ln()).sqrt();
        let theta = core::f64::consts::TAU * u2;
        self.spare_gauss = Some(r * theta.sin());
        r * theta.cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Prng::new(42);
        let mut b = Prng::new(42);
        for _ in 0..64 {
            assert_eq!(a.next_f64_01(), b.next_f64_01());
        }
        for _ in 0..64 {
            assert_eq!(a.next_gaussian(), b.next_gaussian());
        }
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut rng = Prng::new(0);
        // Would stay stuck at zero without the remap.
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn uniform_stays_in_unit_interval() {
        let mut rng = Prng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f64_01();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gaussian_is_roughly_centered() {
        let mut rng = Prng::new(11);
        let n = 10_000;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for _ in 0..n {
            let z = rng.next_gaussian();
            assert!(z.is_finite());
            sum += z;
            sum_sq += z * z;
        }
        let mean = sum / n as f64;
        let var = sum_sq / n as f64 - mean * mean;
        assert!(mean.abs() < 0.05, "mean drifted: {mean}");
        assert!((var - 1.0).abs() < 0.1, "variance drifted: {var}");
    }
}
