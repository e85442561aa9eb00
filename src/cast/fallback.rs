//! Injectable fallback randomness.
//!
//! Covers the two places chance enters outside the sensor: the empty-session
//! fallback seed and the optional per-sample perturbation. Backed by
//! ChaCha20 so tests can construct a deterministic generator from a fixed
//! seed instead of reaching for a hidden global.

use super::seed::Seed;
use rand_chacha::ChaCha20Rng;
use rand_core::{OsRng, RngCore, SeedableRng};

/// Fallback random generator for sensorless casts.
pub struct FallbackRng {
    inner: ChaCha20Rng,
    draws: u64,
}

impl FallbackRng {
    /// Creates a generator seeded from the OS entropy source.
    ///
    /// This is the production constructor; the sensorless path should stay
    /// unpredictable across runs.
    pub fn from_os_entropy() -> Self {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        Self::from_seed(seed)
    }

    /// Creates a deterministic generator from a fixed seed.
    ///
    /// Intended for tests and reproducible simulations.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            inner: ChaCha20Rng::from_seed(seed),
            draws: 0,
        }
    }

    /// Draws a uniformly distributed cast seed in [0, 255].
    pub fn next_seed(&mut self) -> Seed {
        self.draws += 1;
        // 256 divides 2^32, so the low byte is exactly uniform.
        Seed::from((self.inner.next_u32() & 0xFF) as u8)
    }

    /// Draws a uniform perturbation in [0, amplitude).
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        self.draws += 1;
        let unit = f64::from(self.inner.next_u32()) / (f64::from(u32::MAX) + 1.0);
        unit * amplitude
    }

    /// Total draws performed.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl std::fmt::Debug for FallbackRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackRng")
            .field("draws", &self.draws)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let mut a = FallbackRng::from_seed([7u8; 32]);
        let mut b = FallbackRng::from_seed([7u8; 32]);

        for _ in 0..64 {
            assert_eq!(a.next_seed(), b.next_seed());
        }
        assert_eq!(a.draws(), 64);
    }

    #[test]
    fn test_all_256_values_reachable() {
        let mut rng = FallbackRng::from_seed([42u8; 32]);
        let mut seen = [false; 256];

        for _ in 0..10_000 {
            seen[rng.next_seed().value() as usize] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let mut rng = FallbackRng::from_seed([3u8; 32]);

        for _ in 0..1000 {
            let jitter = rng.jitter(10.0);
            assert!((0.0..10.0).contains(&jitter));
        }
    }
}
