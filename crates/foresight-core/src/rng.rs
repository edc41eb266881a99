//! The single deterministic random stream shared by all phases in a run.
//!
//! Every piece of randomness in a run flows through one [`RunRng`],
//! seeded once at run start and advanced in the fixed phase execution
//! order. That fixed consumption order is itself part of what
//! "reproducible" means: for a given seed and phase set, the sequence of
//! values drawn is bit-for-bit identical across runs and process
//! restarts.
//!
//! The generator is a PCG-family stream (`Pcg64Mcg`): fast and
//! well-distributed, not cryptographic. The algorithm is version-pinned,
//! so persisted seeds replay identically on any machine.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Scale factor mapping a 53-bit integer onto `[0, 1)`.
const F64_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

/// The per-run deterministic random stream.
///
/// Owned by the engine for the run's lifetime and lent to each phase
/// during `execute`. Phases must draw all their randomness from this
/// stream; reading ambient entropy breaks the reproducibility guarantee.
#[derive(Debug)]
pub struct RunRng {
    seed: u64,
    inner: Pcg64Mcg,
    draws: u64,
}

impl RunRng {
    /// Create a stream from a run seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// The seed this stream was constructed from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// How many values have been drawn so far.
    ///
    /// Two runs with the same seed and phase set must report identical
    /// draw counts after every month; the determinism tests rely on this.
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Draw a uniform value in `[0, 1)`.
    ///
    /// Uses the 53-bit mantissa construction, so every representable
    /// value in the range is reachable and the distribution is uniform.
    pub fn next_f64(&mut self) -> f64 {
        self.draws = self.draws.saturating_add(1);
        let bits = self.inner.next_u64();
        #[allow(clippy::cast_precision_loss)]
        let mantissa = (bits >> 11) as f64;
        mantissa * F64_SCALE
    }

    /// Bernoulli trial: `true` with probability `p`.
    ///
    /// Values of `p` at or below 0 never succeed; at or above 1 always
    /// succeed.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Draw a uniform value in `[lo, hi)`.
    ///
    /// If `hi <= lo` the result is `lo`; the stream still advances by
    /// one draw so consumption stays aligned across code paths.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let u = self.next_f64();
        if hi <= lo {
            return lo;
        }
        u.mul_add(hi - lo, lo)
    }

    /// Draw a uniform integer in `[0, n)`. Returns 0 when `n == 0`.
    pub fn below(&mut self, n: u64) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.inner.next_u64().checked_rem(n).unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RunRng::new(42);
        let mut b = RunRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RunRng::new(42);
        let mut b = RunRng::new(43);
        let draws_a: Vec<u64> = (0..16).map(|_| a.next_f64().to_bits()).collect();
        let draws_b: Vec<u64> = (0..16).map(|_| b.next_f64().to_bits()).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn values_stay_in_unit_interval() {
        let mut rng = RunRng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn draw_counter_tracks_consumption() {
        let mut rng = RunRng::new(1);
        assert_eq!(rng.draws(), 0);
        let _ = rng.next_f64();
        let _ = rng.chance(0.5);
        let _ = rng.range(2.0, 3.0);
        let _ = rng.below(10);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn range_respects_bounds() {
        let mut rng = RunRng::new(99);
        for _ in 0..1000 {
            let v = rng.range(-2.0, 5.0);
            assert!((-2.0..5.0).contains(&v));
        }
    }

    #[test]
    fn degenerate_range_returns_lo_but_advances() {
        let mut rng = RunRng::new(5);
        let before = rng.draws();
        assert_eq!(rng.range(3.0, 3.0), 3.0);
        assert_eq!(rng.draws(), before.checked_add(1).unwrap());
    }

    #[test]
    fn below_zero_is_zero() {
        let mut rng = RunRng::new(5);
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn below_stays_under_bound() {
        let mut rng = RunRng::new(11);
        for _ in 0..1000 {
            assert!(rng.below(13) < 13);
        }
    }
}
