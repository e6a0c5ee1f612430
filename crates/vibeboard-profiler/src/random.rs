//! Injectable randomness for the generators.
//!
//! Every random draw in this crate goes through [`RandomSource`], so tests can
//! pass a seeded [`RngSource`] or a scripted source and get repeatable output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform draws over half-open ranges.
pub trait RandomSource {
    /// Integer in `[low, high)`. Requires `low < high`.
    fn int_in(&mut self, low: u64, high: u64) -> u64;

    /// Float in `[low, high)`. Requires `low < high`.
    fn float_in(&mut self, low: f64, high: f64) -> f64;

    fn coin_flip(&mut self) -> bool;

    /// Uniform index into a slice of length `len`. Requires `len > 0`.
    fn pick(&mut self, len: usize) -> usize {
        let idx = self.int_in(0, len as u64);
        usize::try_from(idx).unwrap_or(0)
    }
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system. `Send`, unlike the thread-local rng.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn int_in(&mut self, low: u64, high: u64) -> u64 {
        self.rng.random_range(low..high)
    }

    fn float_in(&mut self, low: f64, high: f64) -> f64 {
        self.rng.random_range(low..high)
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}
