//! Deterministic random number generation.
//!
//! RULE: the pipeline itself draws no randomness. The only consumer is
//! the synthetic ledger generator, and everything it draws flows
//! through one seeded PCG stream so a seed fully determines a dataset.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A single deterministic RNG stream for ledger generation.
pub struct LedgerRng {
    inner: Pcg64Mcg,
}

impl LedgerRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Sample from an exponential distribution with the given scale
    /// (mean). Used for gift amounts, which are heavily right-skewed.
    pub fn exponential(&mut self, scale: f64) -> f64 {
        let u = self.next_f64();
        -scale * (1.0 - u).ln()
    }
}
