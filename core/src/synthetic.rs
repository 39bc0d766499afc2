//! Synthetic ledger generation for demos and determinism tests.
//!
//! Reproduces the shape of a real giving ledger: each donor starts in
//! a uniformly drawn year, skips a fraction of subsequent years, gives
//! one to several gifts in each active year, and gift amounts follow
//! an exponential distribution rounded to cents.

use crate::{
    ledger::{GivingLedger, Transaction},
    rng::LedgerRng,
    types::{DonorId, FiscalYear},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticLedgerConfig {
    pub seed:               u64,
    pub donor_count:        u32,
    /// Donor ids are assigned sequentially from here.
    pub first_donor_id:     DonorId,
    /// Earliest possible first gift year.
    pub start_year_min:     FiscalYear,
    /// Last generated fiscal year (every donor's range ends here).
    pub end_year:           FiscalYear,
    /// Probability a donor gives nothing in a given active year.
    pub skip_probability:   f64,
    /// Gifts per active year are drawn from [1, max_gifts_per_year).
    pub max_gifts_per_year: u64,
    /// Mean of the exponential gift-amount distribution.
    pub amount_scale:       f64,
}

impl Default for SyntheticLedgerConfig {
    fn default() -> Self {
        Self {
            seed:               888,
            donor_count:        1000,
            first_donor_id:     1000,
            start_year_min:     1990,
            end_year:           2021,
            skip_probability:   0.15,
            max_gifts_per_year: 6,
            amount_scale:       250.0,
        }
    }
}

/// Generate a validated ledger. Same config (seed included) yields an
/// identical transaction set.
pub fn generate_ledger(config: &SyntheticLedgerConfig) -> GivingLedger {
    let mut rng = LedgerRng::new(config.seed);
    let mut transactions = Vec::new();

    let year_span = (config.end_year - config.start_year_min + 1).max(1) as u64;

    for i in 0..config.donor_count {
        let donor_id = config.first_donor_id + i as DonorId;
        let start_year =
            config.start_year_min + rng.next_u64_below(year_span) as FiscalYear;

        for fiscal_year in start_year..=config.end_year {
            if rng.chance(config.skip_probability) {
                continue;
            }
            let gifts = 1 + rng.next_u64_below(config.max_gifts_per_year.saturating_sub(1).max(1));
            for _ in 0..gifts {
                let amount = (rng.exponential(config.amount_scale) * 100.0).round() / 100.0;
                transactions.push(Transaction { donor_id, fiscal_year, amount });
            }
        }
    }

    // Generated amounts are finite and non-negative by construction.
    GivingLedger::new(transactions).expect("synthetic ledger is always valid")
}
