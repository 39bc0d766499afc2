//! Year aggregation — collapse the ledger to one row per donor-year.

use crate::{
    ledger::GivingLedger,
    types::{Amount, DonorId, FiscalYear},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One donor-year: summed giving and gift count. Zero-valued rows are
/// synthesized later by grid completion; aggregation only emits
/// observed years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub donor_id:     DonorId,
    pub fiscal_year:  FiscalYear,
    pub amount_given: Amount,
    pub gift_count:   u32,
}

/// Sum amounts and count gifts per (donor, fiscal year).
///
/// Output is sorted by (donor, year) and contains each key at most
/// once. Side-effect-free.
pub fn aggregate_by_year(ledger: &GivingLedger) -> Vec<YearRecord> {
    let mut totals: BTreeMap<(DonorId, FiscalYear), (Amount, u32)> = BTreeMap::new();

    for txn in ledger.transactions() {
        let entry = totals
            .entry((txn.donor_id, txn.fiscal_year))
            .or_insert((0.0, 0));
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|((donor_id, fiscal_year), (amount_given, gift_count))| YearRecord {
            donor_id,
            fiscal_year,
            amount_given,
            gift_count,
        })
        .collect()
}
