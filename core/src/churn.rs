//! Churn labeling — the forward-looking binary target.
//!
//! A donor-year is churned when the donor gave that year and gave
//! nothing the next. The final grid year has no next year; the
//! `FinalYearPolicy` decides whether it is labeled against an assumed
//! zero or marked right-censored.

use crate::{
    config::FinalYearPolicy,
    grid::DonorGrid,
    types::{DonorId, FiscalYear},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnLabel {
    pub donor_id:    DonorId,
    pub fiscal_year: FiscalYear,
    pub churn:       u8,
    /// True only on a donor's final grid year under the Censor policy:
    /// the label could not be evaluated against a following year.
    pub censored:    bool,
}

/// Label every row of a completed grid.
pub fn label_grid(grid: &DonorGrid, policy: FinalYearPolicy) -> Vec<ChurnLabel> {
    let rows = grid.rows();
    let mut labels = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let next_amount = rows.get(i + 1).map(|r| r.amount_given);

        let (churn, censored) = match next_amount {
            Some(next) => (u8::from(row.amount_given > 0.0 && next <= 0.0), false),
            None => match policy {
                FinalYearPolicy::AssumeZero => (u8::from(row.amount_given > 0.0), false),
                FinalYearPolicy::Censor => (0, true),
            },
        };

        labels.push(ChurnLabel {
            donor_id: row.donor_id,
            fiscal_year: row.fiscal_year,
            churn,
            censored,
        });
    }

    labels
}
