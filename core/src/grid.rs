//! Grid completion — expand sparse donor-years into contiguous grids.
//!
//! RULE: every donor's grid runs from their first observed gift year
//! through the panel end year with no gaps, and never contains a year
//! before the first gift. Pre-history zero rows would imply the donor
//! was lapsing before they ever existed in the ledger.

use crate::{
    aggregate::YearRecord,
    error::{PanelError, PanelResult},
    types::{Amount, DonorId, FiscalYear},
};

/// A single donor's gap-free fiscal-year sequence. Rows are stored in
/// year order, indexed by offset from `first_gift_year`.
#[derive(Debug, Clone, PartialEq)]
pub struct DonorGrid {
    pub donor_id:        DonorId,
    pub first_gift_year: FiscalYear,
    years:               Vec<YearRecord>,
}

impl DonorGrid {
    /// Build a completed grid from a donor's observed year records.
    ///
    /// `records` must all belong to `donor_id` and contain each fiscal
    /// year at most once (year aggregation guarantees both). An empty
    /// record set is a caller contract violation.
    pub fn build(
        donor_id: DonorId,
        records: &[YearRecord],
        panel_end_year: FiscalYear,
    ) -> PanelResult<Self> {
        let first_gift_year = records
            .iter()
            .map(|r| r.fiscal_year)
            .min()
            .ok_or(PanelError::EmptyDonorHistory { donor_id })?;

        let mut years = Vec::with_capacity(
            (panel_end_year - first_gift_year + 1).max(1) as usize,
        );
        for year in first_gift_year..=panel_end_year.max(first_gift_year) {
            let record = records
                .iter()
                .find(|r| r.fiscal_year == year)
                .cloned()
                .unwrap_or(YearRecord {
                    donor_id,
                    fiscal_year:  year,
                    amount_given: 0.0,
                    gift_count:   0,
                });
            years.push(record);
        }

        Ok(Self { donor_id, first_gift_year, years })
    }

    pub fn last_year(&self) -> FiscalYear {
        self.first_gift_year + self.years.len() as FiscalYear - 1
    }

    pub fn rows(&self) -> &[YearRecord] {
        &self.years
    }

    /// Amount given in `year`, or None for years outside the grid.
    /// Absence is meaningful: velocity windows clip against it rather
    /// than reading zeros from before the donor's history.
    pub fn amount_at(&self, year: FiscalYear) -> Option<Amount> {
        if year < self.first_gift_year || year > self.last_year() {
            return None;
        }
        let offset = (year - self.first_gift_year) as usize;
        Some(self.years[offset].amount_given)
    }
}

/// Complete one grid per donor from aggregated year records.
///
/// `records` must be sorted by (donor, year), as `aggregate_by_year`
/// produces them. Observed years past `panel_end_year` are dropped
/// with a warning; the panel window simply does not cover them. A
/// donor whose observed years all fall past the window is skipped
/// entirely — that donor has history, just none the panel can see,
/// so it is not an EmptyDonorHistory contract violation.
pub fn complete_grids(
    records: &[YearRecord],
    panel_end_year: FiscalYear,
) -> PanelResult<Vec<DonorGrid>> {
    let mut grids = Vec::new();
    let mut start = 0usize;

    while start < records.len() {
        let donor_id = records[start].donor_id;
        let end = records[start..]
            .iter()
            .position(|r| r.donor_id != donor_id)
            .map(|p| start + p)
            .unwrap_or(records.len());

        let donor_records: Vec<YearRecord> = records[start..end]
            .iter()
            .filter(|r| {
                if r.fiscal_year > panel_end_year {
                    log::warn!(
                        "donor {}: dropping fiscal year {} past panel end {}",
                        r.donor_id,
                        r.fiscal_year,
                        panel_end_year
                    );
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        if donor_records.is_empty() {
            log::warn!("donor {donor_id}: no fiscal years inside the panel window, skipping");
        } else {
            grids.push(DonorGrid::build(donor_id, &donor_records, panel_end_year)?);
        }
        start = end;
    }

    Ok(grids)
}
