//! Giving velocity — two windowed ratios per donor-year.
//!
//! Simple velocity is the share of a donor's lifetime giving that (as
//! of a given year) falls in the trailing window. Rolling velocity
//! compares the previous year's giving to the mean of the window
//! before that, measuring escalation or de-escalation.
//!
//! Windows index absolute fiscal years and clip by absence: the grid
//! holds no rows before the donor's first gift, so incomplete early
//! windows sum over fewer years rather than over synthetic zeros.

use crate::{
    config::PanelConfig,
    grid::DonorGrid,
    types::{Amount, DonorId, FiscalYear},
};
use serde::{Deserialize, Serialize};

/// Velocity features for one donor-year. `simple_velocity` is NaN when
/// the donor has no giving history through that year; the assembler
/// owns the zero fill. `rolling_velocity` is already zero-filled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityRecord {
    pub donor_id:         DonorId,
    pub fiscal_year:      FiscalYear,
    pub simple_velocity:  Amount,
    pub rolling_velocity: Amount,
}

/// Trailing-window share of lifetime giving as of `year`.
///
/// numerator: sum over grid years in [year - window, year]
/// denominator: sum over grid years <= year
///
/// Undefined (zero denominator) stays NaN by contract.
pub fn simple_velocity(grid: &DonorGrid, year: FiscalYear, window: u32) -> Amount {
    let window_start = year - window as FiscalYear;
    let mut recent = 0.0;
    let mut total = 0.0;

    for row in grid.rows() {
        if row.fiscal_year > year {
            continue;
        }
        total += row.amount_given;
        if row.fiscal_year >= window_start {
            recent += row.amount_given;
        }
    }

    recent / total
}

/// Previous year's giving over the mean of the window before it.
///
/// numerator: amount given in year - 1
/// denominator: mean over grid years in [year - window, year - 1)
///
/// A zero or undefined mean, or an absent previous year, fills to 0.
pub fn rolling_velocity(grid: &DonorGrid, year: FiscalYear, window: u32) -> Amount {
    let prev = match grid.amount_at(year - 1) {
        Some(amount) => amount,
        None => return 0.0,
    };

    let window_start = year - window as FiscalYear;
    let mut sum = 0.0;
    let mut count = 0u32;
    for row in grid.rows() {
        if row.fiscal_year >= window_start && row.fiscal_year < year - 1 {
            sum += row.amount_given;
            count += 1;
        }
    }

    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as Amount;
    if mean == 0.0 {
        return 0.0;
    }
    prev / mean
}

/// Compute both velocities for every row of a donor's grid.
///
/// Each year is an independent rescan of the grid; no velocity
/// depends on a previously computed one. Output aligns row-for-row
/// with the grid.
pub fn compute_velocities(grid: &DonorGrid, config: &PanelConfig) -> Vec<VelocityRecord> {
    grid.rows()
        .iter()
        .map(|row| VelocityRecord {
            donor_id:    row.donor_id,
            fiscal_year: row.fiscal_year,
            simple_velocity: simple_velocity(
                grid,
                row.fiscal_year,
                config.simple_velocity_window,
            ),
            rolling_velocity: rolling_velocity(
                grid,
                row.fiscal_year,
                config.rolling_velocity_window,
            ),
        })
        .collect()
}
