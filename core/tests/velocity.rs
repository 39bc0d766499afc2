use donorpanel_core::aggregate::aggregate_by_year;
use donorpanel_core::config::PanelConfig;
use donorpanel_core::grid::{complete_grids, DonorGrid};
use donorpanel_core::ledger::{GivingLedger, Transaction};
use donorpanel_core::velocity::{compute_velocities, rolling_velocity, simple_velocity};

fn grid(rows: &[(i64, i32, f64)], end_year: i32) -> DonorGrid {
    let transactions = rows
        .iter()
        .map(|&(donor_id, fiscal_year, amount)| Transaction {
            donor_id,
            fiscal_year,
            amount,
        })
        .collect();
    let ledger = GivingLedger::new(transactions).unwrap();
    let records = aggregate_by_year(&ledger);
    complete_grids(&records, end_year).unwrap().remove(0)
}

// ── Simple velocity ──────────────────────────────────────────────────────────

/// A donor whose entire history is one 500 gift in the current year has
/// all giving inside the window: velocity 500/500 = 1.
#[test]
fn all_recent_giving_is_velocity_one() {
    let grid = grid(&[(1000, 2015, 500.0)], 2015);
    assert_eq!(simple_velocity(&grid, 2015, 5), 1.0);
}

/// Old giving outside the trailing window dilutes the ratio:
/// 1000 in 2012 plus 1500 across 2016–2020 gives 1500/2500 = 0.6
/// as of 2020 with a 5-year window.
#[test]
fn old_giving_dilutes_velocity() {
    let grid = grid(
        &[
            (1000, 2012, 1000.0),
            (1000, 2016, 100.0),
            (1000, 2017, 200.0),
            (1000, 2018, 300.0),
            (1000, 2019, 400.0),
            (1000, 2020, 500.0),
        ],
        2020,
    );

    let v = simple_velocity(&grid, 2020, 5);
    assert!((v - 0.6).abs() < 1e-9, "expected 0.6, got {v}");
}

/// With only zero-amount history through a year, the ratio is 0/0:
/// undefined stays NaN for the assembler to fill.
#[test]
fn zero_history_is_nan() {
    let grid = grid(&[(1000, 2018, 0.0), (1000, 2020, 100.0)], 2020);

    assert!(simple_velocity(&grid, 2018, 5).is_nan());
    assert_eq!(simple_velocity(&grid, 2020, 5), 1.0);
}

/// With non-negative amounts the trailing window sum can never exceed
/// the lifetime sum, so a defined velocity lies in [0, 1].
#[test]
fn velocity_is_bounded_when_defined() {
    let grid = grid(
        &[
            (1000, 2000, 900.0),
            (1000, 2005, 10.0),
            (1000, 2013, 35.5),
            (1000, 2019, 120.0),
        ],
        2021,
    );

    for row in grid.rows() {
        let v = simple_velocity(&grid, row.fiscal_year, 5);
        assert!((0.0..=1.0).contains(&v), "velocity {v} out of [0,1]");
    }
}

// ── Rolling velocity ─────────────────────────────────────────────────────────

/// rolling_velocity(y) = amount(y-1) / mean over [y-3, y-1).
/// amount(2019)=400, mean(2017, 2018) = 250 → 1.6.
#[test]
fn rolling_velocity_measures_escalation() {
    let grid = grid(
        &[
            (1000, 2016, 100.0),
            (1000, 2017, 200.0),
            (1000, 2018, 300.0),
            (1000, 2019, 400.0),
            (1000, 2020, 500.0),
        ],
        2020,
    );

    let v = rolling_velocity(&grid, 2020, 3);
    assert!((v - 1.6).abs() < 1e-9, "expected 1.6, got {v}");
}

/// Donor gives 100 in 2018, nothing in 2019, 100 in 2020.
/// rolling_velocity(2020) = amount(2019) / mean over available years
/// in [2017, 2019) — only 2018 exists, mean 100 → 0/100 = 0.
#[test]
fn rolling_velocity_clips_window_by_absence() {
    let grid = grid(&[(1000, 2018, 100.0), (1000, 2020, 100.0)], 2020);

    assert_eq!(rolling_velocity(&grid, 2020, 3), 0.0);
}

/// First grid year has no previous year; the ratio fills to 0.
#[test]
fn first_year_rolls_to_zero() {
    let grid = grid(&[(1000, 2018, 100.0)], 2020);
    assert_eq!(rolling_velocity(&grid, 2018, 3), 0.0);
}

/// A zero rolling mean fills to 0 rather than dividing.
#[test]
fn zero_rolling_mean_fills_zero() {
    let grid = grid(
        &[(1000, 2016, 0.0), (1000, 2019, 300.0), (1000, 2020, 100.0)],
        2020,
    );

    // Window [2017, 2019) holds the zero-filled 2017 and 2018 rows.
    assert_eq!(rolling_velocity(&grid, 2020, 3), 0.0);
}

// ── Driver ───────────────────────────────────────────────────────────────────

/// Velocity records align one-to-one with grid rows.
#[test]
fn velocities_align_with_grid() {
    let grid = grid(&[(1000, 2014, 80.0), (1000, 2018, 20.0)], 2021);
    let config = PanelConfig::for_end_year(2021);

    let velocities = compute_velocities(&grid, &config);

    assert_eq!(velocities.len(), grid.rows().len());
    for (velocity, row) in velocities.iter().zip(grid.rows()) {
        assert_eq!(velocity.donor_id, row.donor_id);
        assert_eq!(velocity.fiscal_year, row.fiscal_year);
    }
}
