//! Panel assembly — the total join that produces the finished table.
//!
//! RULE: the completed grid defines the key set. Every derived table
//! must cover exactly that set; a key present in one table and absent
//! in another is a pipeline bug and fails loudly, never a silent
//! partial join. The assembler is also the single place undefined
//! ratios become zeros.

use crate::{
    accel::AccelerationRecord,
    churn::ChurnLabel,
    error::{PanelError, PanelResult},
    grid::DonorGrid,
    types::{Amount, DonorId, FiscalYear},
    velocity::VelocityRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One finished row per donor-year. Ownership passes to the consumer;
/// the pipeline keeps nothing after assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePanelRow {
    pub donor_id:             DonorId,
    pub fiscal_year:          FiscalYear,
    pub amount_given:         Amount,
    pub gift_count:           u32,
    pub churn:                u8,
    pub censored:             bool,
    pub simple_velocity:      Amount,
    pub rolling_velocity:     Amount,
    pub simple_acceleration:  Amount,
    pub rolling_acceleration: Amount,
}

type Key = (DonorId, FiscalYear);

/// Join grid, labels, velocities, and accelerations on (donor, year).
///
/// Output is sorted by (donor, year) with exactly one row per grid
/// key. Non-finite ratios are filled with 0 here.
pub fn assemble(
    grids: &[DonorGrid],
    labels: &[ChurnLabel],
    velocities: &[VelocityRecord],
    accelerations: &[AccelerationRecord],
) -> PanelResult<Vec<FeaturePanelRow>> {
    let mut label_map: HashMap<Key, &ChurnLabel> = HashMap::with_capacity(labels.len());
    for label in labels {
        label_map.insert((label.donor_id, label.fiscal_year), label);
    }
    let mut velocity_map: HashMap<Key, &VelocityRecord> =
        HashMap::with_capacity(velocities.len());
    for velocity in velocities {
        velocity_map.insert((velocity.donor_id, velocity.fiscal_year), velocity);
    }
    let mut accel_map: HashMap<Key, &AccelerationRecord> =
        HashMap::with_capacity(accelerations.len());
    for accel in accelerations {
        accel_map.insert((accel.donor_id, accel.fiscal_year), accel);
    }

    let mut panel = Vec::new();

    for grid in grids {
        for row in grid.rows() {
            let key = (row.donor_id, row.fiscal_year);
            let label = label_map
                .remove(&key)
                .ok_or(missing(key, "churn_labels"))?;
            let velocity = velocity_map
                .remove(&key)
                .ok_or(missing(key, "velocities"))?;
            let accel = accel_map
                .remove(&key)
                .ok_or(missing(key, "accelerations"))?;

            panel.push(FeaturePanelRow {
                donor_id:             row.donor_id,
                fiscal_year:          row.fiscal_year,
                amount_given:         row.amount_given,
                gift_count:           row.gift_count,
                churn:                label.churn,
                censored:             label.censored,
                simple_velocity:      fill_zero(velocity.simple_velocity),
                rolling_velocity:     fill_zero(velocity.rolling_velocity),
                simple_acceleration:  fill_zero(accel.simple_acceleration),
                rolling_acceleration: fill_zero(accel.rolling_acceleration),
            });
        }
    }

    // Leftover keys mean a derived table covered more than the grid.
    if let Some(key) = label_map.keys().next() {
        return Err(missing(*key, "grid (extra churn label)"));
    }
    if let Some(key) = velocity_map.keys().next() {
        return Err(missing(*key, "grid (extra velocity)"));
    }
    if let Some(key) = accel_map.keys().next() {
        return Err(missing(*key, "grid (extra acceleration)"));
    }

    panel.sort_by_key(|row| (row.donor_id, row.fiscal_year));
    Ok(panel)
}

fn missing((donor_id, fiscal_year): Key, table: &'static str) -> PanelError {
    PanelError::MissingGridEntry { donor_id, fiscal_year, table }
}

fn fill_zero(value: Amount) -> Amount {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
