//! Giving acceleration — first difference of each velocity.
//!
//! Not a true derivative, but the closest this panel gets: change in
//! velocity over the smallest time step the data has, one year.
//! Differences are taken within a donor's own year-ordered sequence,
//! never across donors.

use crate::{
    types::{Amount, DonorId, FiscalYear},
    velocity::VelocityRecord,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelerationRecord {
    pub donor_id:             DonorId,
    pub fiscal_year:          FiscalYear,
    pub simple_acceleration:  Amount,
    pub rolling_acceleration: Amount,
}

/// Differentiate one donor's velocity sequence.
///
/// `velocities` must be that donor's records in year order, as
/// `compute_velocities` emits them. The first year has no predecessor
/// and is defined as 0 for both kinds, not omitted. An undefined
/// (non-finite) velocity enters the difference as 0 — the same value
/// the assembler fills it to in the panel — so the first year with a
/// defined velocity accelerates from 0 rather than from NaN.
pub fn compute_accelerations(velocities: &[VelocityRecord]) -> Vec<AccelerationRecord> {
    velocities
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let (simple, rolling) = if i == 0 {
                (0.0, 0.0)
            } else {
                let prev = &velocities[i - 1];
                (
                    filled(v.simple_velocity) - filled(prev.simple_velocity),
                    filled(v.rolling_velocity) - filled(prev.rolling_velocity),
                )
            };
            AccelerationRecord {
                donor_id:             v.donor_id,
                fiscal_year:          v.fiscal_year,
                simple_acceleration:  simple,
                rolling_acceleration: rolling,
            }
        })
        .collect()
}

fn filled(velocity: Amount) -> Amount {
    if velocity.is_finite() {
        velocity
    } else {
        0.0
    }
}
