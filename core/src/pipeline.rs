//! The feature pipeline — stage wiring and execution order.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Year aggregation     (ledger → one row per donor-year)
//!   2. Grid completion      (sparse rows → gap-free donor grids)
//!   3. Churn labeling       (per grid)
//!   4. Velocity             (per grid)
//!   5. Acceleration         (per donor velocity sequence)
//!   6. Panel assembly       (total join on donor-year)
//!
//! RULES:
//!   - Every stage is a pure function of the prior stage's output.
//!   - Nothing here draws randomness or touches disk or network.
//!   - Per-donor work (stages 2–5) depends only on that donor's rows.

use crate::{
    accel::{compute_accelerations, AccelerationRecord},
    aggregate::aggregate_by_year,
    churn::{label_grid, ChurnLabel},
    config::PanelConfig,
    error::PanelResult,
    grid::{complete_grids, DonorGrid},
    ledger::GivingLedger,
    panel::{assemble, FeaturePanelRow},
    velocity::{compute_velocities, VelocityRecord},
};

pub struct FeaturePipeline {
    config: PanelConfig,
}

impl FeaturePipeline {
    pub fn new(config: PanelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Run the full pipeline and hand the finished panel to the caller.
    /// Deterministic: the same ledger and config always produce a
    /// bit-identical panel.
    pub fn run(&self, ledger: &GivingLedger) -> PanelResult<Vec<FeaturePanelRow>> {
        let records = aggregate_by_year(ledger);
        log::info!(
            "aggregated {} transactions into {} donor-year rows",
            ledger.len(),
            records.len()
        );

        let grids = complete_grids(&records, self.config.panel_end_year)?;
        let grid_rows: usize = grids.iter().map(|g| g.rows().len()).sum();
        log::info!(
            "completed {} donor grids through FY{} ({} rows)",
            grids.len(),
            self.config.panel_end_year,
            grid_rows
        );

        let mut labels: Vec<ChurnLabel> = Vec::with_capacity(grid_rows);
        let mut velocities: Vec<VelocityRecord> = Vec::with_capacity(grid_rows);
        let mut accelerations: Vec<AccelerationRecord> = Vec::with_capacity(grid_rows);

        for grid in &grids {
            labels.extend(label_grid(grid, self.config.final_year_policy));
            let donor_velocities = compute_velocities(grid, &self.config);
            accelerations.extend(compute_accelerations(&donor_velocities));
            velocities.extend(donor_velocities);
            log::debug!(
                "donor {}: grid {}..={}",
                grid.donor_id,
                grid.first_gift_year,
                grid.last_year()
            );
        }

        let panel = assemble(&grids, &labels, &velocities, &accelerations)?;
        log::info!("assembled feature panel: {} rows", panel.len());
        Ok(panel)
    }

    /// Aggregate and grid-complete only. Exposed for consumers that
    /// want the raw grid without derived features.
    pub fn complete_grid_only(&self, ledger: &GivingLedger) -> PanelResult<Vec<DonorGrid>> {
        let records = aggregate_by_year(ledger);
        complete_grids(&records, self.config.panel_end_year)
    }
}
