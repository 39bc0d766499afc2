//! SQLite export layer.
//!
//! RULE: Only store.rs talks to the database. The pipeline never
//! touches it; the runner writes the finished panel here so the
//! dashboard and model-scoring collaborators can read one flat table.

use crate::{error::PanelResult, panel::FeaturePanelRow, types::DonorId};
use rusqlite::{params, Connection};

pub struct PanelStore {
    conn: Connection,
}

impl PanelStore {
    /// Open (or create) the export database at `path`.
    pub fn open(path: &str) -> PanelResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PanelResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PanelResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_panel.sql"))?;
        Ok(())
    }

    /// Mint a fresh run identifier.
    pub fn new_run_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    // ── Run ────────────────────────────────────────────────────

    pub fn insert_run(
        &self,
        run_id: &str,
        seed: Option<u64>,
        panel_end_year: i32,
        config_json: &str,
    ) -> PanelResult<()> {
        self.conn.execute(
            "INSERT INTO run (run_id, seed, panel_end_year, config_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                run_id,
                seed.map(|s| s as i64),
                panel_end_year,
                config_json,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    // ── Feature panel ──────────────────────────────────────────

    /// Write the whole panel for a run in one transaction.
    pub fn insert_panel(&mut self, run_id: &str, rows: &[FeaturePanelRow]) -> PanelResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO feature_panel
                 (run_id, donor_id, fiscal_year, amount_given, gift_count,
                  churn, censored, simple_velocity, rolling_velocity,
                  simple_acceleration, rolling_acceleration)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(params![
                    run_id,
                    row.donor_id,
                    row.fiscal_year,
                    row.amount_given,
                    row.gift_count,
                    row.churn,
                    row.censored,
                    row.simple_velocity,
                    row.rolling_velocity,
                    row.simple_acceleration,
                    row.rolling_acceleration,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn panel_row_count(&self, run_id: &str) -> PanelResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM feature_panel WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Read a run's panel back, sorted by (donor, year).
    pub fn fetch_panel(&self, run_id: &str) -> PanelResult<Vec<FeaturePanelRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT donor_id, fiscal_year, amount_given, gift_count,
                    churn, censored, simple_velocity, rolling_velocity,
                    simple_acceleration, rolling_acceleration
             FROM feature_panel WHERE run_id = ?1
             ORDER BY donor_id ASC, fiscal_year ASC",
        )?;
        let rows = stmt
            .query_map(params![run_id], |row| {
                Ok(FeaturePanelRow {
                    donor_id:             row.get::<_, DonorId>(0)?,
                    fiscal_year:          row.get(1)?,
                    amount_given:         row.get(2)?,
                    gift_count:           row.get(3)?,
                    churn:                row.get(4)?,
                    censored:             row.get(5)?,
                    simple_velocity:      row.get(6)?,
                    rolling_velocity:     row.get(7)?,
                    simple_acceleration:  row.get(8)?,
                    rolling_acceleration: row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
