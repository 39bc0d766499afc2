use crate::types::{DonorId, FiscalYear};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Invalid transaction for donor {donor_id}: {reason}")]
    InvalidTransaction { donor_id: DonorId, reason: String },

    #[error("Donor {donor_id} has no transaction history")]
    EmptyDonorHistory { donor_id: DonorId },

    #[error("Grid entry (donor {donor_id}, fiscal year {fiscal_year}) missing from {table}")]
    MissingGridEntry {
        donor_id:    DonorId,
        fiscal_year: FiscalYear,
        table:       &'static str,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PanelResult<T> = Result<T, PanelError>;
