//! Shared primitive types used across the entire pipeline.

/// A stable donor identifier from the source ledger.
pub type DonorId = i64;

/// A fiscal year (July–June accounting year, labeled by its end year).
pub type FiscalYear = i32;

/// A gift amount in dollars.
pub type Amount = f64;
