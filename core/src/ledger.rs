//! The raw giving ledger — the only externally supplied input.
//!
//! RULE: every transaction is validated at ingestion. A negative or
//! non-finite amount, or a non-positive fiscal year, is rejected as
//! InvalidTransaction, never coerced. Everything downstream assumes a
//! clean ledger.

use crate::{
    error::{PanelError, PanelResult},
    types::{Amount, DonorId, FiscalYear},
};
use serde::{Deserialize, Serialize};

/// A single gift. Multiple transactions may share (donor, fiscal year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub donor_id:    DonorId,
    pub fiscal_year: FiscalYear,
    pub amount:      Amount,
}

/// A validated, immutable set of transactions.
#[derive(Debug, Clone)]
pub struct GivingLedger {
    transactions: Vec<Transaction>,
}

impl GivingLedger {
    /// Validate and take ownership of a transaction set.
    pub fn new(transactions: Vec<Transaction>) -> PanelResult<Self> {
        for txn in &transactions {
            validate(txn)?;
        }
        Ok(Self { transactions })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

fn validate(txn: &Transaction) -> PanelResult<()> {
    if !txn.amount.is_finite() {
        return Err(PanelError::InvalidTransaction {
            donor_id: txn.donor_id,
            reason:   format!("non-finite amount {}", txn.amount),
        });
    }
    if txn.amount < 0.0 {
        return Err(PanelError::InvalidTransaction {
            donor_id: txn.donor_id,
            reason:   format!("negative amount {:.2}", txn.amount),
        });
    }
    if txn.fiscal_year <= 0 {
        return Err(PanelError::InvalidTransaction {
            donor_id: txn.donor_id,
            reason:   format!("fiscal year {} out of range", txn.fiscal_year),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_positive_amounts() {
        let ledger = GivingLedger::new(vec![
            Transaction { donor_id: 1000, fiscal_year: 2018, amount: 0.0 },
            Transaction { donor_id: 1000, fiscal_year: 2019, amount: 250.50 },
        ])
        .unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn rejects_negative_amount() {
        let result = GivingLedger::new(vec![Transaction {
            donor_id:    1001,
            fiscal_year: 2018,
            amount:      -5.0,
        }]);
        assert!(matches!(
            result,
            Err(PanelError::InvalidTransaction { donor_id: 1001, .. })
        ));
    }

    #[test]
    fn rejects_nan_amount() {
        let result = GivingLedger::new(vec![Transaction {
            donor_id:    1002,
            fiscal_year: 2018,
            amount:      f64::NAN,
        }]);
        assert!(matches!(result, Err(PanelError::InvalidTransaction { .. })));
    }

    #[test]
    fn rejects_nonpositive_fiscal_year() {
        let result = GivingLedger::new(vec![Transaction {
            donor_id:    1003,
            fiscal_year: 0,
            amount:      10.0,
        }]);
        assert!(matches!(result, Err(PanelError::InvalidTransaction { .. })));
    }
}
