use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::error::AppError;
use crate::ledger::{round_cents, PartyLedger};
use crate::repository::Record;

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

impl PaymentRequest {
    /// The amount rounded to cents. A payment that rounds to nothing is
    /// rejected.
    pub fn validated_amount(&self) -> Result<f64, AppError> {
        let amount = round_cents(self.amount);
        if amount <= 0.0 {
            return Err(AppError::validation("Amount must be greater than 0"));
        }
        Ok(amount)
    }
}

/// A party's ledger along with the party record itself.
#[derive(Debug, Serialize)]
pub struct PartyLedgerResponse<T> {
    pub party: Record<T>,
    #[serde(flatten)]
    pub ledger: PartyLedger,
}
