use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::ledger::LedgerSummary;
use crate::models::dealer::Dealer;
use crate::repository::Record;

#[derive(Debug, Deserialize)]
pub struct DealerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl DealerRequest {
    pub fn into_dealer(self) -> Result<Dealer, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Dealer name is required"));
        }
        Ok(Dealer {
            name: name.to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}

/// Dealer with its trip totals computed from the trips that reference it.
#[derive(Debug, Serialize)]
pub struct DealerResponse {
    #[serde(flatten)]
    pub dealer: Record<Dealer>,
    pub total_trips: usize,
    pub total_business: f64,
    pub total_pending: f64,
}

impl DealerResponse {
    pub fn new(dealer: Record<Dealer>, summary: Option<&LedgerSummary>) -> Self {
        let summary = summary.cloned().unwrap_or_default();
        Self {
            dealer,
            total_trips: summary.trip_count,
            total_business: summary.total_bill,
            total_pending: summary.amount_pending,
        }
    }
}
