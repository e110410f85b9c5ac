use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{ActivityPoint, GroupBy, LedgerSummary};

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub drivers: i64,
    pub trucks: i64,
    /// Sum of trip bills.
    pub income: f64,
    /// Sum of all trip expenses.
    pub expense: f64,
    pub pending: f64,
    pub mileage: f64,
    pub activity: Vec<ActivityPoint>,
}

#[derive(Debug, Deserialize)]
pub struct DayLedgerQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct DayLedgerResponse {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub summary: LedgerSummary,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    pub year: Option<i32>,
}

/// Read alongside a [`crate::ledger::TripFilter`] from the same query string.
#[derive(Debug, Deserialize)]
pub struct BreakdownQuery {
    pub by: GroupBy,
}

#[derive(Debug, Serialize)]
pub struct BreakdownRow {
    pub id: Uuid,
    /// Blank when the party has been deleted.
    pub label: String,
    #[serde(flatten)]
    pub summary: LedgerSummary,
}
