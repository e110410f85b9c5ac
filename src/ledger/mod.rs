//! Trip financial ledger.
//!
//! Pure arithmetic over trip and payment records: per-trip derivation of
//! pending/commission/profit/income, aggregation across trip sets, and
//! running balances for dealers and drivers. Nothing here touches the store.

pub mod balance;
pub mod summary;
pub mod trip;

use serde::Serialize;

pub use balance::{dealer_ledger, driver_ledger, PartyLedger};
pub use summary::{
    activity, breakdown, group_by_day, monthly, ActivityPoint, GroupBy, LedgerSummary, TripFilter,
    YearSummary,
};
pub use trip::TripFigures;

/// Which amount the driver's commission is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionBase {
    /// `amount_received` minus all expenses, floored at zero.
    Net,
    /// `total_sale`, unclamped.
    Gross,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerSettings {
    pub commission_rate: f64,
    pub commission_base: CommissionBase,
    pub maintenance_threshold_km: f64,
    pub tyre_lifespan_km: f64,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            commission_rate: 0.1,
            commission_base: CommissionBase::Net,
            maintenance_threshold_km: 4000.0,
            tyre_lifespan_km: 50_000.0,
        }
    }
}

pub fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid reporting -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Sums amounts in whole cents so long ledgers don't drift.
pub fn sum_cents<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let cents: i64 = values.into_iter().map(|v| (v * 100.0).round() as i64).sum();
    cents as f64 / 100.0
}
