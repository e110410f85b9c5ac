use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient;
use crate::error::AppError;
use crate::ledger::{LedgerSettings, LedgerSummary, TripFigures};
use crate::models::trip::Trip;
use crate::repository::Record;

/// Create/replace payload. Derived money fields are never taken from the
/// client, except `amount_pending` which overrides the computed value.
#[derive(Debug, Deserialize)]
pub struct TripRequest {
    #[serde(default, deserialize_with = "lenient::opt_uuid")]
    pub driver_id: Option<Uuid>,
    #[serde(default, deserialize_with = "lenient::opt_uuid")]
    pub truck_id: Option<Uuid>,
    #[serde(default, deserialize_with = "lenient::opt_uuid")]
    pub dealer_id: Option<Uuid>,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub pickup_city: String,
    #[serde(default)]
    pub dropoff_city: String,

    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_sale: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub amount_received: f64,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub amount_pending: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub expenses: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub fuel_cost: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub other_expenses: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub kilometres: f64,
}

impl TripRequest {
    /// Validates the payload and runs the ledger derivation over it. Trips
    /// without a date are recorded on `today`.
    pub fn into_trip(self, settings: &LedgerSettings, today: NaiveDate) -> Result<Trip, AppError> {
        let (Some(driver_id), Some(truck_id)) = (self.driver_id, self.truck_id) else {
            return Err(AppError::validation("Driver and truck are required"));
        };

        let amounts = [
            ("total_sale", self.total_sale),
            ("amount_received", self.amount_received),
            ("expenses", self.expenses),
            ("fuel_cost", self.fuel_cost),
            ("other_expenses", self.other_expenses),
            ("kilometres", self.kilometres),
        ];
        if let Some((field, _)) = amounts.iter().find(|(_, v)| *v < 0.0) {
            return Err(AppError::validation(format!("{field} cannot be negative")));
        }

        let derived = settings.derive(&TripFigures {
            total_sale: self.total_sale,
            amount_received: self.amount_received,
            expenses: self.expenses,
            fuel_cost: self.fuel_cost,
            other_expenses: self.other_expenses,
            amount_pending: self.amount_pending,
        });
        if !derived.is_finite() {
            return Err(AppError::validation("Trip amounts are too large"));
        }

        Ok(Trip {
            driver_id,
            truck_id,
            dealer_id: self.dealer_id,
            date: self.date.unwrap_or(today),
            pickup_city: self.pickup_city.trim().to_string(),
            dropoff_city: self.dropoff_city.trim().to_string(),
            total_sale: self.total_sale,
            amount_received: self.amount_received,
            expenses: self.expenses,
            fuel_cost: self.fuel_cost,
            other_expenses: self.other_expenses,
            kilometres: self.kilometres,
            amount_pending: derived.amount_pending,
            total_income: derived.total_income,
            driver_commission: derived.driver_commission,
            company_profit: derived.company_profit,
        })
    }
}

/// Trip with the names of the records it references. A reference to a
/// deleted record renders as an empty label.
#[derive(Debug, Clone, Serialize)]
pub struct TripResponse {
    #[serde(flatten)]
    pub trip: Record<Trip>,
    pub driver_name: String,
    pub truck_number: String,
    pub dealer_name: String,
}

#[derive(Debug, Serialize)]
pub struct DayBucketResponse {
    pub day: NaiveDate,
    pub summary: LedgerSummary,
    pub trips: Vec<TripResponse>,
}

#[derive(Debug, Serialize)]
pub struct TripSummaryResponse {
    pub summary: LedgerSummary,
    pub days: Vec<DayBucketResponse>,
}
