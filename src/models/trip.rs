use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::Document;
use crate::store::Collection;

/// One recorded haul. The last four money fields are derived by the ledger
/// on every write; a document missing any figure reads it as zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub driver_id: Uuid,
    pub truck_id: Uuid,
    #[serde(default)]
    pub dealer_id: Option<Uuid>,
    pub date: NaiveDate,
    #[serde(default)]
    pub pickup_city: String,
    #[serde(default)]
    pub dropoff_city: String,

    #[serde(default)]
    pub total_sale: f64,
    #[serde(default)]
    pub amount_received: f64,
    #[serde(default)]
    pub expenses: f64,
    #[serde(default)]
    pub fuel_cost: f64,
    #[serde(default)]
    pub other_expenses: f64,
    #[serde(default)]
    pub kilometres: f64,

    #[serde(default)]
    pub amount_pending: f64,
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub driver_commission: f64,
    #[serde(default)]
    pub company_profit: f64,
}

impl Trip {
    pub fn combined_expenses(&self) -> f64 {
        self.expenses + self.fuel_cost + self.other_expenses
    }
}

impl Document for Trip {
    const COLLECTION: Collection = Collection::Trips;
    const LABEL: &'static str = "Trip";
}
