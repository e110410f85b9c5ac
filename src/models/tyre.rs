use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::Document;
use crate::store::Collection;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tyre {
    pub truck_id: Uuid,
    pub serial: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub purchase_price: f64,
    #[serde(default)]
    pub installed_date: Option<NaiveDate>,
    #[serde(default)]
    pub starting_odometer: f64,
    #[serde(default)]
    pub current_odometer: f64,
    pub status: String,
    #[serde(default)]
    pub usage_pct: f64,
}

impl Document for Tyre {
    const COLLECTION: Collection = Collection::Tyres;
    const LABEL: &'static str = "Tyre";
}
