use serde::{Deserialize, Serialize};

use crate::repository::Document;
use crate::store::Collection;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TruckStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Truck {
    pub number: String,
    pub model: String,
    /// Tons.
    #[serde(default)]
    pub capacity: f64,
    #[serde(default)]
    pub status: TruckStatus,
    #[serde(default)]
    pub current_mileage: f64,
    #[serde(default)]
    pub last_oil_change_at: f64,
    #[serde(default)]
    pub last_tyre_change_at: f64,
}

impl Document for Truck {
    const COLLECTION: Collection = Collection::Trucks;
    const LABEL: &'static str = "Truck";
}

/// Stored field names reset by a mileage clear.
pub const MILEAGE_FIELDS: [&str; 3] = ["current_mileage", "last_oil_change_at", "last_tyre_change_at"];
