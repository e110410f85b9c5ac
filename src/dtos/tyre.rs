use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient;
use crate::error::AppError;
use crate::maintenance::{tyre_status, tyre_usage_pct};
use crate::models::tyre::Tyre;
use crate::repository::Record;

#[derive(Debug, Deserialize)]
pub struct TyreRequest {
    #[serde(default, deserialize_with = "lenient::opt_uuid")]
    pub truck_id: Option<Uuid>,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub purchase_price: f64,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub installed_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub starting_odometer: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub current_odometer: f64,
    #[serde(default)]
    pub status: Option<String>,
}

impl TyreRequest {
    /// Validates the request and derives usage from the odometer readings.
    pub fn into_tyre(self, lifespan_km: f64) -> Result<Tyre, AppError> {
        let serial = self.serial.trim();
        let Some(truck_id) = self.truck_id.filter(|_| !serial.is_empty()) else {
            return Err(AppError::validation("Truck and Serial Number are required"));
        };
        if self.purchase_price < 0.0 {
            return Err(AppError::validation("purchase_price cannot be negative"));
        }
        let usage_pct = tyre_usage_pct(self.starting_odometer, self.current_odometer, lifespan_km);
        let status = self
            .status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| tyre_status(usage_pct).to_string());

        Ok(Tyre {
            truck_id,
            serial: serial.to_string(),
            brand: self.brand.trim().to_string(),
            position: self.position.trim().to_string(),
            purchase_price: self.purchase_price,
            installed_date: self.installed_date,
            starting_odometer: self.starting_odometer,
            current_odometer: self.current_odometer,
            status,
            usage_pct,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TyreResponse {
    #[serde(flatten)]
    pub tyre: Record<Tyre>,
    /// Blank when the truck has been deleted.
    pub truck_number: String,
    pub truck_model: String,
}
