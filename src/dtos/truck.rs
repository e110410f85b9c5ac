use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient;
use crate::error::AppError;
use crate::maintenance::{MaintenanceCheck, ServiceKind};
use crate::models::truck::{Truck, TruckStatus};

#[derive(Debug, Deserialize)]
pub struct TruckRequest {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub capacity: f64,
    #[serde(default)]
    pub status: Option<TruckStatus>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub current_mileage: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub last_oil_change_at: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub last_tyre_change_at: f64,
}

impl TruckRequest {
    pub fn into_truck(self) -> Result<Truck, AppError> {
        let number = self.number.trim();
        let model = self.model.trim();
        if number.is_empty() || model.is_empty() {
            return Err(AppError::validation("Truck number and model are required"));
        }
        let readings = [
            ("capacity", self.capacity),
            ("current_mileage", self.current_mileage),
            ("last_oil_change_at", self.last_oil_change_at),
            ("last_tyre_change_at", self.last_tyre_change_at),
        ];
        if let Some((field, _)) = readings.iter().find(|(_, v)| *v < 0.0) {
            return Err(AppError::validation(format!("{field} cannot be negative")));
        }
        Ok(Truck {
            number: number.to_string(),
            model: model.to_uppercase(),
            capacity: self.capacity,
            status: self.status.unwrap_or_default(),
            current_mileage: self.current_mileage,
            last_oil_change_at: self.last_oil_change_at,
            last_tyre_change_at: self.last_tyre_change_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ServiceRequest {
    pub kind: ServiceKind,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearMileageRequest {
    #[serde(default, deserialize_with = "lenient::opt_uuid")]
    pub truck_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ClearMileageResponse {
    pub message: String,
    pub trucks_reset: u64,
}

#[derive(Debug, Serialize)]
pub struct ReminderResponse {
    pub truck_id: Uuid,
    pub number: String,
    pub model: String,
    pub current_mileage: f64,
    #[serde(flatten)]
    pub check: MaintenanceCheck,
}
