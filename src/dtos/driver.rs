use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::ledger::LedgerSummary;
use crate::models::driver::Driver;
use crate::repository::Record;

#[derive(Debug, Deserialize)]
pub struct DriverRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub license_no: String,
}

impl DriverRequest {
    pub fn into_driver(self) -> Result<Driver, AppError> {
        let (full_name, phone, license_no) =
            (self.full_name.trim(), self.phone.trim(), self.license_no.trim());
        if full_name.is_empty() || phone.is_empty() || license_no.is_empty() {
            return Err(AppError::validation(
                "Full name, phone, and license number are required",
            ));
        }
        Ok(Driver {
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            license_no: license_no.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DriverResponse {
    #[serde(flatten)]
    pub driver: Record<Driver>,
    pub total_trips: usize,
    pub total_commission: f64,
}

impl DriverResponse {
    pub fn new(driver: Record<Driver>, summary: Option<&LedgerSummary>) -> Self {
        Self {
            driver,
            total_trips: summary.map_or(0, |s| s.trip_count),
            total_commission: summary.map_or(0.0, |s| s.driver_commission),
        }
    }
}
