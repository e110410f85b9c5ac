// src/maintenance.rs
use serde::{Deserialize, Serialize};

use crate::models::truck::Truck;

/// Service state of one truck against the maintenance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaintenanceCheck {
    pub kms_since_oil: f64,
    pub kms_since_tyre: f64,
    pub oil_due: bool,
    pub tyre_due: bool,
}

impl MaintenanceCheck {
    pub fn any_due(&self) -> bool {
        self.oil_due || self.tyre_due
    }
}

pub fn check(truck: &Truck, threshold_km: f64) -> MaintenanceCheck {
    let kms_since_oil = truck.current_mileage - truck.last_oil_change_at;
    let kms_since_tyre = truck.current_mileage - truck.last_tyre_change_at;
    MaintenanceCheck {
        kms_since_oil,
        kms_since_tyre,
        oil_due: kms_since_oil >= threshold_km,
        tyre_due: kms_since_tyre >= threshold_km,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Oil,
    Tyre,
}

/// Marks a service as done at the truck's current mileage.
pub fn record_service(truck: &mut Truck, kind: ServiceKind) {
    match kind {
        ServiceKind::Oil => truck.last_oil_change_at = truck.current_mileage,
        ServiceKind::Tyre => truck.last_tyre_change_at = truck.current_mileage,
    }
}

pub const TYRE_CRITICAL_PCT: f64 = 90.0;
pub const TYRE_REPLACE_PCT: f64 = 80.0;

/// Share of a tyre's rated lifespan already driven, 0..=100.
pub fn tyre_usage_pct(starting_odometer: f64, current_odometer: f64, lifespan_km: f64) -> f64 {
    if lifespan_km <= 0.0 {
        return 0.0;
    }
    let driven = (current_odometer - starting_odometer).max(0.0);
    let pct = (driven / lifespan_km * 100.0).min(100.0);
    (pct * 10.0).round() / 10.0
}

pub fn tyre_status(usage_pct: f64) -> &'static str {
    if usage_pct >= TYRE_CRITICAL_PCT {
        "Critical"
    } else if usage_pct > TYRE_REPLACE_PCT {
        "Needs Replacement"
    } else {
        "OK"
    }
}
