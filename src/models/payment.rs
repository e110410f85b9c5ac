use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::Document;
use crate::store::Collection;

/// Who a payment settles against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Dealer,
    Driver,
}

/// Money settled outside of a trip: a dealer paying down its bill, or the
/// company paying out driver commission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub party: Party,
    pub party_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

impl Document for Payment {
    const COLLECTION: Collection = Collection::Payments;
    const LABEL: &'static str = "Payment";
}
