use serde::{Deserialize, Serialize};

use crate::repository::Document;
use crate::store::Collection;

/// Billing counterparty. Trip and payment totals are derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dealer {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl Document for Dealer {
    const COLLECTION: Collection = Collection::Dealers;
    const LABEL: &'static str = "Dealer";
}
