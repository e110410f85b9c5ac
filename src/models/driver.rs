use serde::{Deserialize, Serialize};

use crate::repository::Document;
use crate::store::Collection;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub full_name: String,
    pub phone: String,
    pub license_no: String,
}

impl Document for Driver {
    const COLLECTION: Collection = Collection::Drivers;
    const LABEL: &'static str = "Driver";
}
