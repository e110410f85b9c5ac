//! Document storage.
//!
//! Every entity lives in its own collection as a JSON document keyed by a
//! generated UUID. [`DocumentStore`] is the only seam between handlers and the
//! backing database; the typed layer on top of it is
//! [`crate::repository::Repository`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::AppError;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Dealers,
    Drivers,
    Trucks,
    Tyres,
    Trips,
    Payments,
}

impl Collection {
    /// Table backing the collection. Only ever one of these fixed names is
    /// interpolated into SQL.
    pub fn table(self) -> &'static str {
        match self {
            Collection::Dealers => "dealers",
            Collection::Drivers => "drivers",
            Collection::Trucks => "trucks",
            Collection::Tyres => "tyres",
            Collection::Trips => "trips",
            Collection::Payments => "payments",
        }
    }

    /// Document fields that must be unique within the collection, with the
    /// message returned when a write would violate that.
    pub fn unique_fields(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Collection::Drivers => &[("license_no", "License number already exists")],
            Collection::Trucks => &[("number", "Truck number already exists")],
            _ => &[],
        }
    }
}

/// A raw document as the store holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub doc: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection, oldest first.
    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, AppError>;

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, AppError>;

    /// Documents whose top-level string `field` equals `value`.
    async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<StoredDocument>, AppError>;

    async fn insert(&self, collection: Collection, doc: Value) -> Result<StoredDocument, AppError>;

    /// Replaces the whole document. `None` when the id does not exist.
    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        doc: Value,
    ) -> Result<Option<StoredDocument>, AppError>;

    /// Returns whether a document was removed.
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError>;

    async fn count(&self, collection: Collection) -> Result<i64, AppError>;

    /// Overwrites the given top-level fields on one document (`Some(id)`) or
    /// on every document of the collection (`None`) in a single atomic write.
    /// Returns the number of documents touched.
    async fn merge_fields(
        &self,
        collection: Collection,
        id: Option<Uuid>,
        fields: Map<String, Value>,
    ) -> Result<u64, AppError>;

    async fn ping(&self) -> bool;
}
