// src/repository.rs
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::store::{Collection, DocumentStore, StoredDocument};

/// An entity persisted as one document of a collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;
    /// Human name used in error messages ("Driver not found").
    const LABEL: &'static str;
}

/// A stored entity together with its store-assigned metadata.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Record<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub data: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T: Document> Record<T> {
    fn from_stored(stored: StoredDocument) -> Result<Self, AppError> {
        Ok(Self {
            id: stored.id,
            data: serde_json::from_value(stored.doc)?,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }
}

/// Typed create/read/update/delete over one collection.
pub struct Repository<'a, T> {
    store: &'a dyn DocumentStore,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Document> Repository<'a, T> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store, _entity: PhantomData }
    }

    pub async fn list(&self) -> Result<Vec<Record<T>>, AppError> {
        self.store
            .list(T::COLLECTION)
            .await?
            .into_iter()
            .map(Record::from_stored)
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Record<T>>, AppError> {
        self.store
            .get(T::COLLECTION, id)
            .await?
            .map(Record::from_stored)
            .transpose()
    }

    /// Like [`Repository::get`] but a missing id is a not-found error.
    pub async fn require(&self, id: Uuid) -> Result<Record<T>, AppError> {
        self.get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} not found", T::LABEL)))
    }

    pub async fn find_by(&self, field: &str, value: &str) -> Result<Vec<Record<T>>, AppError> {
        self.store
            .find_by_field(T::COLLECTION, field, value)
            .await?
            .into_iter()
            .map(Record::from_stored)
            .collect()
    }

    pub async fn insert(&self, data: T) -> Result<Record<T>, AppError> {
        let doc = serde_json::to_value(&data)?;
        let stored = self.store.insert(T::COLLECTION, doc).await?;
        Ok(Record {
            id: stored.id,
            data,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }

    pub async fn replace(&self, id: Uuid, data: T) -> Result<Record<T>, AppError> {
        let doc = serde_json::to_value(&data)?;
        let stored = self
            .store
            .replace(T::COLLECTION, id, doc)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} not found", T::LABEL)))?;
        Ok(Record {
            id: stored.id,
            data,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.store.delete(T::COLLECTION, id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("{} not found", T::LABEL)))
        }
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.store.count(T::COLLECTION).await
    }
}

/// Parses a path id, reporting a malformed one as a validation error.
pub fn parse_id(raw: &str, label: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::validation(format!("Valid {} ID is required", label.to_lowercase())))
}
