use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Collection, DocumentStore, StoredDocument};
use crate::error::AppError;

/// Process-local store used when no database is configured, and by tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    collections: HashMap<Collection, HashMap<Uuid, Entry>>,
}

struct Entry {
    seq: u64,
    stored: StoredDocument,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn check_unique(&self, collection: Collection, id: Uuid, doc: &Value) -> Result<(), AppError> {
        let Some(docs) = self.collections.get(&collection) else {
            return Ok(());
        };
        for (field, message) in collection.unique_fields() {
            let Some(value) = doc.get(*field).and_then(Value::as_str) else {
                continue;
            };
            let taken = docs
                .values()
                .any(|e| e.stored.id != id && e.stored.doc.get(*field).and_then(Value::as_str) == Some(value));
            if taken {
                return Err(AppError::duplicate(*message));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, AppError> {
        let inner = self.inner.read().await;
        let mut entries: Vec<&Entry> = inner
            .collections
            .get(&collection)
            .map(|docs| docs.values().collect())
            .unwrap_or_default();
        entries.sort_by_key(|e| e.seq);
        Ok(entries.into_iter().map(|e| e.stored.clone()).collect())
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .collections
            .get(&collection)
            .and_then(|docs| docs.get(&id))
            .map(|e| e.stored.clone()))
    }

    async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<StoredDocument>, AppError> {
        Ok(self
            .list(collection)
            .await?
            .into_iter()
            .filter(|d| d.doc.get(field).and_then(Value::as_str) == Some(value))
            .collect())
    }

    async fn insert(&self, collection: Collection, doc: Value) -> Result<StoredDocument, AppError> {
        let mut inner = self.inner.write().await;
        let id = Uuid::new_v4();
        inner.check_unique(collection, id, &doc)?;

        let now = Utc::now();
        let stored = StoredDocument { id, doc, created_at: now, updated_at: now };
        inner.next_seq += 1;
        let seq = inner.next_seq;
        inner
            .collections
            .entry(collection)
            .or_default()
            .insert(id, Entry { seq, stored: stored.clone() });
        Ok(stored)
    }

    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        doc: Value,
    ) -> Result<Option<StoredDocument>, AppError> {
        let mut inner = self.inner.write().await;
        let exists = inner
            .collections
            .get(&collection)
            .is_some_and(|docs| docs.contains_key(&id));
        if !exists {
            return Ok(None);
        }
        inner.check_unique(collection, id, &doc)?;

        let entry = inner
            .collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(&id))
            .ok_or_else(|| AppError::internal("document vanished under write lock"))?;
        entry.stored.doc = doc;
        entry.stored.updated_at = Utc::now();
        Ok(Some(entry.stored.clone()))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .collections
            .get_mut(&collection)
            .and_then(|docs| docs.remove(&id))
            .is_some())
    }

    async fn count(&self, collection: Collection) -> Result<i64, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.collections.get(&collection).map_or(0, |docs| docs.len() as i64))
    }

    async fn merge_fields(
        &self,
        collection: Collection,
        id: Option<Uuid>,
        fields: Map<String, Value>,
    ) -> Result<u64, AppError> {
        let mut inner = self.inner.write().await;
        let Some(docs) = inner.collections.get_mut(&collection) else {
            return Ok(0);
        };
        let now = Utc::now();
        let mut touched = 0;
        for entry in docs.values_mut() {
            if id.is_some_and(|id| id != entry.stored.id) {
                continue;
            }
            if let Value::Object(doc) = &mut entry.stored.doc {
                for (key, value) in &fields {
                    doc.insert(key.clone(), value.clone());
                }
            }
            entry.stored.updated_at = now;
            touched += 1;
        }
        Ok(touched)
    }

    async fn ping(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_get_and_list_in_insertion_order() {
        let store = MemoryStore::new();
        let a = store.insert(Collection::Dealers, json!({"name": "A"})).await.unwrap();
        let b = store.insert(Collection::Dealers, json!({"name": "B"})).await.unwrap();

        let fetched = store.get(Collection::Dealers, a.id).await.unwrap().unwrap();
        assert_eq!(fetched.doc["name"], "A");

        let all = store.list(Collection::Dealers).await.unwrap();
        assert_eq!(all.iter().map(|d| d.id).collect::<Vec<_>>(), vec![a.id, b.id]);
        assert_eq!(store.count(Collection::Dealers).await.unwrap(), 2);
        assert_eq!(store.count(Collection::Trips).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unique_fields_are_enforced_on_insert_and_replace() {
        let store = MemoryStore::new();
        let first = store
            .insert(Collection::Drivers, json!({"license_no": "L-1"}))
            .await
            .unwrap();
        let second = store
            .insert(Collection::Drivers, json!({"license_no": "L-2"}))
            .await
            .unwrap();

        let dup = store.insert(Collection::Drivers, json!({"license_no": "L-1"})).await;
        assert!(matches!(dup, Err(AppError::Duplicate(_))));

        let clash = store
            .replace(Collection::Drivers, second.id, json!({"license_no": "L-1"}))
            .await;
        assert!(matches!(clash, Err(AppError::Duplicate(_))));

        // rewriting a document with its own value is fine
        let same = store
            .replace(Collection::Drivers, first.id, json!({"license_no": "L-1", "phone": "1"}))
            .await
            .unwrap();
        assert!(same.is_some());
    }

    #[tokio::test]
    async fn replace_and_delete_report_missing_ids() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4();
        assert!(store.replace(Collection::Trips, missing, json!({})).await.unwrap().is_none());
        assert!(!store.delete(Collection::Trips, missing).await.unwrap());

        let doc = store.insert(Collection::Trips, json!({"kilometres": 10})).await.unwrap();
        assert!(store.delete(Collection::Trips, doc.id).await.unwrap());
        assert!(store.get(Collection::Trips, doc.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn merge_fields_targets_one_or_all() {
        let store = MemoryStore::new();
        let a = store.insert(Collection::Trucks, json!({"number": "A", "current_mileage": 10.0})).await.unwrap();
        store.insert(Collection::Trucks, json!({"number": "B", "current_mileage": 20.0})).await.unwrap();

        let mut zero = Map::new();
        zero.insert("current_mileage".into(), json!(0.0));

        assert_eq!(store.merge_fields(Collection::Trucks, Some(a.id), zero.clone()).await.unwrap(), 1);
        let a_now = store.get(Collection::Trucks, a.id).await.unwrap().unwrap();
        assert_eq!(a_now.doc["current_mileage"], json!(0.0));
        assert_eq!(a_now.doc["number"], "A");

        assert_eq!(store.merge_fields(Collection::Trucks, None, zero).await.unwrap(), 2);
        let found = store.find_by_field(Collection::Trucks, "number", "B").await.unwrap();
        assert_eq!(found[0].doc["current_mileage"], json!(0.0));
    }
}
