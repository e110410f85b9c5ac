use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{error, instrument};
use uuid::Uuid;

use super::{Collection, DocumentStore, StoredDocument};
use crate::error::AppError;

const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed store: one table per collection, each row a JSONB document.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    doc: Json<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            doc: row.doc.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps unique-index violations onto the collection's duplicate message.
fn map_write_error(collection: Collection, err: sqlx::Error) -> AppError {
    if let Some(db) = err.as_database_error() {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db.constraint().unwrap_or_default();
            let message = collection
                .unique_fields()
                .iter()
                .find(|(field, _)| constraint.contains(field))
                .map(|(_, message)| *message)
                .unwrap_or("Duplicate entry");
            return AppError::duplicate(message);
        }
    }
    error!(?err, table = collection.table(), "document write failed");
    AppError::db(err)
}

#[async_trait]
impl DocumentStore for PgStore {
    #[instrument(skip(self))]
    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, AppError> {
        let sql = format!(
            "SELECT id, doc, created_at, updated_at FROM {} ORDER BY created_at ASC, id ASC",
            collection.table()
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    #[instrument(skip(self))]
    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, AppError> {
        let sql = format!(
            "SELECT id, doc, created_at, updated_at FROM {} WHERE id = $1",
            collection.table()
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(StoredDocument::from))
    }

    #[instrument(skip(self))]
    async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<StoredDocument>, AppError> {
        let sql = format!(
            "SELECT id, doc, created_at, updated_at FROM {} WHERE doc->>$1 = $2 ORDER BY created_at ASC, id ASC",
            collection.table()
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(field)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    #[instrument(skip(self, doc))]
    async fn insert(&self, collection: Collection, doc: Value) -> Result<StoredDocument, AppError> {
        let sql = format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2) RETURNING id, doc, created_at, updated_at",
            collection.table()
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(Json(doc))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, e))?;
        Ok(row.into())
    }

    #[instrument(skip(self, doc))]
    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        doc: Value,
    ) -> Result<Option<StoredDocument>, AppError> {
        let sql = format!(
            "UPDATE {} SET doc = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING id, doc, created_at, updated_at",
            collection.table()
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .bind(Json(doc))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, e))?;
        Ok(row.map(StoredDocument::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self, collection: Collection) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", collection.table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    #[instrument(skip(self, fields))]
    async fn merge_fields(
        &self,
        collection: Collection,
        id: Option<Uuid>,
        fields: Map<String, Value>,
    ) -> Result<u64, AppError> {
        let sql = format!(
            "UPDATE {} SET doc = doc || $1, updated_at = NOW() WHERE ($2::UUID IS NULL OR id = $2)",
            collection.table()
        );
        let result = sqlx::query(&sql)
            .bind(Json(Value::Object(fields)))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, e))?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
