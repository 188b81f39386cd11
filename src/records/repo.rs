use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::warn;

use crate::records::repo_types::{NewRecord, UserRecord};

/// Store outcome, independent of the driver behind it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated ({})", constraint.as_deref().unwrap_or("unknown"))]
    UniqueViolation { constraint: Option<String> },
    #[error("{0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return StoreError::UniqueViolation {
                    constraint: db.constraint().map(str::to_owned),
                };
            }
        }
        StoreError::Backend(Box::new(e))
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts one record atomically. Uniqueness of email and fingerprint is
    /// checked by the store as part of the insert.
    async fn insert(&self, record: &NewRecord) -> Result<UserRecord, StoreError>;
    /// All records, newest id first.
    async fn list_all(&self) -> Result<Vec<UserRecord>, StoreError>;
}

#[derive(Clone)]
pub struct PgRecordStore {
    db: PgPool,
}

impl PgRecordStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, record: &NewRecord) -> Result<UserRecord, StoreError> {
        let mut tx = self.db.begin().await?;

        let inserted = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email, phone, data_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, created_at
            "#,
        )
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.fingerprint)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(row) => {
                tx.commit().await?;
                Ok(row)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "rollback after failed insert");
                }
                Err(e.into())
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, phone, created_at
            FROM users
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
