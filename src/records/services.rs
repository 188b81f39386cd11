use thiserror::Error;
use tracing::{error, info, warn};

use crate::records::fingerprint::fingerprint;
use crate::records::repo::{RecordStore, StoreError};
use crate::records::repo_types::{NewRecord, UserRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("{0} is required")]
    InvalidInput(&'static str),
    #[error("duplicate or redundant record")]
    DuplicateRecord,
    #[error("{0}")]
    Persistence(String),
}

impl From<StoreError> for RecordError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation { .. } => RecordError::DuplicateRecord,
            StoreError::Backend(source) => RecordError::Persistence(source.to_string()),
        }
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, RecordError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RecordError::InvalidInput(field)),
    }
}

/// Validates, fingerprints and inserts one record.
///
/// Fields are checked in the order name, email, phone; the first missing one
/// is reported. Nothing reaches the store unless all three are present.
pub async fn submit(
    store: &dyn RecordStore,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Result<UserRecord, RecordError> {
    let name = required("name", name)?;
    let email = required("email", email)?;
    let phone = required("phone", phone)?;

    let record = NewRecord {
        fingerprint: fingerprint(&name, &email, &phone),
        name,
        email,
        phone,
    };

    match store.insert(&record).await {
        Ok(user) => {
            info!(user_id = user.id, "record added");
            Ok(user)
        }
        Err(StoreError::UniqueViolation { constraint }) => {
            warn!(
                constraint = constraint.as_deref().unwrap_or("unknown"),
                "duplicate record rejected"
            );
            Err(RecordError::DuplicateRecord)
        }
        Err(e) => {
            error!(error = %e, "insert record failed");
            Err(e.into())
        }
    }
}

pub async fn list_all(store: &dyn RecordStore) -> Result<Vec<UserRecord>, RecordError> {
    store.list_all().await.map_err(|e| {
        error!(error = %e, "list records failed");
        RecordError::from(e)
    })
}
