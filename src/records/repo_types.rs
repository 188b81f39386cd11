use sqlx::FromRow;
use time::PrimitiveDateTime;

/// A row of the `users` table as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: PrimitiveDateTime,
}

/// Values handed to the store for a single insert. Fields are stored as
/// submitted; only `fingerprint` is derived.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub fingerprint: String,
}
