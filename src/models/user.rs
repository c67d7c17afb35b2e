use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account as held by the record store.
///
/// `password_hash` always holds a bcrypt digest, never plaintext. The type is
/// deliberately not `Serialize` so it cannot end up in a response body.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    /// Assigned at creation, immutable for the account's lifetime.
    pub id: Uuid,
    /// Unique, compared case-sensitively.
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new `Account` with a fresh random identity.
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
