//! Record store contract consumed by the authentication core and the task handlers.
//!
//! The core holds no mutable state of its own; accounts and tasks live behind
//! this trait. Implementations must make account creation atomic with respect
//! to email uniqueness and report a collision as [`StoreError::DuplicateKey`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

use crate::models::{Account, Task};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The addressed record does not exist.
    NotFound,
    /// A uniqueness constraint rejected the write.
    DuplicateKey,
    /// Any other backend failure.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "record not found"),
            StoreError::DuplicateKey => write!(f, "duplicate key"),
            StoreError::Backend(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

#[async_trait]
pub trait Store: Send + Sync {
    /// Exact, case-sensitive match on email. `Ok(None)` when no account exists.
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Fails with `DuplicateKey` if the email is already taken.
    async fn create_account(&self, account: &Account) -> Result<(), StoreError>;

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    async fn create_task(&self, task: &Task) -> Result<(), StoreError>;

    /// Persists title, description, completion and `updated_at`. The owner is never rewritten.
    async fn update_task(&self, task: &Task) -> Result<(), StoreError>;

    async fn delete_task(&self, id: Uuid) -> Result<(), StoreError>;

    /// Tasks owned by `owner`, newest first.
    async fn list_tasks_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, StoreError>;
}
