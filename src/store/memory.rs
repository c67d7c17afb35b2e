use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{Account, Task};

#[derive(Default)]
struct Accounts {
    by_id: HashMap<Uuid, Account>,
    id_by_email: HashMap<String, Uuid>,
}

/// Process-local store used when no database is configured, and by the tests.
#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<Accounts>,
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .id_by_email
            .get(email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn create_account(&self, account: &Account) -> Result<(), StoreError> {
        // Check and insert under one write guard so concurrent registrations
        // for the same email cannot both succeed.
        let mut accounts = self.accounts.write().await;
        if accounts.id_by_email.contains_key(&account.email)
            || accounts.by_id.contains_key(&account.id)
        {
            return Err(StoreError::DuplicateKey);
        }
        accounts
            .id_by_email
            .insert(account.email.clone(), account.id);
        accounts.by_id.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn create_task(&self, task: &Task) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            return Err(StoreError::DuplicateKey);
        }
        tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().await;
        let stored = tasks.get_mut(&task.id).ok_or(StoreError::NotFound)?;
        stored.title = task.title.clone();
        stored.description = task.description.clone();
        stored.completed = task.completed;
        stored.updated_at = task.updated_at;
        Ok(())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), StoreError> {
        self.tasks
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn list_tasks_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, StoreError> {
        let mut owned: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|task| task.user_id == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
