/// In-memory store implementations
///
/// Used by unit and router tests, and handy for running a binary without
/// Postgres. They follow the same contract as the Postgres stores: usernames
/// are unique, task IDs increase monotonically, and listings are newest first.
///
/// Each store can be taken offline with `set_offline(true)`, after which every
/// call fails with `StoreError::Unavailable`.

use super::task::{NewTask, Task, TaskStore};
use super::user::{NewUser, User, UserStore};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

fn check_online(offline: &AtomicBool) -> Result<(), StoreError> {
    if offline.load(Ordering::SeqCst) {
        return Err(StoreError::Unavailable("in-memory store is offline".to_string()));
    }
    Ok(())
}

#[derive(Default)]
struct UserTable {
    next_id: i64,
    by_username: HashMap<String, User>,
}

/// `UserStore` backed by a `HashMap`
#[derive(Default)]
pub struct MemoryUserStore {
    table: RwLock<UserTable>,
    offline: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail (or succeed again)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.by_username.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        check_online(&self.offline)?;

        let mut table = self.table.write().await;
        if table.by_username.contains_key(&user.username) {
            return Err(StoreError::Duplicate {
                constraint: "users_username_key".to_string(),
            });
        }

        table.next_id += 1;
        let stored = User {
            id: table.next_id,
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        table
            .by_username
            .insert(stored.username.clone(), stored.clone());

        Ok(stored)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        check_online(&self.offline)?;
        Ok(self.table.read().await.by_username.get(username).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        check_online(&self.offline)
    }
}

#[derive(Default)]
struct TaskTable {
    next_id: i64,
    rows: BTreeMap<i64, Task>,
}

/// `TaskStore` backed by a `BTreeMap` keyed on ID
#[derive(Default)]
pub struct MemoryTaskStore {
    table: RwLock<TaskTable>,
    offline: AtomicBool,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail (or succeed again)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        check_online(&self.offline)?;

        let mut table = self.table.write().await;
        table.next_id += 1;
        let stored = Task {
            id: table.next_id,
            text: task.text,
            completed: task.completed,
        };
        table.rows.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        check_online(&self.offline)?;
        Ok(self.table.read().await.rows.values().rev().cloned().collect())
    }

    async fn set_completed(&self, id: i64, completed: bool) -> Result<Option<Task>, StoreError> {
        check_online(&self.offline)?;

        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|task| {
            task.completed = completed;
            task.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        check_online(&self.offline)?;
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        check_online(&self.offline)
    }
}
