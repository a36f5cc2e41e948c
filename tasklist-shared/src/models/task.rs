/// Task model and database operations
///
/// A task is a to-do item with a completion flag. Tasks are independent of
/// users; the task list and the login flow are separate applications.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     text VARCHAR(255) NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE
/// );
/// ```

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Maximum task text length, matching the `VARCHAR(255)` column
pub const MAX_TEXT_LEN: usize = 255;

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Storage-assigned ID
    pub id: i64,

    /// What needs doing
    pub text: String,

    /// Whether the task has been done
    pub completed: bool,
}

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub text: String,
    pub completed: bool,
}

/// Persistence for tasks
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a task and returns it with its assigned ID
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Lists all tasks, most recently created first
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Sets the completed flag, returning the updated task or `None` if it doesn't exist
    async fn set_completed(&self, id: i64, completed: bool) -> Result<Option<Task>, StoreError>;

    /// Deletes a task, returning false if it didn't exist
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Checks that the backing store is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}

impl Task {
    /// Inserts a new task row
    pub async fn create(pool: &PgPool, data: NewTask) -> Result<Self, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (text, completed)
            VALUES ($1, $2)
            RETURNING id, text, completed
            "#,
        )
        .bind(data.text)
        .bind(data.completed)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists every task, newest first
    ///
    /// IDs are assigned from a sequence, so descending ID order is creation order reversed.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, text, completed
            FROM tasks
            ORDER BY id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates the completed flag of a task
    ///
    /// # Returns
    ///
    /// The updated task, or `None` if no task has that ID
    pub async fn set_completed(
        pool: &PgPool,
        id: i64,
        completed: bool,
    ) -> Result<Option<Self>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET completed = $2
            WHERE id = $1
            RETURNING id, text, completed
            "#,
        )
        .bind(id)
        .bind(completed)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// # Returns
    ///
    /// True if the task was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskStore for PgPool {
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        Task::create(self, task).await
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Task::list(self).await
    }

    async fn set_completed(&self, id: i64, completed: bool) -> Result<Option<Task>, StoreError> {
        Task::set_completed(self, id, completed).await
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Task::delete(self, id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::db::pool::health_check(self).await?;
        Ok(())
    }
}

