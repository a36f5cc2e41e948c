/// Task list business logic over a [`TaskStore`]
///
/// The only rule beyond storage is that task text must be non-empty and fit
/// the `tasks.text` column.

use crate::error::StoreError;
use crate::models::task::{NewTask, Task, TaskStore, MAX_TEXT_LEN};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Errors returned by [`TaskService`]
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Input was rejected
    #[error("{0}")]
    Validation(String),

    /// No task has this ID
    #[error("Task {0} not found")]
    NotFound(i64),

    /// The task store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// CRUD over tasks
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// Access to the underlying store (used by health checks)
    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.tasks
    }

    /// Creates a task
    ///
    /// # Errors
    ///
    /// `Validation` if `text` is blank, longer than 255 characters or contains
    /// a NUL character (which Postgres text columns can't hold).
    #[instrument(skip(self, text))]
    pub async fn create(&self, text: String, completed: bool) -> Result<Task, TaskError> {
        if text.trim().is_empty() {
            return Err(TaskError::Validation("Task text is required".to_string()));
        }
        if text.chars().count() > MAX_TEXT_LEN {
            return Err(TaskError::Validation(format!(
                "Task text must be at most {MAX_TEXT_LEN} characters"
            )));
        }
        if text.contains('\0') {
            return Err(TaskError::Validation(
                "Task text must not contain NUL characters".to_string(),
            ));
        }

        let task = self.tasks.insert(NewTask { text, completed }).await?;
        info!(task_id = task.id, "Task created");
        Ok(task)
    }

    /// Lists all tasks, newest first
    pub async fn list(&self) -> Result<Vec<Task>, TaskError> {
        let tasks = self.tasks.list().await?;
        debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Sets a task's completed flag
    #[instrument(skip(self))]
    pub async fn update(&self, id: i64, completed: bool) -> Result<Task, TaskError> {
        self.tasks
            .set_completed(id, completed)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Deletes a task
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), TaskError> {
        if !self.tasks.delete(id).await? {
            return Err(TaskError::NotFound(id));
        }

        info!(task_id = id, "Task deleted");
        Ok(())
    }
}
