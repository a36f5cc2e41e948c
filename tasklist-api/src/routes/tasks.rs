/// Task list endpoints
///
/// - `GET /tasks` - List tasks, newest first
/// - `POST /tasks` - Create a task
/// - `PUT /tasks/:id` - Set a task's completed flag
/// - `DELETE /tasks/:id` - Delete a task

use crate::{
    app::TasksState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tasklist_shared::models::task::Task;

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Task text (required, non-blank)
    #[serde(default)]
    pub text: String,

    /// Initial completed flag (defaults to false)
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Update task request
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// New completed flag (required)
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Update task response
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTaskResponse {
    pub id: i64,
    pub completed: bool,
}

/// Delete task response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List all tasks
///
/// ```json
/// [{ "id": 2, "text": "Walk dog", "completed": false },
///  { "id": 1, "text": "Buy milk", "completed": true }]
/// ```
pub async fn list_tasks(State(state): State<TasksState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list().await?;
    Ok(Json(tasks))
}

/// Create a task
///
/// ```text
/// POST /tasks
/// { "text": "Buy milk" }
/// ```
///
/// Responds `201 Created` with the stored task.
///
/// # Errors
///
/// - `400 Bad Request`: missing, blank or over-long text
/// - `500 Internal Server Error`: storage failure
pub async fn create_task(
    State(state): State<TasksState>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state
        .tasks
        .create(req.text, req.completed.unwrap_or(false))
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Set a task's completed flag
///
/// ```text
/// PUT /tasks/1
/// { "completed": true }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `completed` missing or id not a number
/// - `404 Not Found`: no such task
/// - `500 Internal Server Error`: storage failure
pub async fn update_task(
    State(state): State<TasksState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateTaskRequest>,
) -> ApiResult<Json<UpdateTaskResponse>> {
    let completed = req
        .completed
        .ok_or_else(|| ApiError::BadRequest("Completed status is required".to_string()))?;

    let task = state.tasks.update(id, completed).await?;

    Ok(Json(UpdateTaskResponse {
        id: task.id,
        completed: task.completed,
    }))
}

/// Delete a task
///
/// # Errors
///
/// - `404 Not Found`: no such task
/// - `500 Internal Server Error`: storage failure
pub async fn delete_task(
    State(state): State<TasksState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.tasks.delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
