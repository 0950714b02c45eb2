/// Task CRUD endpoints
///
/// All routes here sit behind the JWT middleware; handlers receive the
/// verified [`AuthContext`] from request extensions and enforce ownership:
/// a caller can only ever see or mutate tasks whose `user_id` equals their
/// token subject.
///
/// # Endpoints
///
/// - `GET /getTasks?userId=` - List tasks owned by the caller
/// - `POST /tasks` - Create a task owned by the caller
/// - `PUT /tasks/:taskId` - Partial update + `updated_at` refresh
/// - `DELETE /tasks/:taskId` - Delete

use crate::{
    app::AppState,
    error::{validation_errors, ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taskdash_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, Task, TaskPriority, TaskStatus, UpdateTask},
};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for `GET /getTasks`
#[derive(Debug, Deserialize)]
pub struct ListTasksParams {
    /// Owner whose tasks to list; must equal the token subject
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
}

/// Response for `GET /getTasks`
#[derive(Debug, Serialize, Deserialize)]
pub struct ListTasksResponse {
    /// Tasks owned by the requested user, newest first
    #[serde(rename = "userTasks")]
    pub user_tasks: Vec<Task>,
}

/// Request body for `POST /tasks`
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Title (required, non-empty)
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status (defaults to pending)
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority (defaults to medium)
    #[serde(default)]
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Declared owner. Optional; when present it must match the token
    /// subject. The persisted owner always comes from the token, never from
    /// this field.
    #[serde(rename = "user")]
    pub user: Option<Uuid>,
}

/// Response for `DELETE /tasks/:taskId`
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Lists tasks owned by the authenticated user
///
/// # Errors
///
/// - `400 Bad Request`: `userId` query parameter missing
/// - `403 Forbidden`: `userId` differs from the token subject
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListTasksParams>,
) -> ApiResult<Json<ListTasksResponse>> {
    let user_id = params
        .user_id
        .ok_or_else(|| ApiError::BadRequest("User ID is required".to_string()))?;

    if !auth.owns(user_id) {
        return Err(ApiError::Forbidden("Unauthorized access".to_string()));
    }

    let user_tasks = Task::list_by_user(&state.db, user_id).await?;

    Ok(Json(ListTasksResponse { user_tasks }))
}

/// Creates a task owned by the authenticated user
///
/// The token subject is the sole source of truth for ownership: a mismatched
/// `user` field in the body is rejected, and the stored `user_id` is taken
/// from the token even when the field is omitted.
///
/// # Errors
///
/// - `403 Forbidden`: declared owner differs from the token subject
/// - `422 Unprocessable Entity`: validation failed
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate().map_err(validation_errors)?;

    if let Some(declared_owner) = req.user {
        if !auth.owns(declared_owner) {
            return Err(ApiError::Forbidden("Unauthorized access".to_string()));
        }
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: auth.user_id,
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            due_date: req.due_date,
        },
    )
    .await?;

    tracing::debug!(task_id = %task.id, user_id = %auth.user_id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// Applies a partial update to a task
///
/// Any subset of title/description/status/priority/due_date may be present,
/// including none at all; `updated_at` is refreshed either way.
///
/// # Errors
///
/// - `404 Not Found`: no task with that id
/// - `403 Forbidden`: task owner differs from the token subject
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(patch): Json<UpdateTask>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    if !auth.owns(task.user_id) {
        return Err(ApiError::Forbidden("Unauthorized access".to_string()));
    }

    // The task can disappear between the lookup and the update; treat that
    // as not found as well.
    let updated = Task::update(&state.db, task_id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(updated))
}

/// Deletes a task
///
/// # Errors
///
/// - `404 Not Found`: no task with that id
/// - `403 Forbidden`: task owner differs from the token subject
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let task = Task::find_by_id(&state.db, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    if !auth.owns(task.user_id) {
        return Err(ApiError::Forbidden("Unauthorized access".to_string()));
    }

    let deleted = Task::delete(&state.db, task_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    tracing::debug!(task_id = %task_id, user_id = %auth.user_id, "Task deleted");

    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
