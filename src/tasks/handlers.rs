//! HTTP handlers for the task API
use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use log::{error, info, warn};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::shared::state::AppState;
use crate::tasks::error::TaskError;
use crate::tasks::types::{
    CreateTaskRequest, CreateTaskResponse, MessageResponse, NewTask, Task, TaskChanges,
    UpdateTaskRequest, INVALID_BODY_MESSAGE, NO_DATA_MESSAGE, TITLE_REQUIRED_MESSAGE,
};

/// Task id taken from the path. Anything that is not an integer cannot name a
/// row, so it is rejected as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = TaskError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| TaskError::NotFound)?;
        raw.parse::<i64>().map(Self).map_err(|_| {
            warn!("[TASK_API] Non-numeric task id in path: {raw}");
            TaskError::NotFound
        })
    }
}

/// A request without a JSON body gets `missing`; a body that is present but
/// malformed or mistyped gets a generic body error.
fn body_rejection(rejection: JsonRejection, missing: &str) -> TaskError {
    warn!("[TASK_API] Unreadable request body: {rejection}");
    match rejection {
        JsonRejection::MissingJsonContentType(_) => TaskError::Validation(missing.to_string()),
        _ => TaskError::Validation(INVALID_BODY_MESSAGE.to_string()),
    }
}

fn log_failure(action: &str, err: &TaskError) {
    match err {
        TaskError::Validation(_) | TaskError::NotFound => warn!("[TASK_API] {action}: {err}"),
        _ => error!("[TASK_API] Error {action}: {err}"),
    }
}

/// Handler for task creation
pub async fn handle_task_create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateTaskResponse>), TaskError> {
    let result: Result<i64, TaskError> = async move {
        let Json(req) = payload.map_err(|r| body_rejection(r, TITLE_REQUIRED_MESSAGE))?;
        let new_task = NewTask::try_from(req)?;
        state.task_store.run(move |store| store.create(new_task)).await
    }
    .await;

    let id = result.inspect_err(|e| log_failure("creating task", e))?;
    info!("Task created successfully with id {id}");

    Ok((
        StatusCode::CREATED,
        Json(CreateTaskResponse {
            id,
            message: "Task created".to_string(),
        }),
    ))
}

/// Handler for listing all tasks
pub async fn handle_task_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Task>>, TaskError> {
    let tasks = state
        .task_store
        .run(|store| store.list_all())
        .await
        .inspect_err(|e| log_failure("fetching tasks", e))?;
    Ok(Json(tasks))
}

/// Handler for getting a single task
pub async fn handle_task_get(
    State(state): State<Arc<AppState>>,
    TaskId(id): TaskId,
) -> Result<Json<Task>, TaskError> {
    let task = state
        .task_store
        .run(move |store| store.get(id))
        .await
        .inspect_err(|e| log_failure(&format!("fetching task {id}"), e))?;
    Ok(Json(task))
}

/// Handler for task update
pub async fn handle_task_update(
    State(state): State<Arc<AppState>>,
    TaskId(id): TaskId,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<MessageResponse>, TaskError> {
    let result: Result<(), TaskError> = async move {
        let Json(body) = payload.map_err(|r| body_rejection(r, NO_DATA_MESSAGE))?;
        let changes = TaskChanges::from(UpdateTaskRequest::from_body(body)?);
        match state.task_store.run(move |store| store.update(id, changes)).await? {
            0 => Err(TaskError::NotFound),
            _ => Ok(()),
        }
    }
    .await;

    result.inspect_err(|e| log_failure(&format!("updating task {id}"), e))?;
    Ok(Json(MessageResponse::new("Task updated")))
}

/// Handler for task deletion
pub async fn handle_task_delete(
    State(state): State<Arc<AppState>>,
    TaskId(id): TaskId,
) -> Result<Json<MessageResponse>, TaskError> {
    let affected = state
        .task_store
        .run(move |store| store.delete(id))
        .await
        .and_then(|n| if n == 0 { Err(TaskError::NotFound) } else { Ok(n) })
        .inspect_err(|e| log_failure(&format!("deleting task {id}"), e))?;

    info!("Deleted task {id} ({affected} row)");
    Ok(Json(MessageResponse::new("Task deleted")))
}

/// Configure task routes for the Axum router
pub fn configure_task_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tasks", get(handle_task_list).post(handle_task_create))
        .route(
            "/api/tasks/:id",
            get(handle_task_get)
                .put(handle_task_update)
                .delete(handle_task_delete),
        )
}
