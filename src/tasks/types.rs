//! Types for the tasks module
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::schema::tasks;
use crate::tasks::error::TaskError;

pub const DEFAULT_STATUS: &str = "pending";
pub const DONE_STATUS: &str = "done";

pub const TITLE_REQUIRED_MESSAGE: &str = "Task title is required";
pub const NO_DATA_MESSAGE: &str = "No data provided";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

// Database model - matches schema exactly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: String,
}

/// Validated input for a new row; `status` falls back to `pending` in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update. `None` keeps the stored value, so a field cannot be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

impl TaskChanges {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}

// API request/response models

/// `POST /api/tasks` body. Unknown fields, including `id`, are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<CreateTaskRequest> for NewTask {
    type Error = TaskError;

    fn try_from(req: CreateTaskRequest) -> Result<Self, Self::Error> {
        let title = req
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TaskError::Validation(TITLE_REQUIRED_MESSAGE.to_string()))?;

        Ok(NewTask {
            title,
            description: req.description,
            due_date: req.due_date,
            status: req.status,
        })
    }
}

/// `PUT /api/tasks/{id}` body. Absent and `null` fields are treated alike.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

impl UpdateTaskRequest {
    /// Only an empty object means "no data". Any other object is a valid,
    /// possibly no-op, update: `{"title": null}` keeps every field.
    pub fn from_body(body: Map<String, Value>) -> Result<Self, TaskError> {
        if body.is_empty() {
            return Err(TaskError::Validation(NO_DATA_MESSAGE.to_string()));
        }
        serde_json::from_value(Value::Object(body))
            .map_err(|_| TaskError::Validation(INVALID_BODY_MESSAGE.to_string()))
    }
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(req: UpdateTaskRequest) -> Self {
        TaskChanges {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
