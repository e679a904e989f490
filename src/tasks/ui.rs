//! Server-rendered pages for browsing and editing tasks.
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;

use crate::shared::state::AppState;
use crate::tasks::handlers::TaskId;
use crate::tasks::types::{NewTask, Task, TaskChanges, DONE_STATUS, TITLE_REQUIRED_MESSAGE};

const PAGE_STYLE: &str = r#"
        * { box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f5f5f5; margin: 0; }
        .container { max-width: 800px; margin: 0 auto; padding: 24px; }
        .header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px; }
        .btn { padding: 8px 16px; border: none; border-radius: 6px; cursor: pointer; font-size: 14px; text-decoration: none; }
        .btn-primary { background: #0066cc; color: white; }
        .btn-done { background: #2e7d32; color: white; }
        .btn-delete { background: #c62828; color: white; }
        .task { background: white; border-radius: 8px; padding: 16px; margin-bottom: 12px; box-shadow: 0 1px 4px rgba(0,0,0,0.08); }
        .task.done .task-title { text-decoration: line-through; color: #888; }
        .task-meta { font-size: 13px; color: #666; margin-top: 4px; }
        .task-actions { display: flex; gap: 8px; margin-top: 12px; }
        .task-actions form { margin: 0; }
        .empty-state { text-align: center; padding: 48px; color: #666; }
        .error { color: #c62828; margin-bottom: 12px; }
        label { display: block; margin: 12px 0 4px; }
        input, textarea { width: 100%; padding: 8px; border: 1px solid #ddd; border-radius: 6px; }
"#;

#[derive(Debug, Default, Deserialize)]
pub struct AddTaskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <div class="container">
{body}
    </div>
</body>
</html>"#,
        title = escape_html(title),
    )
}

fn build_task_html(task: &Task) -> String {
    let status_class = if task.status == DONE_STATUS { "task done" } else { "task" };
    let description = task
        .description
        .as_deref()
        .map(|d| format!(r#"<div class="task-description">{}</div>"#, escape_html(d)))
        .unwrap_or_default();
    let due = task
        .due_date
        .as_deref()
        .map(|d| format!(" | Due: {}", escape_html(d)))
        .unwrap_or_default();
    let done_button = if task.status == DONE_STATUS {
        String::new()
    } else {
        format!(
            r#"<form method="post" action="/tasks/{id}/status"><button class="btn btn-done" type="submit">Done</button></form>"#,
            id = task.id
        )
    };

    format!(
        r#"        <div class="{status_class}" data-task-id="{id}">
            <div class="task-title">{title}</div>
            {description}
            <div class="task-meta">Status: {status}{due}</div>
            <div class="task-actions">
                {done_button}
                <form method="post" action="/tasks/{id}/delete"><button class="btn btn-delete" type="submit">Delete</button></form>
            </div>
        </div>
"#,
        id = task.id,
        title = escape_html(&task.title),
        status = escape_html(&task.status),
    )
}

pub fn build_task_list_html(tasks: &[Task]) -> String {
    let items = if tasks.is_empty() {
        r#"        <div class="empty-state">No tasks yet</div>
"#
        .to_string()
    } else {
        tasks.iter().map(build_task_html).collect()
    };

    let body = format!(
        r#"        <div class="header">
            <h1>Tasks</h1>
            <a class="btn btn-primary" href="/add">+ New Task</a>
        </div>
{items}"#
    );
    page("Tasks", &body)
}

pub fn build_add_form_html(error: Option<&str>) -> String {
    let error_html = error
        .map(|e| format!(r#"<div class="error">{}</div>"#, escape_html(e)))
        .unwrap_or_default();
    let body = format!(
        r#"        <div class="header">
            <h1>New Task</h1>
            <a class="btn" href="/">Back</a>
        </div>
        {error_html}
        <form method="post" action="/add">
            <label for="title">Title</label>
            <input id="title" name="title" type="text" required>
            <label for="description">Description</label>
            <textarea id="description" name="description" rows="4"></textarea>
            <div class="task-actions"><button class="btn btn-primary" type="submit">Add</button></div>
        </form>
"#
    );
    page("New Task", &body)
}

pub async fn handle_tasks_page(State(state): State<Arc<AppState>>) -> Response {
    match state.task_store.run(|store| store.list_all()).await {
        Ok(tasks) => Html(build_task_list_html(&tasks)).into_response(),
        Err(e) => {
            error!("[TASK_UI] Error fetching tasks: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(page(
                    "Tasks",
                    r#"        <div class="error">Could not load tasks</div>"#,
                )),
            )
                .into_response()
        }
    }
}

pub async fn handle_add_task_page() -> Html<String> {
    Html(build_add_form_html(None))
}

pub async fn handle_add_task_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddTaskForm>,
) -> Response {
    if form.title.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Html(build_add_form_html(Some(TITLE_REQUIRED_MESSAGE))),
        )
            .into_response();
    }

    let new_task = NewTask {
        title: form.title,
        description: Some(form.description).filter(|d| !d.trim().is_empty()),
        ..NewTask::default()
    };
    match state.task_store.run(move |store| store.create(new_task)).await {
        Ok(id) => info!("Task created successfully with id {id}"),
        Err(e) => error!("[TASK_UI] Error creating task: {e}"),
    }
    Redirect::to("/").into_response()
}

pub async fn handle_mark_done(
    State(state): State<Arc<AppState>>,
    TaskId(id): TaskId,
) -> Redirect {
    let result = state
        .task_store
        .run(move |store| store.update(id, TaskChanges::status(DONE_STATUS)))
        .await;
    if let Err(e) = result {
        error!("[TASK_UI] Error updating task status for {id}: {e}");
    }
    Redirect::to("/")
}

pub async fn handle_delete_task(
    State(state): State<Arc<AppState>>,
    TaskId(id): TaskId,
) -> Redirect {
    if let Err(e) = state.task_store.run(move |store| store.delete(id)).await {
        error!("[TASK_UI] Error deleting task {id}: {e}");
    }
    Redirect::to("/")
}

pub fn configure_task_ui_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handle_tasks_page))
        .route("/add", get(handle_add_task_page).post(handle_add_task_submit))
        .route("/tasks/:id/status", post(handle_mark_done))
        .route("/tasks/:id/delete", post(handle_delete_task))
}
