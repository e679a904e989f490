//! SQLite-backed task storage.
//!
//! Every operation checks out its own pooled connection; the guard returns it
//! to the pool when the operation's scope ends, on success and error alike.
use diesel::prelude::*;
use log::debug;

use crate::shared::schema::tasks;
use crate::shared::{DbConn, DbPool};
use crate::tasks::error::TaskError;
use crate::tasks::types::{NewTask, Task, TaskChanges, DEFAULT_STATUS};

#[derive(Insertable)]
#[diesel(table_name = tasks)]
struct TaskInsert<'a> {
    title: &'a str,
    description: Option<&'a str>,
    due_date: Option<&'a str>,
    status: &'a str,
}

#[derive(Debug, Clone)]
pub struct TaskStore {
    pool: DbPool,
}

impl TaskStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn, TaskError> {
        Ok(self.pool.get()?)
    }

    /// Runs a store operation on the blocking pool.
    pub async fn run<T, F>(&self, op: F) -> Result<T, TaskError>
    where
        F: FnOnce(&TaskStore) -> Result<T, TaskError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || op(&store)).await?
    }

    pub fn create(&self, new_task: NewTask) -> Result<i64, TaskError> {
        let mut conn = self.conn()?;
        let row = TaskInsert {
            title: &new_task.title,
            description: new_task.description.as_deref(),
            due_date: new_task.due_date.as_deref(),
            status: new_task.status.as_deref().unwrap_or(DEFAULT_STATUS),
        };

        let id = diesel::insert_into(tasks::table)
            .values(&row)
            .returning(tasks::id)
            .get_result::<i64>(&mut conn)?;
        debug!("Inserted task row {id}");
        Ok(id)
    }

    pub fn list_all(&self) -> Result<Vec<Task>, TaskError> {
        let mut conn = self.conn()?;
        let rows = tasks::table
            .order(tasks::id.asc())
            .select(Task::as_select())
            .load(&mut conn)?;
        Ok(rows)
    }

    pub fn get(&self, id: i64) -> Result<Task, TaskError> {
        let mut conn = self.conn()?;
        tasks::table
            .find(id)
            .select(Task::as_select())
            .first(&mut conn)
            .optional()?
            .ok_or(TaskError::NotFound)
    }

    /// Returns the number of rows touched: 0 when `id` does not exist.
    pub fn update(&self, id: i64, changes: TaskChanges) -> Result<usize, TaskError> {
        let mut conn = self.conn()?;

        // diesel refuses an empty SET clause; an empty change set only reports existence.
        if changes.is_empty() {
            let exists = diesel::select(diesel::dsl::exists(tasks::table.find(id)))
                .get_result::<bool>(&mut conn)?;
            return Ok(usize::from(exists));
        }

        let affected = diesel::update(tasks::table.find(id))
            .set(&changes)
            .execute(&mut conn)?;
        Ok(affected)
    }

    pub fn delete(&self, id: i64) -> Result<usize, TaskError> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(tasks::table.find(id)).execute(&mut conn)?;
        Ok(affected)
    }

    pub fn ping(&self) -> Result<(), TaskError> {
        let mut conn = self.conn()?;
        diesel::sql_query("SELECT 1").execute(&mut conn)?;
        Ok(())
    }
}
