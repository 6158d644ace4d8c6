use rusqlite::{params, Row};

use super::*;
use crate::types::TaskStatus;

const TASK_COLUMNS: &str = "id, title, description, status, priority, assignee_id,
    created_by, due_date, created_at, updated_at, completed_at";

impl StaffDb {
    pub fn insert_task(&self, task: &DbTask) -> Result<(), DbError> {
        self.conn.execute(
            &format!(
                "INSERT INTO tasks ({TASK_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
            ),
            params![
                task.id,
                task.title,
                task.description,
                task.status,
                task.priority,
                task.assignee_id,
                task.created_by,
                task.due_date,
                task.created_at,
                task.updated_at,
                task.completed_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_task(&self, id: &str) -> Result<Option<DbTask>, DbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"))?;
        let mut rows = stmt.query_map(params![id], Self::map_task_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Edit title/description/priority/assignee/due date in place.
    pub fn update_task(&self, task: &DbTask) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE tasks SET title = ?2, description = ?3, priority = ?4,
                assignee_id = ?5, due_date = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.description,
                task.priority,
                task.assignee_id,
                task.due_date,
                task.updated_at,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Transition a task's status. `completed_at` is stamped when entering
    /// done and cleared when leaving it.
    pub fn set_task_status(
        &self,
        id: &str,
        status: TaskStatus,
        updated_at: &str,
    ) -> Result<bool, DbError> {
        let completed_at = if status == TaskStatus::Done {
            Some(updated_at)
        } else {
            None
        };
        let changed = self.conn.execute(
            "UPDATE tasks SET status = ?2, completed_at = ?3, updated_at = ?4 WHERE id = ?1",
            params![id, status.as_str(), completed_at, updated_at],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_task(&self, id: &str) -> Result<bool, DbError> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    pub fn list_tasks(&self) -> Result<Vec<DbTask>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id ASC"
        ))?;
        let rows = stmt.query_map([], Self::map_task_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn list_tasks_for_assignee(&self, assignee_id: &str) -> Result<Vec<DbTask>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE assignee_id = ?1 ORDER BY created_at DESC, id ASC"
        ))?;
        let rows = stmt.query_map(params![assignee_id], Self::map_task_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn map_task_row(row: &Row) -> Result<DbTask, rusqlite::Error> {
        Ok(DbTask {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            status: row.get(3)?,
            priority: row.get(4)?,
            assignee_id: row.get(5)?,
            created_by: row.get(6)?,
            due_date: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
            completed_at: row.get(10)?,
        })
    }
}
