use rusqlite::{params, Row};

use super::*;
use crate::types::WorkLogStatus;

const WORK_LOG_COLUMNS: &str = "id, staff_id, work_date, hours, summary, status,
    reviewed_by, reviewed_at, created_at, updated_at";

impl StaffDb {
    pub fn insert_work_log(&self, log: &DbWorkLog) -> Result<(), DbError> {
        self.conn.execute(
            &format!(
                "INSERT INTO work_logs ({WORK_LOG_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ),
            params![
                log.id,
                log.staff_id,
                log.work_date,
                log.hours,
                log.summary,
                log.status,
                log.reviewed_by,
                log.reviewed_at,
                log.created_at,
                log.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_work_log(&self, id: &str) -> Result<Option<DbWorkLog>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WORK_LOG_COLUMNS} FROM work_logs WHERE id = ?1"
        ))?;
        let mut rows = stmt.query_map(params![id], Self::map_work_log_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Amend a pending log's date/hours/summary.
    pub fn update_work_log_entry(
        &self,
        id: &str,
        work_date: &str,
        hours: f64,
        summary: &str,
        updated_at: &str,
    ) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE work_logs SET work_date = ?2, hours = ?3, summary = ?4, updated_at = ?5
             WHERE id = ?1",
            params![id, work_date, hours, summary, updated_at],
        )?;
        Ok(changed > 0)
    }

    /// Review transition: stamps the reviewer and review time.
    pub fn set_work_log_status(
        &self,
        id: &str,
        status: WorkLogStatus,
        reviewed_by: &str,
        reviewed_at: &str,
    ) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE work_logs SET status = ?2, reviewed_by = ?3, reviewed_at = ?4, updated_at = ?4
             WHERE id = ?1",
            params![id, status.as_str(), reviewed_by, reviewed_at],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_work_log(&self, id: &str) -> Result<bool, DbError> {
        let changed = self
            .conn
            .execute("DELETE FROM work_logs WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    pub fn list_work_logs(&self, status: Option<WorkLogStatus>) -> Result<Vec<DbWorkLog>, DbError> {
        match status {
            Some(status) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {WORK_LOG_COLUMNS} FROM work_logs
                     WHERE status = ?1 ORDER BY work_date DESC, id ASC"
                ))?;
                let rows = stmt.query_map(params![status.as_str()], Self::map_work_log_row)?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {WORK_LOG_COLUMNS} FROM work_logs ORDER BY work_date DESC, id ASC"
                ))?;
                let rows = stmt.query_map([], Self::map_work_log_row)?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            }
        }
    }

    pub fn list_work_logs_for_staff(&self, staff_id: &str) -> Result<Vec<DbWorkLog>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WORK_LOG_COLUMNS} FROM work_logs
             WHERE staff_id = ?1 ORDER BY work_date DESC, id ASC"
        ))?;
        let rows = stmt.query_map(params![staff_id], Self::map_work_log_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn map_work_log_row(row: &Row) -> Result<DbWorkLog, rusqlite::Error> {
        Ok(DbWorkLog {
            id: row.get(0)?,
            staff_id: row.get(1)?,
            work_date: row.get(2)?,
            hours: row.get(3)?,
            summary: row.get(4)?,
            status: row.get(5)?,
            reviewed_by: row.get(6)?,
            reviewed_at: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }
}
