//! Work-log submission and approval.
//!
//! Staff submit logs for themselves and may amend or withdraw them while
//! pending. Review is an admin surface: pending → approved/rejected, both
//! terminal. A rejected log is resubmitted as a new one.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::{DbWorkLog, StaffDb};
use crate::error::ApiError;
use crate::types::{Actor, Role, WorkLogStatus};
use crate::util::{non_blank, now_iso};

/// Hours must fit one calendar day.
const MAX_HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogRequest {
    pub work_date: String,
    pub hours: f64,
    pub summary: String,
}

/// Submit a log for the acting staff member.
pub fn submit_work_log(
    db: &StaffDb,
    actor: &Actor,
    request: &WorkLogRequest,
) -> Result<DbWorkLog, ApiError> {
    if actor.role == Role::Client {
        return Err(ApiError::Authorization("no work-log access".to_string()));
    }
    validate_request(request)?;

    if db.get_profile(&actor.id)?.is_none() {
        return Err(ApiError::not_found("profile", actor.id.clone()));
    }

    let now = now_iso();
    let log = DbWorkLog {
        id: Uuid::new_v4().to_string(),
        staff_id: actor.id.clone(),
        work_date: request.work_date.clone(),
        hours: request.hours,
        summary: request.summary.trim().to_string(),
        status: WorkLogStatus::Pending.as_str().to_string(),
        reviewed_by: None,
        reviewed_at: None,
        created_at: now.clone(),
        updated_at: now,
    };
    db.insert_work_log(&log)?;
    Ok(log)
}

/// Amend a pending log. Owner only.
pub fn amend_work_log(
    db: &StaffDb,
    actor: &Actor,
    log_id: &str,
    request: &WorkLogRequest,
) -> Result<DbWorkLog, ApiError> {
    validate_request(request)?;
    let log = owned_pending_log(db, actor, log_id)?;

    db.update_work_log_entry(
        &log.id,
        &request.work_date,
        request.hours,
        request.summary.trim(),
        &now_iso(),
    )?;
    db.get_work_log(log_id)?
        .ok_or_else(|| ApiError::not_found("work log", log_id))
}

/// Withdraw a pending log. Owner only; the row is deleted.
pub fn withdraw_work_log(db: &StaffDb, actor: &Actor, log_id: &str) -> Result<(), ApiError> {
    let log = owned_pending_log(db, actor, log_id)?;
    db.delete_work_log(&log.id)?;
    Ok(())
}

/// Approve or reject a pending log. Admin only.
pub fn review_work_log(
    db: &StaffDb,
    actor: &Actor,
    log_id: &str,
    decision: WorkLogStatus,
) -> Result<DbWorkLog, ApiError> {
    if !actor.role.is_admin() {
        return Err(ApiError::Authorization("admin only".to_string()));
    }
    if !decision.is_reviewed() {
        return Err(ApiError::validation("status", "decision must approve or reject"));
    }

    let log = db
        .get_work_log(log_id)?
        .ok_or_else(|| ApiError::not_found("work log", log_id))?;
    if WorkLogStatus::from_str_lossy(&log.status).is_reviewed() {
        return Err(ApiError::validation("status", "log already reviewed"));
    }

    db.set_work_log_status(log_id, decision, &actor.id, &now_iso())?;
    db.get_work_log(log_id)?
        .ok_or_else(|| ApiError::not_found("work log", log_id))
}

/// List logs: admins see all (optionally by status), staff their own.
pub fn list_work_logs(
    db: &StaffDb,
    actor: &Actor,
    status: Option<WorkLogStatus>,
) -> Result<Vec<DbWorkLog>, ApiError> {
    match actor.role {
        Role::Admin => Ok(db.list_work_logs(status)?),
        Role::Staff => {
            let mut logs = db.list_work_logs_for_staff(&actor.id)?;
            if let Some(status) = status {
                logs.retain(|l| WorkLogStatus::from_str_lossy(&l.status) == status);
            }
            Ok(logs)
        }
        Role::Client => Err(ApiError::Authorization("no work-log access".to_string())),
    }
}

fn owned_pending_log(db: &StaffDb, actor: &Actor, log_id: &str) -> Result<DbWorkLog, ApiError> {
    let log = db
        .get_work_log(log_id)?
        .ok_or_else(|| ApiError::not_found("work log", log_id))?;
    if log.staff_id != actor.id {
        return Err(ApiError::Authorization("not owner".to_string()));
    }
    if WorkLogStatus::from_str_lossy(&log.status).is_reviewed() {
        return Err(ApiError::validation("status", "log already reviewed"));
    }
    Ok(log)
}

fn validate_request(request: &WorkLogRequest) -> Result<(), ApiError> {
    if NaiveDate::parse_from_str(&request.work_date, "%Y-%m-%d").is_err() {
        return Err(ApiError::validation("workDate", "expected YYYY-MM-DD"));
    }
    if !(request.hours > 0.0 && request.hours <= MAX_HOURS_PER_DAY) {
        return Err(ApiError::validation("hours", "must be in (0, 24]"));
    }
    if !non_blank(&request.summary) {
        return Err(ApiError::validation("summary", "must not be blank"));
    }
    Ok(())
}
