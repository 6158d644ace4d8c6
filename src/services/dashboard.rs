//! Dashboard statistics.
//!
//! Every tile is a grouped count derived through `aggregate::group_counts`
//! over store rows; nothing here is persisted. Admins get the org-wide
//! view, staff get their own slice.

use std::collections::HashMap;

use serde::Serialize;

use crate::aggregate::group_counts;
use crate::db::StaffDb;
use crate::error::ApiError;
use crate::latency::{record_latency, DASHBOARD_BUDGET_MS};
use crate::profile::completion::completion_percentage;
use crate::types::{Actor, Role, TaskStatus, WorkLogStatus};

/// Org-wide tiles for the admin landing page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub staff_count: usize,
    pub average_completion: u8,
    pub tasks_by_status: HashMap<String, usize>,
    pub work_logs_by_status: HashMap<String, usize>,
    pub staff_by_employment_status: HashMap<String, usize>,
    /// Open (todo/in_progress) task counts per assignee — the performance view.
    pub open_tasks_by_staff: HashMap<String, usize>,
}

/// A staff member's own slice.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffOverview {
    pub completion: u8,
    pub my_tasks_by_status: HashMap<String, usize>,
    pub pending_logs: usize,
    pub approved_logs: usize,
}

/// Result type for dashboard loads, tagged for the request layer.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DashboardResult<T> {
    Success { data: T },
    Error { message: String },
}

/// Build the admin overview. Non-admin callers get an error result.
pub fn admin_overview(db: &StaffDb, actor: &Actor) -> DashboardResult<AdminOverview> {
    if !actor.role.is_admin() {
        return DashboardResult::Error {
            message: "Forbidden: admin only".to_string(),
        };
    }

    let started = std::time::Instant::now();
    let result = match build_admin_overview(db) {
        Ok(data) => DashboardResult::Success { data },
        Err(e) => DashboardResult::Error {
            message: e.to_string(),
        },
    };
    record_latency(
        "admin_overview",
        started.elapsed().as_millis(),
        DASHBOARD_BUDGET_MS,
    );
    result
}

fn build_admin_overview(db: &StaffDb) -> Result<AdminOverview, ApiError> {
    let profiles = db.list_active_profiles()?;
    let staff: Vec<_> = profiles.iter().filter(|p| p.role == Role::Staff).collect();
    let tasks = db.list_tasks()?;
    let work_logs = db.list_work_logs(None)?;

    let completion_sum: u32 = staff
        .iter()
        .map(|p| completion_percentage(p) as u32)
        .sum();
    let average_completion = if staff.is_empty() {
        0
    } else {
        ((completion_sum + staff.len() as u32 / 2) / staff.len() as u32) as u8
    };

    let open_tasks_by_staff = group_counts(
        tasks.iter().filter(|t| {
            !TaskStatus::from_str_lossy(&t.status).is_terminal() && t.assignee_id.is_some()
        }),
        |t| t.assignee_id.clone().unwrap_or_default(),
    );

    Ok(AdminOverview {
        staff_count: staff.len(),
        average_completion,
        tasks_by_status: group_counts(tasks.iter(), |t| t.status.clone()),
        work_logs_by_status: group_counts(work_logs.iter(), |l| l.status.clone()),
        staff_by_employment_status: group_counts(staff.iter(), |p| {
            p.employment_status
                .clone()
                .unwrap_or_else(|| "unknown".to_string())
        }),
        open_tasks_by_staff,
    })
}

/// Build a staff member's own overview. Clients have no dashboard.
pub fn staff_overview(db: &StaffDb, actor: &Actor) -> DashboardResult<StaffOverview> {
    if actor.role == Role::Client {
        return DashboardResult::Error {
            message: "Forbidden: no dashboard".to_string(),
        };
    }

    let started = std::time::Instant::now();
    let result = match build_staff_overview(db, actor) {
        Ok(data) => DashboardResult::Success { data },
        Err(e) => DashboardResult::Error {
            message: e.to_string(),
        },
    };
    record_latency(
        "staff_overview",
        started.elapsed().as_millis(),
        DASHBOARD_BUDGET_MS,
    );
    result
}

fn build_staff_overview(db: &StaffDb, actor: &Actor) -> Result<StaffOverview, ApiError> {
    let profile = db
        .get_profile(&actor.id)?
        .ok_or_else(|| ApiError::not_found("profile", actor.id.clone()))?;

    let tasks = db.list_tasks_for_assignee(&actor.id)?;
    let logs = db.list_work_logs_for_staff(&actor.id)?;
    let logs_by_status = group_counts(logs.iter(), |l| WorkLogStatus::from_str_lossy(&l.status));

    Ok(StaffOverview {
        completion: completion_percentage(&profile),
        my_tasks_by_status: group_counts(tasks.iter(), |t| t.status.clone()),
        pending_logs: logs_by_status
            .get(&WorkLogStatus::Pending)
            .copied()
            .unwrap_or(0),
        approved_logs: logs_by_status
            .get(&WorkLogStatus::Approved)
            .copied()
            .unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tasks::{create_task, transition_task, TaskRequest};
    use crate::services::worklogs::{review_work_log, submit_work_log, WorkLogRequest};
    use crate::types::ProfileRecord;

    fn admin() -> Actor {
        Actor::new("admin-1", Role::Admin)
    }

    fn seeded() -> StaffDb {
        let db = StaffDb::open_in_memory().expect("open");
        for (id, status) in [("ahmed", "active"), ("sara", "active"), ("omar", "on_leave")] {
            let mut p = ProfileRecord::new(id, Role::Staff, "2026-01-01T00:00:00Z");
            p.full_name = Some(id.to_string());
            p.employment_status = Some(status.to_string());
            db.insert_profile(&p).expect("insert");
        }

        for (title, assignee) in [("A", "ahmed"), ("B", "ahmed"), ("C", "sara")] {
            create_task(
                &db,
                &admin(),
                &TaskRequest {
                    title: title.to_string(),
                    description: None,
                    assignee_id: Some(assignee.to_string()),
                    priority: None,
                    due_date: None,
                },
            )
            .expect("create task");
        }

        let ahmed = Actor::new("ahmed", Role::Staff);
        let log = submit_work_log(
            &db,
            &ahmed,
            &WorkLogRequest {
                work_date: "2026-01-05".to_string(),
                hours: 8.0,
                summary: "Payroll run".to_string(),
            },
        )
        .expect("submit");
        review_work_log(&db, &admin(), &log.id, WorkLogStatus::Approved).expect("approve");
        submit_work_log(
            &db,
            &ahmed,
            &WorkLogRequest {
                work_date: "2026-01-06".to_string(),
                hours: 7.0,
                summary: "Interviews".to_string(),
            },
        )
        .expect("submit");

        db
    }

    #[test]
    fn admin_overview_counts_everything_once() {
        let db = seeded();
        let DashboardResult::Success { data } = admin_overview(&db, &admin()) else {
            panic!("expected success");
        };

        assert_eq!(data.staff_count, 3);
        assert_eq!(data.tasks_by_status.get("todo"), Some(&3));
        assert_eq!(data.tasks_by_status.values().sum::<usize>(), 3);
        assert_eq!(data.work_logs_by_status.get("approved"), Some(&1));
        assert_eq!(data.work_logs_by_status.get("pending"), Some(&1));
        assert_eq!(data.staff_by_employment_status.get("active"), Some(&2));
        assert_eq!(data.staff_by_employment_status.get("on_leave"), Some(&1));
        assert_eq!(data.open_tasks_by_staff.get("ahmed"), Some(&2));
        assert_eq!(data.open_tasks_by_staff.get("sara"), Some(&1));
    }

    #[test]
    fn finished_tasks_leave_the_open_counts() {
        let db = seeded();
        let ahmed = Actor::new("ahmed", Role::Staff);
        let task_id = db.list_tasks_for_assignee("ahmed").expect("list")[0].id.clone();
        transition_task(&db, &ahmed, &task_id, TaskStatus::InProgress).expect("start");
        transition_task(&db, &ahmed, &task_id, TaskStatus::Done).expect("finish");

        let DashboardResult::Success { data } = admin_overview(&db, &admin()) else {
            panic!("expected success");
        };
        assert_eq!(data.open_tasks_by_staff.get("ahmed"), Some(&1));
        assert_eq!(data.tasks_by_status.get("done"), Some(&1));
    }

    #[test]
    fn admin_overview_rejects_staff() {
        let db = seeded();
        let result = admin_overview(&db, &Actor::new("ahmed", Role::Staff));
        assert!(matches!(result, DashboardResult::Error { .. }));
    }

    #[test]
    fn staff_overview_is_their_own_slice() {
        let db = seeded();
        let DashboardResult::Success { data } =
            staff_overview(&db, &Actor::new("ahmed", Role::Staff))
        else {
            panic!("expected success");
        };

        assert_eq!(data.my_tasks_by_status.get("todo"), Some(&2));
        assert_eq!(data.pending_logs, 1);
        assert_eq!(data.approved_logs, 1);
        assert!(data.completion > 0);
    }

    #[test]
    fn empty_store_produces_zeroed_overview() {
        let db = StaffDb::open_in_memory().expect("open");
        let DashboardResult::Success { data } = admin_overview(&db, &admin()) else {
            panic!("expected success");
        };
        assert_eq!(data.staff_count, 0);
        assert_eq!(data.average_completion, 0);
        assert!(data.tasks_by_status.is_empty());
    }
}
