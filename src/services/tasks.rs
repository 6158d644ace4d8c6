//! Role-gated task management.
//!
//! Admins own the task lifecycle: create, edit, delete, cancel, assign.
//! Staff work their own queue: todo → in_progress → done on tasks assigned
//! to them. Clients have no task surface.

use serde::Deserialize;
use uuid::Uuid;

use crate::db::{DbTask, StaffDb};
use crate::error::ApiError;
use crate::types::{Actor, Role, TaskPriority, TaskStatus};
use crate::util::{non_blank, now_iso};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<String>,
}

/// Create a task. Admin only; the assignee, when given, must be an active
/// staff profile.
pub fn create_task(db: &StaffDb, actor: &Actor, request: &TaskRequest) -> Result<DbTask, ApiError> {
    if !actor.role.is_admin() {
        return Err(ApiError::Authorization("admin only".to_string()));
    }
    validate_request(db, request)?;

    let now = now_iso();
    let task = DbTask {
        id: Uuid::new_v4().to_string(),
        title: request.title.trim().to_string(),
        description: request.description.clone(),
        status: TaskStatus::Todo.as_str().to_string(),
        priority: request.priority.unwrap_or(TaskPriority::P2).as_str().to_string(),
        assignee_id: request.assignee_id.clone(),
        created_by: actor.id.clone(),
        due_date: request.due_date.clone(),
        created_at: now.clone(),
        updated_at: now,
        completed_at: None,
    };
    db.insert_task(&task)?;
    log::debug!("Created task {} for {:?}", task.id, task.assignee_id);
    Ok(task)
}

/// Edit title/description/priority/assignee/due date. Admin only.
pub fn update_task(
    db: &StaffDb,
    actor: &Actor,
    task_id: &str,
    request: &TaskRequest,
) -> Result<DbTask, ApiError> {
    if !actor.role.is_admin() {
        return Err(ApiError::Authorization("admin only".to_string()));
    }
    validate_request(db, request)?;

    let mut task = db
        .get_task(task_id)?
        .ok_or_else(|| ApiError::not_found("task", task_id))?;

    task.title = request.title.trim().to_string();
    task.description = request.description.clone();
    task.priority = request
        .priority
        .map(|p| p.as_str().to_string())
        .unwrap_or(task.priority);
    task.assignee_id = request.assignee_id.clone();
    task.due_date = request.due_date.clone();
    task.updated_at = now_iso();

    db.update_task(&task)?;
    Ok(task)
}

/// Delete a task outright. Admin only.
pub fn delete_task(db: &StaffDb, actor: &Actor, task_id: &str) -> Result<(), ApiError> {
    if !actor.role.is_admin() {
        return Err(ApiError::Authorization("admin only".to_string()));
    }
    if !db.delete_task(task_id)? {
        return Err(ApiError::not_found("task", task_id));
    }
    Ok(())
}

/// Transition a task's status.
///
/// Admins may move a task anywhere except cancelling one already done.
/// Staff may only advance their own tasks along todo → in_progress → done.
pub fn transition_task(
    db: &StaffDb,
    actor: &Actor,
    task_id: &str,
    new_status: TaskStatus,
) -> Result<DbTask, ApiError> {
    if actor.role == Role::Client {
        return Err(ApiError::Authorization("no task access".to_string()));
    }

    let task = db
        .get_task(task_id)?
        .ok_or_else(|| ApiError::not_found("task", task_id))?;
    let current = TaskStatus::from_str_lossy(&task.status);

    if actor.role.is_admin() {
        if new_status == TaskStatus::Cancelled && current == TaskStatus::Done {
            return Err(ApiError::validation("status", "task is already done"));
        }
    } else {
        if task.assignee_id.as_deref() != Some(actor.id.as_str()) {
            return Err(ApiError::Authorization("not assignee".to_string()));
        }
        let permitted = matches!(
            (current, new_status),
            (TaskStatus::Todo, TaskStatus::InProgress)
                | (TaskStatus::InProgress, TaskStatus::Done)
        );
        if !permitted {
            return Err(ApiError::validation(
                "status",
                format!("cannot move {} to {}", current.as_str(), new_status.as_str()),
            ));
        }
    }

    db.set_task_status(task_id, new_status, &now_iso())?;
    let updated = db
        .get_task(task_id)?
        .ok_or_else(|| ApiError::not_found("task", task_id))?;
    Ok(updated)
}

/// List tasks for the caller's role: admins see everything (optionally for
/// one assignee), staff see their own queue.
pub fn list_tasks(
    db: &StaffDb,
    actor: &Actor,
    assignee: Option<&str>,
) -> Result<Vec<DbTask>, ApiError> {
    match actor.role {
        Role::Admin => match assignee {
            Some(id) => Ok(db.list_tasks_for_assignee(id)?),
            None => Ok(db.list_tasks()?),
        },
        Role::Staff => Ok(db.list_tasks_for_assignee(&actor.id)?),
        Role::Client => Err(ApiError::Authorization("no task access".to_string())),
    }
}

fn validate_request(db: &StaffDb, request: &TaskRequest) -> Result<(), ApiError> {
    if !non_blank(&request.title) {
        return Err(ApiError::validation("title", "must not be blank"));
    }
    if let Some(ref assignee) = request.assignee_id {
        let profile = db
            .get_profile(assignee)?
            .ok_or_else(|| ApiError::not_found("profile", assignee.clone()))?;
        if profile.role != Role::Staff || profile.archived {
            return Err(ApiError::validation(
                "assigneeId",
                "assignee must be an active staff profile",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProfileRecord;

    fn admin() -> Actor {
        Actor::new("admin-1", Role::Admin)
    }

    fn seeded() -> StaffDb {
        let db = StaffDb::open_in_memory().expect("open");
        for id in ["ahmed", "sara"] {
            db.insert_profile(&ProfileRecord::new(id, Role::Staff, "2026-01-01T00:00:00Z"))
                .expect("insert");
        }
        db
    }

    fn request(title: &str, assignee: Option<&str>) -> TaskRequest {
        TaskRequest {
            title: title.to_string(),
            description: None,
            assignee_id: assignee.map(str::to_string),
            priority: None,
            due_date: None,
        }
    }

    #[test]
    fn create_requires_admin_and_valid_assignee() {
        let db = seeded();

        let err = create_task(&db, &Actor::new("ahmed", Role::Staff), &request("T", None))
            .unwrap_err();
        assert_eq!(err.to_string(), "Forbidden: admin only");

        let err = create_task(&db, &admin(), &request("T", Some("ghost"))).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));

        let err = create_task(&db, &admin(), &request("   ", None)).unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));

        let task = create_task(&db, &admin(), &request("Prepare onboarding", Some("ahmed")))
            .expect("create");
        assert_eq!(task.status, "todo");
        assert_eq!(task.priority, "P2");
    }

    #[test]
    fn staff_advance_their_own_queue_only() {
        let db = seeded();
        let task = create_task(&db, &admin(), &request("T", Some("ahmed"))).expect("create");
        let ahmed = Actor::new("ahmed", Role::Staff);
        let sara = Actor::new("sara", Role::Staff);

        let err = transition_task(&db, &sara, &task.id, TaskStatus::InProgress).unwrap_err();
        assert_eq!(err.to_string(), "Forbidden: not assignee");

        let t = transition_task(&db, &ahmed, &task.id, TaskStatus::InProgress).expect("start");
        assert_eq!(t.status, "in_progress");

        // No skipping straight from todo, and no resurrecting done work.
        let err = transition_task(&db, &ahmed, &task.id, TaskStatus::Todo).unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));

        let t = transition_task(&db, &ahmed, &task.id, TaskStatus::Done).expect("finish");
        assert_eq!(t.status, "done");
        assert!(t.completed_at.is_some());

        let err = transition_task(&db, &ahmed, &task.id, TaskStatus::InProgress).unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn admin_can_cancel_unless_done() {
        let db = seeded();
        let task = create_task(&db, &admin(), &request("T", Some("ahmed"))).expect("create");

        let t = transition_task(&db, &admin(), &task.id, TaskStatus::Cancelled).expect("cancel");
        assert_eq!(t.status, "cancelled");

        let task2 = create_task(&db, &admin(), &request("T2", Some("ahmed"))).expect("create");
        transition_task(&db, &admin(), &task2.id, TaskStatus::Done).expect("done");
        let err = transition_task(&db, &admin(), &task2.id, TaskStatus::Cancelled).unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn listing_is_scoped_by_role() {
        let db = seeded();
        create_task(&db, &admin(), &request("A", Some("ahmed"))).expect("create");
        create_task(&db, &admin(), &request("B", Some("sara"))).expect("create");
        create_task(&db, &admin(), &request("C", None)).expect("create");

        assert_eq!(list_tasks(&db, &admin(), None).expect("all").len(), 3);
        assert_eq!(
            list_tasks(&db, &admin(), Some("sara")).expect("sara").len(),
            1
        );
        assert_eq!(
            list_tasks(&db, &Actor::new("ahmed", Role::Staff), None)
                .expect("own")
                .len(),
            1
        );
        assert!(list_tasks(&db, &Actor::new("c", Role::Client), None).is_err());
    }

    #[test]
    fn update_and_delete_are_admin_surfaces() {
        let db = seeded();
        let task = create_task(&db, &admin(), &request("T", Some("ahmed"))).expect("create");

        let mut edit = request("Retitled", Some("sara"));
        edit.priority = Some(TaskPriority::P1);
        let updated = update_task(&db, &admin(), &task.id, &edit).expect("update");
        assert_eq!(updated.title, "Retitled");
        assert_eq!(updated.priority, "P1");
        assert_eq!(updated.assignee_id.as_deref(), Some("sara"));

        let err = delete_task(&db, &Actor::new("sara", Role::Staff), &task.id).unwrap_err();
        assert_eq!(err.to_string(), "Forbidden: admin only");
        delete_task(&db, &admin(), &task.id).expect("delete");
        assert!(db.get_task(&task.id).expect("get").is_none());
    }
}
