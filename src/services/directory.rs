//! Staff directory listing.

use crate::db::{profiles::StaffFilter, StaffDb};
use crate::error::ApiError;
use crate::latency::{record_latency, DIRECTORY_BUDGET_MS};
use crate::profile::completion::completion_percentage;
use crate::types::{Actor, Role, StaffSummary};

/// List non-archived staff for the directory page. Admins and staff only;
/// clients have no directory access.
pub fn list_staff(
    db: &StaffDb,
    actor: &Actor,
    filter: &StaffFilter,
) -> Result<Vec<StaffSummary>, ApiError> {
    if actor.role == Role::Client {
        return Err(ApiError::Authorization("staff directory".to_string()));
    }

    let started = std::time::Instant::now();

    let summaries = db
        .list_staff(filter)?
        .into_iter()
        .map(|p| StaffSummary {
            completion: completion_percentage(&p),
            id: p.id,
            full_name: p.full_name,
            job_title: p.job_title,
            work_location: p.work_location,
            employment_status: p.employment_status,
        })
        .collect();

    record_latency("list_staff", started.elapsed().as_millis(), DIRECTORY_BUDGET_MS);
    Ok(summaries)
}
