//! Profile provisioning, reads and the authorization-checked update flow.
//!
//! Every profile mutation funnels through `update_profile`: ownership gate,
//! per-field evaluation, transactional commit of the allowed subset, audit
//! of privileged writes, and a recomputed completion percentage in the
//! response. There is no other write path, so the request layer can never
//! spread unchecked keys onto the store.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::audit::{write_audit_entry, AuditEntry};
use crate::db::StaffDb;
use crate::error::ApiError;
use crate::profile::authorization::{coordinates_locked, evaluate_update, FieldDenial};
use crate::profile::completion::{completion_breakdown, completion_percentage, CompletionBreakdown};
use crate::profile::fields::ProfileField;
use crate::types::{Actor, ProfileRecord, Role};
use crate::util::{now_iso, profile_id_from_email, slugify};

/// Account provisioning input. An id is derived from the contact email when
/// present, otherwise from the full name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequest {
    pub role: Role,
    pub full_name: Option<String>,
    pub contact_email: Option<String>,
}

/// Outcome of a multi-field update: which fields committed, which were
/// denied and why, and the completion percentage after the write.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateOutcome {
    pub updated: Vec<String>,
    pub denied: Vec<FieldDenial>,
    pub completion: u8,
}

/// A profile read. Completion detail is only present for the owner and for
/// admins; other viewers get the redacted record alone.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetail {
    pub profile: ProfileRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionBreakdown>,
}

/// Create a blank profile at account provisioning. Admin only.
pub fn provision_profile(
    db: &StaffDb,
    actor: &Actor,
    request: &ProvisionRequest,
) -> Result<ProfileRecord, ApiError> {
    if !actor.role.is_admin() {
        return Err(ApiError::Authorization("admin only".to_string()));
    }

    let id = match (&request.contact_email, &request.full_name) {
        (Some(email), _) if !email.trim().is_empty() => profile_id_from_email(email.trim()),
        (_, Some(name)) if !name.trim().is_empty() => slugify(name),
        _ => {
            return Err(ApiError::validation(
                "contactEmail",
                "an email or full name is required to derive the profile id",
            ))
        }
    };

    if db.get_profile(&id)?.is_some() {
        return Err(ApiError::validation("id", format!("profile {id} already exists")));
    }

    let mut profile = ProfileRecord::new(id, request.role, now_iso());
    profile.full_name = request.full_name.clone().filter(|s| !s.trim().is_empty());
    profile.contact_email = request
        .contact_email
        .clone()
        .filter(|s| !s.trim().is_empty());

    db.insert_profile(&profile)?;
    log::debug!("Provisioned {} profile {}", profile.role.as_str(), profile.id);
    Ok(profile)
}

/// Read a profile. Owners and admins see everything plus the completion
/// breakdown; other staff get a compensation-redacted record; clients may
/// only read their own.
pub fn get_profile(db: &StaffDb, actor: &Actor, profile_id: &str) -> Result<ProfileDetail, ApiError> {
    let profile = db
        .get_profile(profile_id)?
        .ok_or_else(|| ApiError::not_found("profile", profile_id))?;

    let is_owner = actor.id == profile.id;
    if actor.role.is_admin() || is_owner {
        let completion = completion_breakdown(&profile);
        return Ok(ProfileDetail {
            profile,
            completion: Some(completion),
        });
    }

    if actor.role == Role::Client {
        return Err(ApiError::Authorization("not owner".to_string()));
    }

    Ok(ProfileDetail {
        profile: redact_compensation(profile),
        completion: None,
    })
}

fn redact_compensation(mut profile: ProfileRecord) -> ProfileRecord {
    profile.basic_salary = None;
    profile.bonus = None;
    profile
}

/// Apply a parsed update request to a profile.
///
/// Fields that pass authorization commit in one transaction; denials are
/// reported per field (partial success). `data_dir`, when present, receives
/// audit entries for coordinate first-sets, admin overrides of locked
/// coordinates, and admin employment writes.
pub fn update_profile(
    db: &StaffDb,
    data_dir: Option<&Path>,
    actor: &Actor,
    profile_id: &str,
    changes: &Map<String, Value>,
) -> Result<ProfileUpdateOutcome, ApiError> {
    let current = db
        .get_profile(profile_id)?
        .ok_or_else(|| ApiError::not_found("profile", profile_id))?;

    let evaluation = evaluate_update(actor, &current, changes)?;

    if !evaluation.denied.is_empty() {
        log::debug!(
            "update_profile {}: denied {} of {} fields",
            profile_id,
            evaluation.denied.len(),
            changes.len()
        );
    }

    if !evaluation.allowed.is_empty() {
        let stamp = now_iso();
        db.with_transaction(|db| db.update_profile_fields(profile_id, &evaluation.allowed, &stamp))?;

        if let Some(data_dir) = data_dir {
            audit_privileged_writes(data_dir, actor, &current, &evaluation.allowed);
        }
    }

    let updated_profile = db
        .get_profile(profile_id)?
        .ok_or_else(|| ApiError::not_found("profile", profile_id))?;

    Ok(ProfileUpdateOutcome {
        updated: evaluation
            .allowed
            .iter()
            .map(|(field, _)| field.as_str().to_string())
            .collect(),
        denied: evaluation.denied,
        completion: completion_percentage(&updated_profile),
    })
}

/// Offboarding. Admin only; the row is archived, never deleted.
pub fn archive_profile(db: &StaffDb, actor: &Actor, profile_id: &str) -> Result<(), ApiError> {
    if !actor.role.is_admin() {
        return Err(ApiError::Authorization("admin only".to_string()));
    }
    if !db.archive_profile(profile_id, &now_iso())? {
        return Err(ApiError::not_found("profile", profile_id));
    }
    Ok(())
}

/// Record the mutations worth a paper trail. Audit failures are logged,
/// never propagated — the update itself already committed.
fn audit_privileged_writes(
    data_dir: &Path,
    actor: &Actor,
    before: &ProfileRecord,
    allowed: &[(ProfileField, Value)],
) {
    let geo_writes: Vec<&(ProfileField, Value)> = allowed
        .iter()
        .filter(|(f, _)| f.is_geolocation())
        .collect();
    if !geo_writes.is_empty() {
        let action = if coordinates_locked(before) {
            "coordinates_override"
        } else {
            "coordinates_first_set"
        };
        let detail: Map<String, Value> = geo_writes
            .iter()
            .map(|(f, v)| (f.as_str().to_string(), v.clone()))
            .collect();
        let entry = AuditEntry::new(&actor.id, actor.role, action, &before.id, Value::Object(detail));
        if let Err(e) = write_audit_entry(data_dir, &entry) {
            log::warn!("Audit write failed for {}: {}", before.id, e);
        }
    }

    let employment_fields: Vec<&str> = allowed
        .iter()
        .filter(|(f, _)| f.is_admin_only())
        .map(|(f, _)| f.as_str())
        .collect();
    if !employment_fields.is_empty() {
        let entry = AuditEntry::new(
            &actor.id,
            actor.role,
            "employment_update",
            &before.id,
            json!({ "fields": employment_fields }),
        );
        if let Err(e) = write_audit_entry(data_dir, &entry) {
            log::warn!("Audit write failed for {}: {}", before.id, e);
        }
    }
}
