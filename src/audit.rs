//! Audit trail for privileged profile mutations.
//!
//! First-time coordinate sets, admin overrides of locked coordinates and
//! admin employment-field writes are persisted to `{data_dir}/_audit/` so
//! they can be investigated after the fact. Files are written atomically
//! and pruned on a retention window.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::types::Role;
use crate::util::atomic_write_str;

/// How many days to keep audit files before pruning.
pub const AUDIT_RETENTION_DAYS: u32 = 90;

/// What a single audit file records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub at: String,
    pub actor_id: String,
    pub actor_role: Role,
    pub action: String,
    pub profile_id: String,
    pub detail: serde_json::Value,
}

impl AuditEntry {
    pub fn new(
        actor_id: &str,
        actor_role: Role,
        action: &str,
        profile_id: &str,
        detail: serde_json::Value,
    ) -> Self {
        Self {
            at: Utc::now().to_rfc3339(),
            actor_id: actor_id.to_string(),
            actor_role,
            action: action.to_string(),
            profile_id: profile_id.to_string(),
            detail,
        }
    }
}

/// Sanitize an ID for safe use in filenames.
/// Keeps alphanumeric and hyphens; replaces everything else with underscore.
fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Write one audit entry.
///
/// Creates `{data_dir}/_audit/{timestamp}_{action}_{profile_id}.json`.
/// Returns the path of the written file.
pub fn write_audit_entry(data_dir: &Path, entry: &AuditEntry) -> Result<PathBuf, String> {
    let audit_dir = data_dir.join("_audit");
    if !audit_dir.exists() {
        std::fs::create_dir_all(&audit_dir)
            .map_err(|e| format!("Failed to create _audit dir: {}", e))?;
    }

    let timestamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
    let filename = format!(
        "{}_{}_{}.json",
        timestamp,
        sanitize_id(&entry.action),
        sanitize_id(&entry.profile_id)
    );
    let file_path = audit_dir.join(&filename);

    let content = serde_json::to_string_pretty(entry)
        .map_err(|e| format!("Audit serialize failed: {}", e))?;
    atomic_write_str(&file_path, &content).map_err(|e| format!("Audit write failed: {}", e))?;

    Ok(file_path)
}

/// Delete audit files older than the retention period.
///
/// Returns the number of files pruned.
pub fn prune_audit_files(data_dir: &Path) -> usize {
    let audit_dir = data_dir.join("_audit");
    if !audit_dir.exists() {
        return 0;
    }

    let cutoff = Utc::now() - chrono::Duration::days(AUDIT_RETENTION_DAYS as i64);
    let cutoff_ts = cutoff.timestamp();

    let entries = match std::fs::read_dir(&audit_dir) {
        Ok(e) => e,
        Err(_) => return 0,
    };

    let mut pruned = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let mtime = match path.metadata().and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(_) => continue,
        };
        let mtime_secs = mtime
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        if mtime_secs < cutoff_ts && std::fs::remove_file(&path).is_ok() {
            pruned += 1;
        }
    }
    pruned
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_structured_entry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let entry = AuditEntry::new(
            "ahmed-al-rashid",
            Role::Staff,
            "coordinates_first_set",
            "ahmed-al-rashid",
            json!({"latitude": 24.7, "longitude": 46.6}),
        );

        let path = write_audit_entry(dir.path(), &entry).expect("write");
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["actorRole"], "STAFF");
        assert_eq!(parsed["action"], "coordinates_first_set");
        assert_eq!(parsed["detail"]["latitude"], 24.7);
    }

    #[test]
    fn filename_is_sanitized() {
        let dir = tempfile::tempdir().expect("tempdir");
        let entry = AuditEntry::new(
            "admin-1",
            Role::Admin,
            "employment/update",
            "weird id!",
            json!({}),
        );

        let path = write_audit_entry(dir.path(), &entry).expect("write");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.contains("employment_update"));
        assert!(name.contains("weird_id_"));
        assert!(!name.contains('/'));
        assert!(!name.contains(' '));
    }

    #[test]
    fn prune_skips_fresh_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let entry = AuditEntry::new("admin-1", Role::Admin, "a", "p", json!({}));
        write_audit_entry(dir.path(), &entry).expect("write");

        assert_eq!(prune_audit_files(dir.path()), 0);
        assert_eq!(
            std::fs::read_dir(dir.path().join("_audit")).unwrap().count(),
            1
        );
    }

    #[test]
    fn prune_on_missing_dir_is_zero() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(prune_audit_files(dir.path()), 0);
    }
}
