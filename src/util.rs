use std::io::Write;
use std::path::Path;

/// Convert a display name to a URL-safe kebab-case slug.
///
/// Example: "Sarah Chen" → "sarah-chen"
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Derive a profile ID from an email address.
///
/// Example: "sarah.chen@acme.com" → "sarah-chen-acme-com"
pub fn profile_id_from_email(email: &str) -> String {
    slugify(&email.to_lowercase())
}

/// True when the string carries content after trimming.
pub fn non_blank(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Current UTC instant as an ISO-8601 string, the timestamp format used for
/// every TEXT time column in the store.
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Write a file atomically: write to a temp file in the same directory, then
/// rename over the target. A crash mid-write leaves the old content intact.
pub fn atomic_write_str(path: &Path, content: &str) -> Result<(), String> {
    let dir = path
        .parent()
        .ok_or_else(|| format!("No parent directory for {}", path.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| format!("Failed to create temp file: {}", e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| format!("Failed to write temp file: {}", e))?;
    tmp.persist(path)
        .map_err(|e| format!("Failed to persist {}: {}", path.display(), e))?;
    Ok(())
}
