//! Shared domain types: roles, profiles, tasks, work logs.
//!
//! Everything that crosses the boundary to the request layer serializes
//! camelCase. Enums store lowercase strings in SQLite via `as_str` and parse
//! back leniently via `from_str_lossy`, so an unexpected value in the store
//! degrades to a default instead of failing the whole read.

use serde::{Deserialize, Serialize};

/// The role attached to an authenticated actor and to every profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Staff,
    Client,
}

impl Role {
    /// String label for SQL storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Client => "client",
        }
    }

    /// Parse from SQL string. Unknown values degrade to the least-privileged role.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            "staff" => Role::Staff,
            _ => Role::Client,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// The role-bearing identity performing an operation. Supplied by the
/// authentication layer, which has already verified the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// Identity document kind on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    IdCard,
    Passport,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::IdCard => "id_card",
            DocumentType::Passport => "passport",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "id_card" | "ID_CARD" => Some(DocumentType::IdCard),
            "passport" | "PASSPORT" => Some(DocumentType::Passport),
            _ => None,
        }
    }
}

/// The HR profile for one user. Created at account provisioning, updated
/// throughout employment, never hard-deleted — offboarding sets `archived`.
///
/// Optional fields are genuinely optional states, not errors. The completion
/// percentage is always derived from the current values (`profile::completion`)
/// and never stored on the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub id: String,
    pub role: Role,

    // Personal
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub nationality: Option<String>,
    pub profile_image: Option<String>,

    // Contact
    pub mobile: Option<String>,
    pub contact_email: Option<String>,
    pub address_city: Option<String>,
    pub address_country: Option<String>,

    // Geolocation. Once both are populated in-bounds they are admin-only
    // (`profile::authorization::coordinates_locked`).
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    // Emergency contact
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_contact_relationship: Option<String>,

    // Free-text summaries
    pub education_summary: Option<String>,
    pub work_experience_summary: Option<String>,
    pub english_proficiency: Option<String>,
    pub certifications: Option<String>,
    pub professional_development: Option<String>,

    // Identity documents
    pub document_type: Option<DocumentType>,
    pub document_image: Option<String>,

    // Employment — admin-only writes
    pub hire_date: Option<String>,
    pub contract_type: Option<String>,
    pub employment_status: Option<String>,
    pub notice_period: Option<String>,
    pub work_schedule: Option<String>,
    pub work_location: Option<String>,
    pub direct_manager_id: Option<String>,
    pub job_title: Option<String>,
    pub job_level: Option<String>,
    pub basic_salary: Option<f64>,
    pub bonus: Option<f64>,

    pub archived: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl ProfileRecord {
    /// A blank profile shell, as minted at account provisioning.
    pub fn new(id: impl Into<String>, role: Role, now_iso: impl Into<String>) -> Self {
        let now = now_iso.into();
        Self {
            id: id.into(),
            role,
            full_name: None,
            date_of_birth: None,
            gender: None,
            marital_status: None,
            nationality: None,
            profile_image: None,
            mobile: None,
            contact_email: None,
            address_city: None,
            address_country: None,
            latitude: None,
            longitude: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            emergency_contact_relationship: None,
            education_summary: None,
            work_experience_summary: None,
            english_proficiency: None,
            certifications: None,
            professional_development: None,
            document_type: None,
            document_image: None,
            hire_date: None,
            contract_type: None,
            employment_status: None,
            notice_period: None,
            work_schedule: None,
            work_location: None,
            direct_manager_id: None,
            job_title: None,
            job_level: None,
            basic_salary: None,
            bonus: None,
            archived: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "in_progress" => TaskStatus::InProgress,
            "done" => TaskStatus::Done,
            "cancelled" => TaskStatus::Cancelled,
            _ => TaskStatus::Todo,
        }
    }

    /// Terminal states accept no further staff transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Cancelled)
    }
}

/// Task priority. P2 is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    P1,
    P2,
    P3,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::P1 => "P1",
            TaskPriority::P2 => "P2",
            TaskPriority::P3 => "P3",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "P1" => TaskPriority::P1,
            "P3" => TaskPriority::P3,
            _ => TaskPriority::P2,
        }
    }
}

/// Work-log review state: pending until an admin approves or rejects.
/// Approved and rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkLogStatus {
    Pending,
    Approved,
    Rejected,
}

impl WorkLogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkLogStatus::Pending => "pending",
            WorkLogStatus::Approved => "approved",
            WorkLogStatus::Rejected => "rejected",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "approved" => WorkLogStatus::Approved,
            "rejected" => WorkLogStatus::Rejected,
            _ => WorkLogStatus::Pending,
        }
    }

    pub fn is_reviewed(&self) -> bool {
        !matches!(self, WorkLogStatus::Pending)
    }
}

/// Directory row: the lightweight projection of a staff profile shown in
/// the staff directory listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSummary {
    pub id: String,
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub work_location: Option<String>,
    pub employment_status: Option<String>,
    pub completion: u8,
}
