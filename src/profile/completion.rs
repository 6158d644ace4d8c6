//! Profile completion scoring.
//!
//! The percentage is a derived view over 22 units: 10 required (8 scalar
//! fields + 2 non-blank summary checks) and 12 optional fields. It is
//! recomputed from current values on every read and never persisted, so
//! there is no staleness to manage. Filling a previously-empty field never
//! lowers the score.

use serde::Serialize;

use crate::profile::fields::{
    field_is_complete, ProfileField, OPTIONAL_FIELDS, REQUIRED_SCALAR_FIELDS,
};
use crate::types::ProfileRecord;
use crate::util::non_blank;

/// Unit totals behind the percentage denominator.
pub const REQUIRED_UNITS: u32 = 10;
pub const OPTIONAL_UNITS: u32 = 12;
const TOTAL_UNITS: u32 = REQUIRED_UNITS + OPTIONAL_UNITS;

/// Per-section progress for the multi-section profile editor headers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCompletion {
    pub section: &'static str,
    pub completed: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionBreakdown {
    pub percentage: u8,
    pub completed_required: u32,
    pub completed_optional: u32,
    pub sections: Vec<SectionCompletion>,
}

/// Count the completed required units: the 8 scalar fields plus the two
/// derived checks "summary is non-blank after trimming".
fn completed_required_units(profile: &ProfileRecord) -> u32 {
    let scalar = REQUIRED_SCALAR_FIELDS
        .iter()
        .filter(|f| field_is_complete(profile, **f))
        .count() as u32;

    let education = profile
        .education_summary
        .as_deref()
        .map(non_blank)
        .unwrap_or(false) as u32;
    let experience = profile
        .work_experience_summary
        .as_deref()
        .map(non_blank)
        .unwrap_or(false) as u32;

    scalar + education + experience
}

fn completed_optional_units(profile: &ProfileRecord) -> u32 {
    OPTIONAL_FIELDS
        .iter()
        .filter(|f| field_is_complete(profile, **f))
        .count() as u32
}

/// Completion percentage in [0, 100], round-half-up.
pub fn completion_percentage(profile: &ProfileRecord) -> u8 {
    let completed = completed_required_units(profile) + completed_optional_units(profile);
    // Integer round-half-up: (100·c + 11) / 22.
    ((100 * completed + TOTAL_UNITS / 2) / TOTAL_UNITS) as u8
}

/// Full breakdown: overall percentage plus per-section progress.
pub fn completion_breakdown(profile: &ProfileRecord) -> CompletionBreakdown {
    let sections = vec![
        section(
            profile,
            "personal",
            &[
                ProfileField::FullName,
                ProfileField::DateOfBirth,
                ProfileField::Gender,
                ProfileField::MaritalStatus,
                ProfileField::Nationality,
                ProfileField::ProfileImage,
            ],
        ),
        section(
            profile,
            "contact",
            &[
                ProfileField::Mobile,
                ProfileField::ContactEmail,
                ProfileField::AddressCity,
                ProfileField::AddressCountry,
            ],
        ),
        section(
            profile,
            "emergency",
            &[
                ProfileField::EmergencyContactName,
                ProfileField::EmergencyContactPhone,
                ProfileField::EmergencyContactRelationship,
            ],
        ),
        section(
            profile,
            "background",
            &[
                ProfileField::EducationSummary,
                ProfileField::WorkExperienceSummary,
                ProfileField::EnglishProficiency,
                ProfileField::Certifications,
                ProfileField::ProfessionalDevelopment,
            ],
        ),
        section(
            profile,
            "documents",
            &[ProfileField::DocumentType, ProfileField::DocumentImage],
        ),
    ];

    CompletionBreakdown {
        percentage: completion_percentage(profile),
        completed_required: completed_required_units(profile),
        completed_optional: completed_optional_units(profile),
        sections,
    }
}

fn section(
    profile: &ProfileRecord,
    name: &'static str,
    fields: &[ProfileField],
) -> SectionCompletion {
    SectionCompletion {
        section: name,
        completed: fields
            .iter()
            .filter(|f| field_is_complete(profile, **f))
            .count() as u32,
        total: fields.len() as u32,
    }
}
