//! Table-driven profile field taxonomy.
//!
//! Admin-only, required and optional sets are declared here as static data,
//! and every authorization or completion decision reads them. Request
//! handlers never compare field names inline.

use crate::types::ProfileRecord;

pub const LATITUDE_MIN: f64 = -90.0;
pub const LATITUDE_MAX: f64 = 90.0;
pub const LONGITUDE_MIN: f64 = -180.0;
pub const LONGITUDE_MAX: f64 = 180.0;

/// Every writable field of a [`ProfileRecord`]. `id`, `role`, `archived` and
/// the timestamps are not writable through the field-update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    // Personal
    FullName,
    DateOfBirth,
    Gender,
    MaritalStatus,
    Nationality,
    ProfileImage,
    // Contact
    Mobile,
    ContactEmail,
    AddressCity,
    AddressCountry,
    // Geolocation
    Latitude,
    Longitude,
    // Emergency contact
    EmergencyContactName,
    EmergencyContactPhone,
    EmergencyContactRelationship,
    // Free-text summaries
    EducationSummary,
    WorkExperienceSummary,
    EnglishProficiency,
    Certifications,
    ProfessionalDevelopment,
    // Documents
    DocumentType,
    DocumentImage,
    // Employment (admin-only)
    HireDate,
    ContractType,
    EmploymentStatus,
    NoticePeriod,
    WorkSchedule,
    WorkLocation,
    DirectManagerId,
    JobTitle,
    JobLevel,
    BasicSalary,
    Bonus,
}

pub const ALL_FIELDS: &[ProfileField] = &[
    ProfileField::FullName,
    ProfileField::DateOfBirth,
    ProfileField::Gender,
    ProfileField::MaritalStatus,
    ProfileField::Nationality,
    ProfileField::ProfileImage,
    ProfileField::Mobile,
    ProfileField::ContactEmail,
    ProfileField::AddressCity,
    ProfileField::AddressCountry,
    ProfileField::Latitude,
    ProfileField::Longitude,
    ProfileField::EmergencyContactName,
    ProfileField::EmergencyContactPhone,
    ProfileField::EmergencyContactRelationship,
    ProfileField::EducationSummary,
    ProfileField::WorkExperienceSummary,
    ProfileField::EnglishProficiency,
    ProfileField::Certifications,
    ProfileField::ProfessionalDevelopment,
    ProfileField::DocumentType,
    ProfileField::DocumentImage,
    ProfileField::HireDate,
    ProfileField::ContractType,
    ProfileField::EmploymentStatus,
    ProfileField::NoticePeriod,
    ProfileField::WorkSchedule,
    ProfileField::WorkLocation,
    ProfileField::DirectManagerId,
    ProfileField::JobTitle,
    ProfileField::JobLevel,
    ProfileField::BasicSalary,
    ProfileField::Bonus,
];

/// Employment fields only an ADMIN actor may write.
pub const ADMIN_ONLY_FIELDS: &[ProfileField] = &[
    ProfileField::HireDate,
    ProfileField::ContractType,
    ProfileField::EmploymentStatus,
    ProfileField::NoticePeriod,
    ProfileField::WorkSchedule,
    ProfileField::WorkLocation,
    ProfileField::DirectManagerId,
    ProfileField::JobTitle,
    ProfileField::JobLevel,
    ProfileField::BasicSalary,
    ProfileField::Bonus,
];

/// The eight scalar fields counted as required completion units. The two
/// remaining required units are derived checks on the summary fields
/// (`completion::required_units_complete`).
pub const REQUIRED_SCALAR_FIELDS: &[ProfileField] = &[
    ProfileField::FullName,
    ProfileField::Mobile,
    ProfileField::ContactEmail,
    ProfileField::AddressCity,
    ProfileField::AddressCountry,
    ProfileField::EmergencyContactName,
    ProfileField::EmergencyContactPhone,
    ProfileField::EmergencyContactRelationship,
];

/// The twelve supplementary fields counted as optional completion units.
pub const OPTIONAL_FIELDS: &[ProfileField] = &[
    ProfileField::DateOfBirth,
    ProfileField::Gender,
    ProfileField::MaritalStatus,
    ProfileField::Nationality,
    ProfileField::ProfileImage,
    ProfileField::DocumentType,
    ProfileField::DocumentImage,
    ProfileField::EducationSummary,
    ProfileField::WorkExperienceSummary,
    ProfileField::EnglishProficiency,
    ProfileField::Certifications,
    ProfileField::ProfessionalDevelopment,
];

impl ProfileField {
    /// camelCase wire name, matching the request-body keys and the
    /// serialized `ProfileRecord`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::FullName => "fullName",
            ProfileField::DateOfBirth => "dateOfBirth",
            ProfileField::Gender => "gender",
            ProfileField::MaritalStatus => "maritalStatus",
            ProfileField::Nationality => "nationality",
            ProfileField::ProfileImage => "profileImage",
            ProfileField::Mobile => "mobile",
            ProfileField::ContactEmail => "contactEmail",
            ProfileField::AddressCity => "addressCity",
            ProfileField::AddressCountry => "addressCountry",
            ProfileField::Latitude => "latitude",
            ProfileField::Longitude => "longitude",
            ProfileField::EmergencyContactName => "emergencyContactName",
            ProfileField::EmergencyContactPhone => "emergencyContactPhone",
            ProfileField::EmergencyContactRelationship => "emergencyContactRelationship",
            ProfileField::EducationSummary => "educationSummary",
            ProfileField::WorkExperienceSummary => "workExperienceSummary",
            ProfileField::EnglishProficiency => "englishProficiency",
            ProfileField::Certifications => "certifications",
            ProfileField::ProfessionalDevelopment => "professionalDevelopment",
            ProfileField::DocumentType => "documentType",
            ProfileField::DocumentImage => "documentImage",
            ProfileField::HireDate => "hireDate",
            ProfileField::ContractType => "contractType",
            ProfileField::EmploymentStatus => "employmentStatus",
            ProfileField::NoticePeriod => "noticePeriod",
            ProfileField::WorkSchedule => "workSchedule",
            ProfileField::WorkLocation => "workLocation",
            ProfileField::DirectManagerId => "directManagerId",
            ProfileField::JobTitle => "jobTitle",
            ProfileField::JobLevel => "jobLevel",
            ProfileField::BasicSalary => "basicSalary",
            ProfileField::Bonus => "bonus",
        }
    }

    /// SQL column name backing this field.
    pub fn column(&self) -> &'static str {
        match self {
            ProfileField::FullName => "full_name",
            ProfileField::DateOfBirth => "date_of_birth",
            ProfileField::Gender => "gender",
            ProfileField::MaritalStatus => "marital_status",
            ProfileField::Nationality => "nationality",
            ProfileField::ProfileImage => "profile_image",
            ProfileField::Mobile => "mobile",
            ProfileField::ContactEmail => "contact_email",
            ProfileField::AddressCity => "address_city",
            ProfileField::AddressCountry => "address_country",
            ProfileField::Latitude => "latitude",
            ProfileField::Longitude => "longitude",
            ProfileField::EmergencyContactName => "emergency_contact_name",
            ProfileField::EmergencyContactPhone => "emergency_contact_phone",
            ProfileField::EmergencyContactRelationship => "emergency_contact_relationship",
            ProfileField::EducationSummary => "education_summary",
            ProfileField::WorkExperienceSummary => "work_experience_summary",
            ProfileField::EnglishProficiency => "english_proficiency",
            ProfileField::Certifications => "certifications",
            ProfileField::ProfessionalDevelopment => "professional_development",
            ProfileField::DocumentType => "document_type",
            ProfileField::DocumentImage => "document_image",
            ProfileField::HireDate => "hire_date",
            ProfileField::ContractType => "contract_type",
            ProfileField::EmploymentStatus => "employment_status",
            ProfileField::NoticePeriod => "notice_period",
            ProfileField::WorkSchedule => "work_schedule",
            ProfileField::WorkLocation => "work_location",
            ProfileField::DirectManagerId => "direct_manager_id",
            ProfileField::JobTitle => "job_title",
            ProfileField::JobLevel => "job_level",
            ProfileField::BasicSalary => "basic_salary",
            ProfileField::Bonus => "bonus",
        }
    }

    /// Parse a wire name. Returns `None` for anything outside the writable set.
    pub fn parse(name: &str) -> Option<Self> {
        ALL_FIELDS.iter().copied().find(|f| f.as_str() == name)
    }

    pub fn is_admin_only(&self) -> bool {
        ADMIN_ONLY_FIELDS.contains(self)
    }

    pub fn is_geolocation(&self) -> bool {
        matches!(self, ProfileField::Latitude | ProfileField::Longitude)
    }

    /// Fields stored as REAL and written from JSON numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ProfileField::Latitude
                | ProfileField::Longitude
                | ProfileField::BasicSalary
                | ProfileField::Bonus
        )
    }
}

pub fn latitude_in_bounds(value: f64) -> bool {
    value.is_finite() && (LATITUDE_MIN..=LATITUDE_MAX).contains(&value)
}

pub fn longitude_in_bounds(value: f64) -> bool {
    value.is_finite() && (LONGITUDE_MIN..=LONGITUDE_MAX).contains(&value)
}

/// A field counts as complete when its value is present and not the empty
/// string. Numeric zero counts as complete.
pub fn field_is_complete(profile: &ProfileRecord, field: ProfileField) -> bool {
    fn text(v: &Option<String>) -> bool {
        v.as_deref().map(|s| !s.is_empty()).unwrap_or(false)
    }
    match field {
        ProfileField::FullName => text(&profile.full_name),
        ProfileField::DateOfBirth => text(&profile.date_of_birth),
        ProfileField::Gender => text(&profile.gender),
        ProfileField::MaritalStatus => text(&profile.marital_status),
        ProfileField::Nationality => text(&profile.nationality),
        ProfileField::ProfileImage => text(&profile.profile_image),
        ProfileField::Mobile => text(&profile.mobile),
        ProfileField::ContactEmail => text(&profile.contact_email),
        ProfileField::AddressCity => text(&profile.address_city),
        ProfileField::AddressCountry => text(&profile.address_country),
        ProfileField::Latitude => profile.latitude.is_some(),
        ProfileField::Longitude => profile.longitude.is_some(),
        ProfileField::EmergencyContactName => text(&profile.emergency_contact_name),
        ProfileField::EmergencyContactPhone => text(&profile.emergency_contact_phone),
        ProfileField::EmergencyContactRelationship => {
            text(&profile.emergency_contact_relationship)
        }
        ProfileField::EducationSummary => text(&profile.education_summary),
        ProfileField::WorkExperienceSummary => text(&profile.work_experience_summary),
        ProfileField::EnglishProficiency => text(&profile.english_proficiency),
        ProfileField::Certifications => text(&profile.certifications),
        ProfileField::ProfessionalDevelopment => text(&profile.professional_development),
        ProfileField::DocumentType => profile.document_type.is_some(),
        ProfileField::DocumentImage => text(&profile.document_image),
        ProfileField::HireDate => text(&profile.hire_date),
        ProfileField::ContractType => text(&profile.contract_type),
        ProfileField::EmploymentStatus => text(&profile.employment_status),
        ProfileField::NoticePeriod => text(&profile.notice_period),
        ProfileField::WorkSchedule => text(&profile.work_schedule),
        ProfileField::WorkLocation => text(&profile.work_location),
        ProfileField::DirectManagerId => text(&profile.direct_manager_id),
        ProfileField::JobTitle => text(&profile.job_title),
        ProfileField::JobLevel => text(&profile.job_level),
        ProfileField::BasicSalary => profile.basic_salary.is_some(),
        ProfileField::Bonus => profile.bonus.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn wire_names_round_trip() {
        for field in ALL_FIELDS {
            assert_eq!(ProfileField::parse(field.as_str()), Some(*field));
        }
    }

    #[test]
    fn role_and_id_are_not_writable_fields() {
        assert_eq!(ProfileField::parse("role"), None);
        assert_eq!(ProfileField::parse("id"), None);
        assert_eq!(ProfileField::parse("archived"), None);
    }

    #[test]
    fn admin_only_set_is_the_employment_section() {
        assert_eq!(ADMIN_ONLY_FIELDS.len(), 11);
        assert!(ProfileField::BasicSalary.is_admin_only());
        assert!(ProfileField::JobTitle.is_admin_only());
        assert!(!ProfileField::Latitude.is_admin_only());
        assert!(!ProfileField::FullName.is_admin_only());
    }

    #[test]
    fn unit_set_sizes_match_the_rule() {
        assert_eq!(REQUIRED_SCALAR_FIELDS.len(), 8);
        assert_eq!(OPTIONAL_FIELDS.len(), 12);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(latitude_in_bounds(-90.0));
        assert!(latitude_in_bounds(90.0));
        assert!(!latitude_in_bounds(90.0001));
        assert!(!latitude_in_bounds(f64::NAN));
        assert!(longitude_in_bounds(-180.0));
        assert!(longitude_in_bounds(180.0));
        assert!(!longitude_in_bounds(-180.0001));
        assert!(!longitude_in_bounds(f64::INFINITY));
    }

    #[test]
    fn numeric_zero_counts_as_complete() {
        let mut p = crate::types::ProfileRecord::new("u-1", Role::Staff, "2026-01-01T00:00:00Z");
        p.latitude = Some(0.0);
        p.basic_salary = Some(0.0);
        assert!(field_is_complete(&p, ProfileField::Latitude));
        assert!(field_is_complete(&p, ProfileField::BasicSalary));
    }

    #[test]
    fn empty_string_is_incomplete() {
        let mut p = crate::types::ProfileRecord::new("u-1", Role::Staff, "2026-01-01T00:00:00Z");
        p.full_name = Some(String::new());
        assert!(!field_is_complete(&p, ProfileField::FullName));
        p.full_name = Some("Ahmed".to_string());
        assert!(field_is_complete(&p, ProfileField::FullName));
    }
}
