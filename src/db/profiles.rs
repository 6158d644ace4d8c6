use rusqlite::{params, types::Value as SqlValue, Row};
use serde_json::Value;

use super::*;
use crate::profile::fields::ProfileField;
use crate::types::{DocumentType, ProfileRecord, Role};

const PROFILE_COLUMNS: &str = "id, role, full_name, date_of_birth, gender, marital_status,
    nationality, profile_image, mobile, contact_email, address_city, address_country,
    latitude, longitude, emergency_contact_name, emergency_contact_phone,
    emergency_contact_relationship, education_summary, work_experience_summary,
    english_proficiency, certifications, professional_development, document_type,
    document_image, hire_date, contract_type, employment_status, notice_period,
    work_schedule, work_location, direct_manager_id, job_title, job_level,
    basic_salary, bonus, archived, created_at, updated_at";

/// Directory listing filters. All optional; `search` matches the full name
/// case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct StaffFilter {
    pub employment_status: Option<String>,
    pub work_location: Option<String>,
    pub search: Option<String>,
}

impl StaffDb {
    /// Insert a freshly provisioned profile. Fails on duplicate id.
    pub fn insert_profile(&self, profile: &ProfileRecord) -> Result<(), DbError> {
        self.conn.execute(
            &format!(
                "INSERT INTO profiles ({PROFILE_COLUMNS}) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                    ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28,
                    ?29, ?30, ?31, ?32, ?33, ?34, ?35, ?36, ?37, ?38)"
            ),
            params![
                profile.id,
                profile.role.as_str(),
                profile.full_name,
                profile.date_of_birth,
                profile.gender,
                profile.marital_status,
                profile.nationality,
                profile.profile_image,
                profile.mobile,
                profile.contact_email,
                profile.address_city,
                profile.address_country,
                profile.latitude,
                profile.longitude,
                profile.emergency_contact_name,
                profile.emergency_contact_phone,
                profile.emergency_contact_relationship,
                profile.education_summary,
                profile.work_experience_summary,
                profile.english_proficiency,
                profile.certifications,
                profile.professional_development,
                profile.document_type.map(|d| d.as_str()),
                profile.document_image,
                profile.hire_date,
                profile.contract_type,
                profile.employment_status,
                profile.notice_period,
                profile.work_schedule,
                profile.work_location,
                profile.direct_manager_id,
                profile.job_title,
                profile.job_level,
                profile.basic_salary,
                profile.bonus,
                profile.archived as i32,
                profile.created_at,
                profile.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_profile(&self, id: &str) -> Result<Option<ProfileRecord>, DbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"))?;
        let mut rows = stmt.query_map(params![id], Self::map_profile_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Apply an authorized field subset to a profile row. Builds one UPDATE
    /// with only the changed columns; `updated_at` is always stamped.
    pub fn update_profile_fields(
        &self,
        id: &str,
        changes: &[(ProfileField, Value)],
        updated_at: &str,
    ) -> Result<(), DbError> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut set_clauses: Vec<String> = Vec::with_capacity(changes.len() + 1);
        let mut sql_params: Vec<SqlValue> = Vec::with_capacity(changes.len() + 2);

        for (i, (field, value)) in changes.iter().enumerate() {
            set_clauses.push(format!("{} = ?{}", field.column(), i + 1));
            sql_params.push(json_to_sql(*field, value));
        }
        let n = changes.len();
        set_clauses.push(format!("updated_at = ?{}", n + 1));
        sql_params.push(SqlValue::Text(updated_at.to_string()));
        sql_params.push(SqlValue::Text(id.to_string()));

        let sql = format!(
            "UPDATE profiles SET {} WHERE id = ?{}",
            set_clauses.join(", "),
            n + 2
        );
        self.conn
            .execute(&sql, rusqlite::params_from_iter(sql_params))?;
        Ok(())
    }

    /// Non-archived staff profiles matching the filter, ordered by name.
    pub fn list_staff(&self, filter: &StaffFilter) -> Result<Vec<ProfileRecord>, DbError> {
        let mut sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles
             WHERE role = 'staff' AND archived = 0"
        );
        let mut sql_params: Vec<SqlValue> = Vec::new();

        if let Some(ref status) = filter.employment_status {
            sql_params.push(SqlValue::Text(status.clone()));
            sql.push_str(&format!(" AND employment_status = ?{}", sql_params.len()));
        }
        if let Some(ref location) = filter.work_location {
            sql_params.push(SqlValue::Text(location.clone()));
            sql.push_str(&format!(" AND work_location = ?{}", sql_params.len()));
        }
        if let Some(ref search) = filter.search {
            sql_params.push(SqlValue::Text(format!("%{}%", search.to_lowercase())));
            sql.push_str(&format!(
                " AND LOWER(COALESCE(full_name, '')) LIKE ?{}",
                sql_params.len()
            ));
        }
        sql.push_str(" ORDER BY full_name COLLATE NOCASE ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(sql_params), Self::map_profile_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Every non-archived profile, any role. Backs admin-side aggregation.
    pub fn list_active_profiles(&self) -> Result<Vec<ProfileRecord>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE archived = 0 ORDER BY id ASC"
        ))?;
        let rows = stmt.query_map([], Self::map_profile_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Offboarding: profiles are never hard-deleted.
    pub fn archive_profile(&self, id: &str, updated_at: &str) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE profiles SET archived = 1, updated_at = ?2 WHERE id = ?1",
            params![id, updated_at],
        )?;
        Ok(changed > 0)
    }

    fn map_profile_row(row: &Row) -> Result<ProfileRecord, rusqlite::Error> {
        let role: String = row.get(1)?;
        let document_type: Option<String> = row.get(22)?;
        Ok(ProfileRecord {
            id: row.get(0)?,
            role: Role::from_str_lossy(&role),
            full_name: row.get(2)?,
            date_of_birth: row.get(3)?,
            gender: row.get(4)?,
            marital_status: row.get(5)?,
            nationality: row.get(6)?,
            profile_image: row.get(7)?,
            mobile: row.get(8)?,
            contact_email: row.get(9)?,
            address_city: row.get(10)?,
            address_country: row.get(11)?,
            latitude: row.get(12)?,
            longitude: row.get(13)?,
            emergency_contact_name: row.get(14)?,
            emergency_contact_phone: row.get(15)?,
            emergency_contact_relationship: row.get(16)?,
            education_summary: row.get(17)?,
            work_experience_summary: row.get(18)?,
            english_proficiency: row.get(19)?,
            certifications: row.get(20)?,
            professional_development: row.get(21)?,
            document_type: document_type.as_deref().and_then(DocumentType::parse),
            document_image: row.get(23)?,
            hire_date: row.get(24)?,
            contract_type: row.get(25)?,
            employment_status: row.get(26)?,
            notice_period: row.get(27)?,
            work_schedule: row.get(28)?,
            work_location: row.get(29)?,
            direct_manager_id: row.get(30)?,
            job_title: row.get(31)?,
            job_level: row.get(32)?,
            basic_salary: row.get(33)?,
            bonus: row.get(34)?,
            archived: row.get::<_, i64>(35)? != 0,
            created_at: row.get(36)?,
            updated_at: row.get(37)?,
        })
    }
}

/// Convert an authorized JSON value to its SQL representation. Shapes were
/// validated by the authorization pass; anything unexpected clears the column.
fn json_to_sql(field: ProfileField, value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Number(n) if field.is_numeric() => {
            n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null)
        }
        Value::String(s) if field == ProfileField::DocumentType => DocumentType::parse(s)
            .map(|d| SqlValue::Text(d.as_str().to_string()))
            .unwrap_or(SqlValue::Null),
        Value::String(s) => SqlValue::Text(s.clone()),
        _ => SqlValue::Null,
    }
}
