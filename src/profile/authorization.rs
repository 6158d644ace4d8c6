//! Per-field write authorization for profile mutations.
//!
//! One centralized rule evaluator replaces per-endpoint role checks. The
//! ownership gate runs once per request; every field in the batch is then
//! judged independently against the admin-only set, the coordinate lock and
//! the coordinate bounds. Outcomes are data — the caller commits the allowed
//! subset and reports the denials.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::profile::fields::{latitude_in_bounds, longitude_in_bounds, ProfileField};
use crate::types::{Actor, ProfileRecord, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotOwner,
    AdminOnlyField,
    CoordinatesLocked,
    InvalidLatitude,
    InvalidLongitude,
    InvalidValue,
    UnknownField,
}

impl DenyReason {
    /// User-facing message for the request layer.
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::NotOwner => "Forbidden: not owner",
            DenyReason::AdminOnlyField => "Forbidden: admin-only field",
            DenyReason::CoordinatesLocked => "Forbidden: coordinates locked",
            DenyReason::InvalidLatitude => "Invalid latitude",
            DenyReason::InvalidLongitude => "Invalid longitude",
            DenyReason::InvalidValue => "Invalid value",
            DenyReason::UnknownField => "Unknown field",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDecision {
    Allow,
    Deny(DenyReason),
}

/// One denied field of an update batch, ready to serialize back to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDenial {
    pub field: String,
    pub reason: String,
}

/// Result of evaluating a multi-field update: fields cleared for commit and
/// fields denied with reasons.
#[derive(Debug)]
pub struct UpdateEvaluation {
    pub allowed: Vec<(ProfileField, Value)>,
    pub denied: Vec<FieldDenial>,
}

impl UpdateEvaluation {
    pub fn is_fully_denied(&self) -> bool {
        self.allowed.is_empty() && !self.denied.is_empty()
    }
}

/// The coordinate lock: both coordinates populated with in-bounds values.
/// This is a data-state condition, not a concurrency mechanism — it flips
/// once (unset → set-by-anyone, set → mutable-by-admin-only).
pub fn coordinates_locked(profile: &ProfileRecord) -> bool {
    match (profile.latitude, profile.longitude) {
        (Some(lat), Some(lng)) => latitude_in_bounds(lat) && longitude_in_bounds(lng),
        _ => false,
    }
}

/// Judge a single field write. Assumes the ownership gate already passed.
pub fn authorize_field_update(
    actor_role: Role,
    field: ProfileField,
    current: &ProfileRecord,
    requested: &Value,
) -> FieldDecision {
    if field.is_admin_only() && !actor_role.is_admin() {
        return FieldDecision::Deny(DenyReason::AdminOnlyField);
    }

    if field.is_geolocation() && coordinates_locked(current) && !actor_role.is_admin() {
        return FieldDecision::Deny(DenyReason::CoordinatesLocked);
    }

    // Bounds apply to every actor, admin included.
    if field == ProfileField::Latitude {
        return match requested.as_f64() {
            Some(v) if latitude_in_bounds(v) => FieldDecision::Allow,
            _ => FieldDecision::Deny(DenyReason::InvalidLatitude),
        };
    }
    if field == ProfileField::Longitude {
        return match requested.as_f64() {
            Some(v) if longitude_in_bounds(v) => FieldDecision::Allow,
            _ => FieldDecision::Deny(DenyReason::InvalidLongitude),
        };
    }

    if !value_shape_matches(field, requested) {
        return FieldDecision::Deny(DenyReason::InvalidValue);
    }

    FieldDecision::Allow
}

/// Numeric columns take JSON numbers, everything else strings; null clears.
/// Coordinates are handled above and never reach this check.
fn value_shape_matches(field: ProfileField, value: &Value) -> bool {
    if value.is_null() {
        return true;
    }
    if field.is_numeric() {
        return value.as_f64().map(f64::is_finite).unwrap_or(false);
    }
    if field == ProfileField::DocumentType {
        return value
            .as_str()
            .map(|s| crate::types::DocumentType::parse(s).is_some())
            .unwrap_or(false);
    }
    value.is_string()
}

/// Evaluate a parsed update request against the stored profile.
///
/// The ownership gate is request-level: a non-admin actor touching someone
/// else's profile gets an authorization error before any field is judged.
/// Past the gate, each field is evaluated independently and the batch is
/// partitioned into `allowed` and `denied`.
pub fn evaluate_update(
    actor: &Actor,
    current: &ProfileRecord,
    changes: &serde_json::Map<String, Value>,
) -> Result<UpdateEvaluation, ApiError> {
    if !actor.role.is_admin() && actor.id != current.id {
        return Err(ApiError::Authorization("not owner".to_string()));
    }

    let mut allowed = Vec::new();
    let mut denied = Vec::new();

    for (name, value) in changes {
        let Some(field) = ProfileField::parse(name) else {
            denied.push(FieldDenial {
                field: name.clone(),
                reason: DenyReason::UnknownField.message().to_string(),
            });
            continue;
        };

        match authorize_field_update(actor.role, field, current, value) {
            FieldDecision::Allow => allowed.push((field, value.clone())),
            FieldDecision::Deny(reason) => denied.push(FieldDenial {
                field: name.clone(),
                reason: reason.message().to_string(),
            }),
        }
    }

    Ok(UpdateEvaluation { allowed, denied })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(id: &str) -> ProfileRecord {
        ProfileRecord::new(id, Role::Staff, "2026-01-01T00:00:00Z")
    }

    fn located_profile(id: &str) -> ProfileRecord {
        let mut p = profile(id);
        p.latitude = Some(24.7);
        p.longitude = Some(46.6);
        p
    }

    fn staff(id: &str) -> Actor {
        Actor::new(id, Role::Staff)
    }

    fn admin() -> Actor {
        Actor::new("admin-1", Role::Admin)
    }

    fn changes(pairs: &[(&str, Value)]) -> serde_json::Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn staff_cannot_touch_another_profile() {
        let err = evaluate_update(
            &staff("u-2"),
            &profile("u-1"),
            &changes(&[("fullName", json!("X"))]),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Forbidden: not owner");
    }

    #[test]
    fn admin_may_update_any_profile() {
        let eval = evaluate_update(
            &admin(),
            &profile("u-1"),
            &changes(&[("fullName", json!("X"))]),
        )
        .unwrap();
        assert_eq!(eval.allowed.len(), 1);
        assert!(eval.denied.is_empty());
    }

    #[test]
    fn staff_denied_on_employment_field_regardless_of_value() {
        for value in [json!("Senior Engineer"), json!(null), json!(120000)] {
            let decision = authorize_field_update(
                Role::Staff,
                ProfileField::JobTitle,
                &profile("u-1"),
                &value,
            );
            assert_eq!(
                decision,
                FieldDecision::Deny(DenyReason::AdminOnlyField),
                "value {value:?}"
            );
        }
    }

    #[test]
    fn admin_allowed_on_employment_field() {
        let decision = authorize_field_update(
            Role::Admin,
            ProfileField::BasicSalary,
            &profile("u-1"),
            &json!(18000.0),
        );
        assert_eq!(decision, FieldDecision::Allow);
    }

    #[test]
    fn first_time_coordinate_set_allowed_for_staff() {
        let eval = evaluate_update(
            &staff("u-1"),
            &profile("u-1"),
            &changes(&[("latitude", json!(24.7)), ("longitude", json!(46.6))]),
        )
        .unwrap();
        assert_eq!(eval.allowed.len(), 2);
        assert!(eval.denied.is_empty());
    }

    #[test]
    fn locked_coordinates_deny_staff_and_allow_admin() {
        let current = located_profile("u-1");

        let staff_decision = authorize_field_update(
            Role::Staff,
            ProfileField::Latitude,
            &current,
            &json!(25.0),
        );
        assert_eq!(
            staff_decision,
            FieldDecision::Deny(DenyReason::CoordinatesLocked)
        );

        let admin_decision = authorize_field_update(
            Role::Admin,
            ProfileField::Latitude,
            &current,
            &json!(25.0),
        );
        assert_eq!(admin_decision, FieldDecision::Allow);
    }

    #[test]
    fn half_set_coordinates_are_not_locked() {
        let mut current = profile("u-1");
        current.latitude = Some(24.7);
        assert!(!coordinates_locked(&current));

        let decision = authorize_field_update(
            Role::Staff,
            ProfileField::Longitude,
            &current,
            &json!(46.6),
        );
        assert_eq!(decision, FieldDecision::Allow);
    }

    #[test]
    fn out_of_bounds_stored_coordinates_do_not_lock() {
        let mut current = profile("u-1");
        current.latitude = Some(123.0);
        current.longitude = Some(46.6);
        assert!(!coordinates_locked(&current));
    }

    #[test]
    fn latitude_bounds_are_inclusive_and_apply_to_admin() {
        for (value, ok) in [
            (json!(-90.0), true),
            (json!(90.0), true),
            (json!(-90.0001), false),
            (json!(90.0001), false),
            (json!("24.7"), false),
            (json!(null), false),
        ] {
            let decision = authorize_field_update(
                Role::Admin,
                ProfileField::Latitude,
                &located_profile("u-1"),
                &value,
            );
            let expected = if ok {
                FieldDecision::Allow
            } else {
                FieldDecision::Deny(DenyReason::InvalidLatitude)
            };
            assert_eq!(decision, expected, "value {value:?}");
        }
    }

    #[test]
    fn longitude_bounds_mirror_latitude() {
        let decision = authorize_field_update(
            Role::Staff,
            ProfileField::Longitude,
            &profile("u-1"),
            &json!(-180.0001),
        );
        assert_eq!(decision, FieldDecision::Deny(DenyReason::InvalidLongitude));
    }

    #[test]
    fn mixed_batch_partitions_per_field() {
        let eval = evaluate_update(
            &staff("u-1"),
            &profile("u-1"),
            &changes(&[
                ("fullName", json!("Ahmed")),
                ("jobTitle", json!("CTO")),
                ("latitude", json!(200.0)),
                ("favouriteColor", json!("blue")),
            ]),
        )
        .unwrap();

        assert_eq!(eval.allowed.len(), 1);
        assert_eq!(eval.allowed[0].0, ProfileField::FullName);
        assert_eq!(eval.denied.len(), 3);
        let reasons: Vec<&str> = eval.denied.iter().map(|d| d.reason.as_str()).collect();
        assert!(reasons.contains(&"Forbidden: admin-only field"));
        assert!(reasons.contains(&"Invalid latitude"));
        assert!(reasons.contains(&"Unknown field"));
    }

    #[test]
    fn wrong_value_shape_is_a_validation_denial() {
        let decision = authorize_field_update(
            Role::Staff,
            ProfileField::FullName,
            &profile("u-1"),
            &json!(42),
        );
        assert_eq!(decision, FieldDecision::Deny(DenyReason::InvalidValue));

        let decision = authorize_field_update(
            Role::Admin,
            ProfileField::Bonus,
            &profile("u-1"),
            &json!("a lot"),
        );
        assert_eq!(decision, FieldDecision::Deny(DenyReason::InvalidValue));
    }

    #[test]
    fn document_type_must_parse() {
        let ok = authorize_field_update(
            Role::Staff,
            ProfileField::DocumentType,
            &profile("u-1"),
            &json!("PASSPORT"),
        );
        assert_eq!(ok, FieldDecision::Allow);

        let bad = authorize_field_update(
            Role::Staff,
            ProfileField::DocumentType,
            &profile("u-1"),
            &json!("visa"),
        );
        assert_eq!(bad, FieldDecision::Deny(DenyReason::InvalidValue));
    }

    #[test]
    fn null_clears_a_text_field() {
        let decision = authorize_field_update(
            Role::Staff,
            ProfileField::Certifications,
            &profile("u-1"),
            &json!(null),
        );
        assert_eq!(decision, FieldDecision::Allow);
    }
}
