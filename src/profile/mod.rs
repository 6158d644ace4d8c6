//! Profile rules: field taxonomy, completion scoring, write authorization.
//!
//! The three submodules are pure — they take a `ProfileRecord` plus actor
//! context and return data. Persistence and request plumbing live in
//! `services::profiles`.

pub mod authorization;
pub mod completion;
pub mod fields;

pub use authorization::{
    authorize_field_update, evaluate_update, DenyReason, FieldDecision, FieldDenial,
    UpdateEvaluation,
};
pub use completion::{completion_breakdown, completion_percentage, CompletionBreakdown};
pub use fields::ProfileField;
