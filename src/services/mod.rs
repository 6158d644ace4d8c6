//! Business logic over the record store, one module per surface.
//!
//! Services take the open store plus the authenticated actor and return
//! plain data or `ApiError`. All role and ownership gating happens here —
//! the store layer trusts its callers.

pub mod dashboard;
pub mod directory;
pub mod profiles;
pub mod tasks;
pub mod worklogs;
