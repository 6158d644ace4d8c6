//! StaffDesk — backend core for a role-based HR and task-management dashboard.
//!
//! The request layer (out of scope here) authenticates a session into an
//! [`types::Actor`] and parses bodies into JSON; everything after that is
//! this crate: profile completeness and field-authorization rules, a SQLite
//! record store, and role-gated services for profiles, tasks, work logs,
//! the staff directory and dashboard statistics.
//!
//! The one genuine state transition in the domain is the coordinate lock:
//! geolocation fields are writable by their owner until both are populated
//! in-bounds, after which only admins may move them
//! (`profile::authorization`).

pub mod aggregate;
pub mod audit;
pub mod db;
pub mod error;
pub mod latency;
pub mod migrations;
pub mod profile;
pub mod services;
pub mod state;
pub mod types;
pub mod util;

pub use db::StaffDb;
pub use error::{ApiError, ErrorPayload};
pub use state::AppState;
pub use types::{Actor, ProfileRecord, Role};
