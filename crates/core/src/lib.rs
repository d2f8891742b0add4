//! Domain core for the property-management dashboard.
//!
//! Pure data and functions only: record types, status enumerations, seed
//! fixtures, filtering, derived statistics and status-transition rules. The
//! mutable store lives in `propdash-store`.

pub mod error;
pub mod filter;
pub mod fixtures;
pub mod models;
pub mod notice;
pub mod schedule;
pub mod stats;
pub mod status;
pub mod transitions;
pub mod types;
