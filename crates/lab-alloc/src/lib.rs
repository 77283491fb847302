//! Preference-based, capacity-constrained allocation of applicants to resources.
//!
//! The [`allocation`] module holds the engine itself; [`import`], [`config`] and
//! [`telemetry`] are the ambient pieces a caller needs to feed it and observe it.

pub mod allocation;
pub mod config;
pub mod error;
pub mod import;
pub mod telemetry;
