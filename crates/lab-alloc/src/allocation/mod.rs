//! Ranked, capacity-constrained allocation.
//!
//! Applicants are seated by immediate acceptance: round `r` walks the applicants in the
//! order they were supplied and gives each unseated applicant their rank-`r` choice if that
//! resource still has a free seat. Ties between equally ranked applicants are therefore
//! decided by input position alone. An optional improvement pass then moves seated
//! applicants into better-ranked resources that still have free seats.

pub mod domain;
pub mod engine;
mod error;
pub mod improvement;
pub mod intake;
pub mod report;
pub mod state;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantKey, Application, Assignment, CapacityMap, Choice, Rank, RawCapacities, ResourceKey,
    DEFAULT_MAX_RANK,
};
pub use engine::{assign_rounds, Allocation, AllocationConfig, AllocationEngine};
pub use error::AllocationError;
pub use improvement::improve;
pub use intake::{IntakeGuard, ValidatedRequest};
pub use report::{
    AllocationResult, AllocationStats, AssignmentEntry, RankCountEntry, ResourceOccupancyEntry,
};
pub use state::{LedgerViolation, SeatLedger};
