use super::domain::{ApplicantKey, Rank, ResourceKey};

/// Precondition violations detected before a run starts, plus refused ledger edits.
///
/// Capacity exhaustion and references to unknown resources are ordinary outcomes and never
/// surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("resource {resource} has negative capacity {capacity}")]
    NegativeCapacity { resource: ResourceKey, capacity: i64 },
    #[error("resource {resource} capacity {capacity} exceeds the supported maximum")]
    CapacityTooLarge { resource: ResourceKey, capacity: i64 },
    #[error("capacity map contains a blank resource key")]
    BlankCapacityKey,
    #[error("application at position {position} has no applicant key")]
    EmptyApplicantKey { position: usize },
    #[error("applicant {applicant} listed a choice without a resource key")]
    EmptyResourceKey { applicant: ApplicantKey },
    #[error("applicant {applicant} listed invalid rank {rank}; ranks start at 1")]
    InvalidRank { applicant: ApplicantKey, rank: Rank },
    #[error("applicant {applicant} appears more than once")]
    DuplicateApplicant { applicant: ApplicantKey },
    #[error("at least one ranked round is required")]
    InvalidMaxRank,
    #[error("cannot set {resource} capacity to {requested}; {occupied} seat(s) already held")]
    CapacityBelowOccupancy {
        resource: ResourceKey,
        requested: u32,
        occupied: usize,
    },
}
