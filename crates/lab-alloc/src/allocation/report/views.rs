use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicantKey, Rank, ResourceKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentEntry {
    pub applicant: ApplicantKey,
    pub resource: ResourceKey,
    pub matched_rank: Rank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankCountEntry {
    pub rank: Rank,
    pub count: usize,
}

/// Aggregate counts for a run. `assigned + unassigned == total_applications` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationStats {
    pub total_applications: usize,
    pub assigned: usize,
    pub per_rank: Vec<RankCountEntry>,
    pub unassigned: usize,
}

impl AllocationStats {
    /// Applicants seated at `rank`; zero for ranks outside the processed rounds.
    pub fn count_at(&self, rank: Rank) -> usize {
        self.per_rank
            .iter()
            .find(|entry| entry.rank == rank)
            .map_or(0, |entry| entry.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub assignments: Vec<AssignmentEntry>,
    pub stats: AllocationStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOccupancyEntry {
    pub resource: ResourceKey,
    pub capacity: u32,
    pub taken: usize,
    pub remaining: u32,
    pub holders: Vec<ApplicantKey>,
}
