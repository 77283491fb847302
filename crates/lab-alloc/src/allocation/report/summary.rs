use std::collections::BTreeMap;

use super::super::domain::{ApplicantKey, Application, Rank, ResourceKey};
use super::super::state::SeatLedger;
use super::views::{AllocationStats, AssignmentEntry, RankCountEntry, ResourceOccupancyEntry};

/// Free seats per resource, in key order.
pub fn remaining_capacity(ledger: &SeatLedger) -> BTreeMap<ResourceKey, u32> {
    ledger
        .resources()
        .map(|(resource, _)| (resource.clone(), ledger.remaining(resource)))
        .collect()
}

/// Applicants without a seat, in input order.
pub fn unassigned(applications: &[Application], ledger: &SeatLedger) -> Vec<ApplicantKey> {
    applications
        .iter()
        .filter(|application| !ledger.is_seated(&application.applicant))
        .map(|application| application.applicant.clone())
        .collect()
}

/// Seated applicants with their resource and matched rank, in input order.
pub fn assignments(applications: &[Application], ledger: &SeatLedger) -> Vec<AssignmentEntry> {
    applications
        .iter()
        .filter_map(|application| {
            ledger
                .assignment(&application.applicant)
                .map(|assignment| AssignmentEntry {
                    applicant: application.applicant.clone(),
                    resource: assignment.resource,
                    matched_rank: assignment.matched_rank,
                })
        })
        .collect()
}

pub fn summarize(
    applications: &[Application],
    ledger: &SeatLedger,
    max_rank: Rank,
) -> AllocationStats {
    let mut per_rank: Vec<RankCountEntry> = (1..=max_rank)
        .map(|rank| RankCountEntry { rank, count: 0 })
        .collect();
    let mut assigned = 0usize;

    for application in applications {
        if let Some(rank) = ledger.matched_rank(&application.applicant) {
            assigned += 1;
            if let Some(entry) = per_rank.iter_mut().find(|entry| entry.rank == rank) {
                entry.count += 1;
            }
        }
    }

    AllocationStats {
        total_applications: applications.len(),
        assigned,
        per_rank,
        unassigned: applications.len() - assigned,
    }
}

/// Capacity, occupancy and seat holders for each resource; holders are listed in input order.
pub fn resource_occupancy(
    applications: &[Application],
    ledger: &SeatLedger,
) -> Vec<ResourceOccupancyEntry> {
    let mut holders: BTreeMap<ResourceKey, Vec<ApplicantKey>> = BTreeMap::new();
    for application in applications {
        if let Some(assignment) = ledger.assignment(&application.applicant) {
            holders
                .entry(assignment.resource)
                .or_default()
                .push(application.applicant.clone());
        }
    }

    ledger
        .resources()
        .map(|(resource, capacity)| ResourceOccupancyEntry {
            resource: resource.clone(),
            capacity,
            taken: ledger.seats_taken(resource),
            remaining: ledger.remaining(resource),
            holders: holders.remove(resource).unwrap_or_default(),
        })
        .collect()
}
