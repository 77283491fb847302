use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::domain::{ApplicantKey, Assignment, CapacityMap, Rank, ResourceKey};
use super::error::AllocationError;

/// Bookkeeping for one allocation run.
///
/// The ledger keeps four coupled lookups (capacity, seat holders, placement and matched
/// rank) and is the only place they are mutated. A ledger is created per run and owned by
/// that run; it is never shared between runs.
#[derive(Debug, Clone, Default)]
pub struct SeatLedger {
    capacities: CapacityMap,
    holders: BTreeMap<ResourceKey, BTreeSet<ApplicantKey>>,
    placements: HashMap<ApplicantKey, ResourceKey>,
    matched_ranks: HashMap<ApplicantKey, Rank>,
}

impl SeatLedger {
    pub fn new(capacities: CapacityMap) -> Self {
        let holders = capacities
            .keys()
            .map(|resource| (resource.clone(), BTreeSet::new()))
            .collect();

        Self {
            capacities,
            holders,
            placements: HashMap::new(),
            matched_ranks: HashMap::new(),
        }
    }

    pub fn knows(&self, resource: &ResourceKey) -> bool {
        self.capacities.contains_key(resource)
    }

    /// Configured capacity; unknown resources report zero.
    pub fn capacity(&self, resource: &ResourceKey) -> u32 {
        self.capacities.get(resource).copied().unwrap_or(0)
    }

    pub fn seats_taken(&self, resource: &ResourceKey) -> usize {
        self.holders.get(resource).map_or(0, BTreeSet::len)
    }

    pub fn remaining(&self, resource: &ResourceKey) -> u32 {
        let taken = u32::try_from(self.seats_taken(resource)).unwrap_or(u32::MAX);
        self.capacity(resource).saturating_sub(taken)
    }

    pub fn has_spare(&self, resource: &ResourceKey) -> bool {
        self.remaining(resource) > 0
    }

    pub fn is_seated(&self, applicant: &ApplicantKey) -> bool {
        self.placements.contains_key(applicant)
    }

    pub fn matched_rank(&self, applicant: &ApplicantKey) -> Option<Rank> {
        self.matched_ranks.get(applicant).copied()
    }

    pub fn assignment(&self, applicant: &ApplicantKey) -> Option<Assignment> {
        let resource = self.placements.get(applicant)?;
        let matched_rank = self.matched_ranks.get(applicant).copied()?;
        Some(Assignment {
            resource: resource.clone(),
            matched_rank,
        })
    }

    pub fn assigned_count(&self) -> usize {
        self.placements.len()
    }

    /// Resources with their configured capacity, in key order.
    pub fn resources(&self) -> impl Iterator<Item = (&ResourceKey, u32)> + '_ {
        self.capacities
            .iter()
            .map(|(resource, capacity)| (resource, *capacity))
    }

    /// Current seat holders of `resource`, in key order.
    pub fn holders(&self, resource: &ResourceKey) -> impl Iterator<Item = &ApplicantKey> + '_ {
        self.holders.get(resource).into_iter().flatten()
    }

    /// Sum of matched ranks over every seated applicant.
    pub fn phi(&self) -> u64 {
        self.matched_ranks.values().map(|rank| u64::from(*rank)).sum()
    }

    /// Change a resource's capacity between phases of a run.
    ///
    /// Unknown resources are added. Capacity can never drop below the seats already held.
    pub fn set_capacity(
        &mut self,
        resource: &ResourceKey,
        capacity: u32,
    ) -> Result<(), AllocationError> {
        let occupied = self.seats_taken(resource);
        if (capacity as usize) < occupied {
            return Err(AllocationError::CapacityBelowOccupancy {
                resource: resource.clone(),
                requested: capacity,
                occupied,
            });
        }

        self.capacities.insert(resource.clone(), capacity);
        self.holders.entry(resource.clone()).or_default();
        debug_assert!(self.verify().is_ok());
        Ok(())
    }

    /// Give an unseated applicant a seat at `resource` if one is free.
    pub(crate) fn seat(
        &mut self,
        applicant: &ApplicantKey,
        resource: &ResourceKey,
        rank: Rank,
    ) -> bool {
        if self.is_seated(applicant) || !self.has_spare(resource) {
            return false;
        }

        self.holders
            .entry(resource.clone())
            .or_default()
            .insert(applicant.clone());
        self.placements.insert(applicant.clone(), resource.clone());
        self.matched_ranks.insert(applicant.clone(), rank);
        debug_assert!(self.verify().is_ok());
        true
    }

    /// Move a seated applicant to a free seat at `resource`, recording the new rank.
    pub(crate) fn relocate(
        &mut self,
        applicant: &ApplicantKey,
        resource: &ResourceKey,
        rank: Rank,
    ) -> bool {
        let Some(current) = self.placements.get(applicant).cloned() else {
            return false;
        };
        if !self.has_spare(resource) {
            return false;
        }

        if current != *resource {
            if let Some(seats) = self.holders.get_mut(&current) {
                seats.remove(applicant);
            }
            self.holders
                .entry(resource.clone())
                .or_default()
                .insert(applicant.clone());
            self.placements.insert(applicant.clone(), resource.clone());
        }
        self.matched_ranks.insert(applicant.clone(), rank);
        debug_assert!(self.verify().is_ok());
        true
    }

    /// Check every ledger invariant, reporting the first one that fails.
    pub fn verify(&self) -> Result<(), LedgerViolation> {
        let mut seen: HashMap<&ApplicantKey, &ResourceKey> = HashMap::new();
        for (resource, seats) in &self.holders {
            let capacity = self.capacity(resource);
            if seats.len() > capacity as usize {
                return Err(LedgerViolation::OverCapacity {
                    resource: resource.clone(),
                    capacity,
                    taken: seats.len(),
                });
            }

            for applicant in seats {
                if seen.insert(applicant, resource).is_some() {
                    return Err(LedgerViolation::DoubleBooked {
                        applicant: applicant.clone(),
                    });
                }
                if self.placements.get(applicant) != Some(resource) {
                    return Err(LedgerViolation::PlacementMismatch {
                        applicant: applicant.clone(),
                    });
                }
            }
        }

        if seen.len() != self.placements.len() {
            return Err(LedgerViolation::OrphanPlacement);
        }

        for applicant in self.placements.keys() {
            if !self.matched_ranks.contains_key(applicant) {
                return Err(LedgerViolation::RankWithoutSeat {
                    applicant: applicant.clone(),
                });
            }
        }
        if let Some(applicant) = self
            .matched_ranks
            .keys()
            .find(|applicant| !self.placements.contains_key(*applicant))
        {
            return Err(LedgerViolation::RankWithoutSeat {
                applicant: applicant.clone(),
            });
        }

        Ok(())
    }
}

/// Broken ledger invariant, reported by [`SeatLedger::verify`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerViolation {
    #[error("{resource} holds {taken} seat(s) but has capacity {capacity}")]
    OverCapacity {
        resource: ResourceKey,
        capacity: u32,
        taken: usize,
    },
    #[error("{applicant} holds more than one seat")]
    DoubleBooked { applicant: ApplicantKey },
    #[error("{applicant} is listed as a seat holder but placed elsewhere")]
    PlacementMismatch { applicant: ApplicantKey },
    #[error("placement recorded without a matching seat holder")]
    OrphanPlacement,
    #[error("{applicant} has a matched rank and a seat that disagree")]
    RankWithoutSeat { applicant: ApplicantKey },
}
