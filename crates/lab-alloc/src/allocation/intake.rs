use std::collections::HashSet;

use tracing::debug;

use super::domain::{Application, CapacityMap, Rank, RawCapacities};
use super::error::AllocationError;

/// Applications and capacities that passed the boundary checks for one run.
///
/// Only [`IntakeGuard::validate`] builds one.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub(crate) applications: Vec<Application>,
    pub(crate) capacities: CapacityMap,
    pub(crate) max_rank: Rank,
}

impl ValidatedRequest {
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn capacities(&self) -> &CapacityMap {
        &self.capacities
    }

    pub fn max_rank(&self) -> Rank {
        self.max_rank
    }
}

/// Guard responsible for producing [`ValidatedRequest`] instances.
///
/// Everything that can abort a run is checked here, before any ledger exists.
#[derive(Debug, Clone, Copy)]
pub struct IntakeGuard {
    max_rank: Rank,
}

impl IntakeGuard {
    pub fn new(max_rank: Rank) -> Self {
        Self { max_rank }
    }

    pub fn max_rank(&self) -> Rank {
        self.max_rank
    }

    pub fn validate(
        &self,
        applications: Vec<Application>,
        capacities: RawCapacities,
    ) -> Result<ValidatedRequest, AllocationError> {
        if self.max_rank == 0 {
            return Err(AllocationError::InvalidMaxRank);
        }

        let capacities = validate_capacities(capacities)?;

        let mut seen = HashSet::with_capacity(applications.len());
        for (position, application) in applications.iter().enumerate() {
            if application.applicant.as_str().trim().is_empty() {
                return Err(AllocationError::EmptyApplicantKey { position });
            }

            if !seen.insert(&application.applicant) {
                return Err(AllocationError::DuplicateApplicant {
                    applicant: application.applicant.clone(),
                });
            }

            for choice in &application.choices {
                if choice.rank == 0 {
                    return Err(AllocationError::InvalidRank {
                        applicant: application.applicant.clone(),
                        rank: choice.rank,
                    });
                }

                if choice.resource.as_str().trim().is_empty() {
                    return Err(AllocationError::EmptyResourceKey {
                        applicant: application.applicant.clone(),
                    });
                }

                if choice.rank > self.max_rank {
                    debug!(
                        applicant = %application.applicant,
                        rank = choice.rank,
                        max_rank = self.max_rank,
                        "choice ranked beyond processed rounds will be ignored"
                    );
                }

                if !capacities.contains_key(&choice.resource) {
                    debug!(
                        applicant = %application.applicant,
                        resource = %choice.resource,
                        "choice references a resource without capacity"
                    );
                }
            }
        }

        Ok(ValidatedRequest {
            applications,
            capacities,
            max_rank: self.max_rank,
        })
    }
}

fn validate_capacities(raw: RawCapacities) -> Result<CapacityMap, AllocationError> {
    let mut capacities = CapacityMap::new();
    for (resource, capacity) in raw {
        if resource.as_str().trim().is_empty() {
            return Err(AllocationError::BlankCapacityKey);
        }

        if capacity < 0 {
            return Err(AllocationError::NegativeCapacity { resource, capacity });
        }

        let seats = u32::try_from(capacity)
            .map_err(|_| AllocationError::CapacityTooLarge {
                resource: resource.clone(),
                capacity,
            })?;
        capacities.insert(resource, seats);
    }

    Ok(capacities)
}
