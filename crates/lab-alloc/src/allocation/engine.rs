use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{
    ApplicantKey, Application, Assignment, Rank, RawCapacities, ResourceKey, DEFAULT_MAX_RANK,
};
use super::error::AllocationError;
use super::improvement;
use super::intake::{IntakeGuard, ValidatedRequest};
use super::report::{self, AllocationResult, AllocationStats, ResourceOccupancyEntry};
use super::state::SeatLedger;

/// Knobs controlling a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Number of ranked rounds processed (K).
    pub max_rank: Rank,
    /// Run the improvement pass after the initial rounds.
    pub improve: bool,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            max_rank: DEFAULT_MAX_RANK,
            improve: true,
        }
    }
}

/// Pipeline composing intake validation, the ranked rounds and the improvement pass.
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    guard: IntakeGuard,
    config: AllocationConfig,
}

impl AllocationEngine {
    pub fn new(config: AllocationConfig) -> Self {
        Self {
            guard: IntakeGuard::new(config.max_rank),
            config,
        }
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Validate the inputs and run a complete allocation.
    ///
    /// Nothing is allocated when validation fails.
    pub fn run(
        &self,
        applications: Vec<Application>,
        capacities: RawCapacities,
    ) -> Result<Allocation, AllocationError> {
        let request = self.guard.validate(applications, capacities)?;
        let mut allocation = Allocation::initial(request);

        if self.config.improve {
            allocation.improve();
        }

        let stats = allocation.stats();
        info!(
            total = stats.total_applications,
            assigned = stats.assigned,
            unassigned = stats.unassigned,
            improving_moves = allocation.improving_moves(),
            "allocation run complete"
        );

        Ok(allocation)
    }
}

/// Run the ranked rounds of immediate acceptance over `applications`.
///
/// Round `r` walks the applicants in input order and seats each unseated applicant at their
/// rank-`r` choice while that resource has a free seat. Exactly `max_rank` rounds run.
pub fn assign_rounds(applications: &[Application], ledger: &mut SeatLedger, max_rank: Rank) {
    for round in 1..=max_rank {
        let mut seated = 0usize;
        for application in applications {
            if ledger.is_seated(&application.applicant) {
                continue;
            }

            let Some(choice) = application.choice_at(round) else {
                continue;
            };

            if !ledger.knows(&choice.resource) {
                debug!(
                    applicant = %application.applicant,
                    resource = %choice.resource,
                    round,
                    "skipping choice for unknown resource"
                );
                continue;
            }

            if ledger.seat(&application.applicant, &choice.resource, round) {
                seated += 1;
            }
        }
        debug!(round, seated, "allocation round complete");
    }
}

/// A finished (or in-progress) run: the submitted applications and the ledger they produced.
#[derive(Debug, Clone)]
pub struct Allocation {
    applications: Vec<Application>,
    ledger: SeatLedger,
    max_rank: Rank,
    improving_moves: usize,
}

impl Allocation {
    /// Build a fresh ledger from a validated request and run the ranked rounds.
    pub fn initial(request: ValidatedRequest) -> Self {
        let ValidatedRequest {
            applications,
            capacities,
            max_rank,
        } = request;

        let mut ledger = SeatLedger::new(capacities);
        assign_rounds(&applications, &mut ledger, max_rank);

        Self {
            applications,
            ledger,
            max_rank,
            improving_moves: 0,
        }
    }

    /// Run the improvement pass on the live ledger, returning the moves made by this call.
    pub fn improve(&mut self) -> usize {
        let moves = improvement::improve(&self.applications, &mut self.ledger);
        self.improving_moves += moves;
        moves
    }

    pub fn set_capacity(
        &mut self,
        resource: &ResourceKey,
        capacity: u32,
    ) -> Result<(), AllocationError> {
        self.ledger.set_capacity(resource, capacity)
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn ledger(&self) -> &SeatLedger {
        &self.ledger
    }

    pub fn into_ledger(self) -> SeatLedger {
        self.ledger
    }

    pub fn max_rank(&self) -> Rank {
        self.max_rank
    }

    /// Improving moves made across every improvement call on this allocation.
    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    pub fn assignment(&self, applicant: &ApplicantKey) -> Option<Assignment> {
        self.ledger.assignment(applicant)
    }

    pub fn phi(&self) -> u64 {
        self.ledger.phi()
    }

    pub fn stats(&self) -> AllocationStats {
        report::summarize(&self.applications, &self.ledger, self.max_rank)
    }

    pub fn unassigned(&self) -> Vec<ApplicantKey> {
        report::unassigned(&self.applications, &self.ledger)
    }

    pub fn remaining_capacity(&self) -> BTreeMap<ResourceKey, u32> {
        report::remaining_capacity(&self.ledger)
    }

    pub fn resource_occupancy(&self) -> Vec<ResourceOccupancyEntry> {
        report::resource_occupancy(&self.applications, &self.ledger)
    }

    pub fn result(&self) -> AllocationResult {
        AllocationResult {
            assignments: report::assignments(&self.applications, &self.ledger),
            stats: self.stats(),
        }
    }
}
