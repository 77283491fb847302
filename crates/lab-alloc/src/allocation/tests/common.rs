use std::collections::HashSet;

use crate::allocation::domain::{Application, RawCapacities, ResourceKey};
use crate::allocation::engine::{Allocation, AllocationConfig, AllocationEngine};

pub(super) fn capacities(entries: &[(&str, i64)]) -> RawCapacities {
    entries
        .iter()
        .map(|(resource, capacity)| (ResourceKey::from(*resource), *capacity))
        .collect()
}

pub(super) fn application(applicant: &str, choices: &[(u8, &str)]) -> Application {
    choices
        .iter()
        .fold(Application::new(applicant), |application, (rank, resource)| {
            application.with_choice(*rank, *resource, format!("rank {rank} pick"))
        })
}

pub(super) fn engine(improve: bool) -> AllocationEngine {
    AllocationEngine::new(AllocationConfig {
        max_rank: 3,
        improve,
    })
}

/// Two students competing for Lab1 with Lab2 as the fallback.
pub(super) fn scenario_a() -> (Vec<Application>, RawCapacities) {
    (
        vec![
            application("S1", &[(1, "Lab1"), (2, "Lab2")]),
            application("S2", &[(1, "Lab1"), (2, "Lab2")]),
        ],
        capacities(&[("Lab1", 1), ("Lab2", 1)]),
    )
}

/// S3 loses Lab1 to S1 in round one and settles for Lab2 in round two.
pub(super) fn scenario_c() -> (Vec<Application>, RawCapacities) {
    (
        vec![
            application("S1", &[(1, "Lab1")]),
            application("S2", &[(1, "Lab2")]),
            application("S3", &[(1, "Lab1"), (2, "Lab2")]),
        ],
        capacities(&[("Lab1", 1), ("Lab2", 2)]),
    )
}

pub(super) fn assert_consistent(allocation: &Allocation) {
    allocation
        .ledger()
        .verify()
        .expect("ledger invariants hold");

    let stats = allocation.stats();
    assert_eq!(
        stats.assigned + stats.unassigned,
        stats.total_applications,
        "assigned and unassigned must cover every applicant"
    );

    let result = allocation.result();
    let unassigned = allocation.unassigned();
    let mut seen = HashSet::new();
    for entry in &result.assignments {
        assert!(seen.insert(entry.applicant.clone()), "duplicate assignment");
    }
    for applicant in &unassigned {
        assert!(
            seen.insert(applicant.clone()),
            "{applicant} is both assigned and unassigned"
        );
    }
    assert_eq!(seen.len(), allocation.applications().len());
}
