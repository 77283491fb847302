use super::common::*;
use crate::allocation::domain::{ApplicantKey, ResourceKey};

#[test]
fn input_order_wins_ties_in_the_first_round() {
    let (applications, capacities) = scenario_a();
    let allocation = engine(false)
        .run(applications, capacities)
        .expect("valid input");

    let s1 = allocation
        .assignment(&ApplicantKey::from("S1"))
        .expect("S1 seated");
    assert_eq!(s1.resource, ResourceKey::from("Lab1"));
    assert_eq!(s1.matched_rank, 1);

    let s2 = allocation
        .assignment(&ApplicantKey::from("S2"))
        .expect("S2 seated");
    assert_eq!(s2.resource, ResourceKey::from("Lab2"));
    assert_eq!(s2.matched_rank, 2);

    let stats = allocation.stats();
    assert_eq!(stats.total_applications, 2);
    assert_eq!(stats.assigned, 2);
    assert_eq!(stats.count_at(1), 1);
    assert_eq!(stats.count_at(2), 1);
    assert_eq!(stats.count_at(3), 0);
    assert_eq!(stats.unassigned, 0);
    assert_consistent(&allocation);
}

#[test]
fn reversing_input_order_reverses_the_tie_break() {
    let (mut applications, capacities) = scenario_a();
    applications.reverse();
    let allocation = engine(false)
        .run(applications, capacities)
        .expect("valid input");

    assert_eq!(
        allocation
            .assignment(&ApplicantKey::from("S2"))
            .map(|a| a.matched_rank),
        Some(1)
    );
    assert_eq!(
        allocation
            .assignment(&ApplicantKey::from("S1"))
            .map(|a| a.matched_rank),
        Some(2)
    );
}

#[test]
fn zero_capacity_resource_never_seats_anyone() {
    let applications = vec![
        application("S1", &[(1, "Lab1"), (2, "Lab1"), (3, "Lab1")]),
        application("S2", &[(1, "Lab2"), (2, "Lab1")]),
        application("S3", &[(3, "Lab1")]),
    ];
    let allocation = engine(true)
        .run(applications, capacities(&[("Lab1", 0), ("Lab2", 1)]))
        .expect("valid input");

    assert_eq!(allocation.ledger().seats_taken(&ResourceKey::from("Lab1")), 0);
    assert_eq!(
        allocation.unassigned(),
        vec![ApplicantKey::from("S1"), ApplicantKey::from("S3")]
    );
    assert_consistent(&allocation);
}

#[test]
fn unknown_resources_are_skipped_without_failing_the_run() {
    let applications = vec![
        application("S1", &[(1, "Atlantis"), (2, "Lab1")]),
        application("S2", &[(1, "Atlantis")]),
    ];
    let allocation = engine(false)
        .run(applications, capacities(&[("Lab1", 1)]))
        .expect("unknown resources are not fatal");

    let s1 = allocation
        .assignment(&ApplicantKey::from("S1"))
        .expect("falls through to rank 2");
    assert_eq!(s1.resource, ResourceKey::from("Lab1"));
    assert_eq!(s1.matched_rank, 2);
    assert_eq!(allocation.unassigned(), vec![ApplicantKey::from("S2")]);
}

#[test]
fn applicants_without_choice_at_a_rank_wait_for_the_next_round() {
    let applications = vec![
        application("S1", &[(2, "Lab1")]),
        application("S2", &[(1, "Lab1"), (3, "Lab2")]),
    ];
    let allocation = engine(false)
        .run(applications, capacities(&[("Lab1", 1), ("Lab2", 1)]))
        .expect("valid input");

    assert_eq!(
        allocation.assignment(&ApplicantKey::from("S2")).map(|a| a.matched_rank),
        Some(1)
    );
    assert!(allocation.assignment(&ApplicantKey::from("S1")).is_none());
}

#[test]
fn choices_beyond_the_last_round_are_never_used() {
    let applications = vec![application("S1", &[(4, "Lab1")])];
    let allocation = engine(true)
        .run(applications, capacities(&[("Lab1", 5)]))
        .expect("valid input");

    assert_eq!(allocation.unassigned(), vec![ApplicantKey::from("S1")]);
    assert_eq!(allocation.stats().per_rank.len(), 3);
}

#[test]
fn duplicate_ranks_use_the_first_listing() {
    let applications = vec![application("S1", &[(1, "Lab1"), (1, "Lab2")])];
    let allocation = engine(false)
        .run(applications, capacities(&[("Lab1", 1), ("Lab2", 1)]))
        .expect("valid input");

    assert_eq!(
        allocation
            .assignment(&ApplicantKey::from("S1"))
            .map(|a| a.resource),
        Some(ResourceKey::from("Lab1"))
    );
}

#[test]
fn failed_first_choice_is_not_retried_in_later_rounds() {
    let applications = vec![
        application("S1", &[(1, "Lab1")]),
        application("S2", &[(1, "Lab1"), (2, "Lab2")]),
    ];
    let allocation = engine(false)
        .run(applications, capacities(&[("Lab1", 1), ("Lab2", 0)]))
        .expect("valid input");

    assert_eq!(allocation.unassigned(), vec![ApplicantKey::from("S2")]);
    assert_eq!(allocation.remaining_capacity()[&ResourceKey::from("Lab1")], 0);
}

#[test]
fn configurable_round_count_extends_processing() {
    let engine = crate::allocation::AllocationEngine::new(crate::allocation::AllocationConfig {
        max_rank: 5,
        improve: false,
    });
    let applications = vec![application("S1", &[(5, "Lab1")])];
    let allocation = engine
        .run(applications, capacities(&[("Lab1", 1)]))
        .expect("valid input");

    assert_eq!(allocation.stats().count_at(5), 1);
}
