use tracing::debug;

use super::domain::Application;
use super::state::SeatLedger;

/// Move seated applicants to better-ranked choices that still have a free seat.
///
/// Sweeps repeat until one makes no move. Each move lowers the sum of matched ranks by at
/// least one, so the loop terminates. Only direct moves into free seats are tried; nobody is
/// displaced, unseated or newly seated. Returns the number of moves made.
pub fn improve(applications: &[Application], ledger: &mut SeatLedger) -> usize {
    let mut total_moves = 0usize;
    let mut sweep = 0usize;

    loop {
        sweep += 1;
        let mut moves = 0usize;

        for application in applications {
            let Some(current) = ledger.matched_rank(&application.applicant) else {
                continue;
            };

            for rank in 1..current {
                let Some(choice) = application.choice_at(rank) else {
                    continue;
                };

                if !ledger.has_spare(&choice.resource) {
                    continue;
                }

                if ledger.relocate(&application.applicant, &choice.resource, rank) {
                    debug!(
                        applicant = %application.applicant,
                        resource = %choice.resource,
                        from_rank = current,
                        to_rank = rank,
                        "improving move"
                    );
                    moves += 1;
                    break;
                }
            }
        }

        total_moves += moves;
        if moves == 0 {
            break;
        }
    }

    debug!(sweeps = sweep, moves = total_moves, "improvement pass settled");
    total_moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::domain::{ApplicantKey, CapacityMap, ResourceKey};
    use crate::allocation::engine::assign_rounds;

    #[test]
    fn no_moves_without_spare_capacity() {
        let applications = vec![
            Application::new("S1")
                .with_choice(1, "Lab1", "")
                .with_choice(2, "Lab2", ""),
            Application::new("S2")
                .with_choice(1, "Lab1", "")
                .with_choice(2, "Lab2", ""),
        ];
        let mut capacities = CapacityMap::new();
        capacities.insert(ResourceKey::from("Lab1"), 1);
        capacities.insert(ResourceKey::from("Lab2"), 1);
        let mut ledger = SeatLedger::new(capacities);
        assign_rounds(&applications, &mut ledger, 3);

        assert_eq!(improve(&applications, &mut ledger), 0);
        assert_eq!(ledger.matched_rank(&ApplicantKey::from("S2")), Some(2));
    }

    #[test]
    fn moves_to_best_free_rank_first() {
        let applications = vec![Application::new("S1")
            .with_choice(1, "Lab1", "")
            .with_choice(2, "Lab2", "")
            .with_choice(3, "Lab3", "")];
        let mut capacities = CapacityMap::new();
        capacities.insert(ResourceKey::from("Lab1"), 0);
        capacities.insert(ResourceKey::from("Lab2"), 0);
        capacities.insert(ResourceKey::from("Lab3"), 1);
        let mut ledger = SeatLedger::new(capacities);
        assign_rounds(&applications, &mut ledger, 3);
        assert_eq!(ledger.matched_rank(&ApplicantKey::from("S1")), Some(3));

        ledger
            .set_capacity(&ResourceKey::from("Lab1"), 1)
            .expect("raise Lab1");
        ledger
            .set_capacity(&ResourceKey::from("Lab2"), 1)
            .expect("raise Lab2");

        assert_eq!(improve(&applications, &mut ledger), 1);
        let assignment = ledger
            .assignment(&ApplicantKey::from("S1"))
            .expect("still seated");
        assert_eq!(assignment.resource, ResourceKey::from("Lab1"));
        assert_eq!(assignment.matched_rank, 1);
        assert_eq!(ledger.remaining(&ResourceKey::from("Lab3")), 1);
    }

    #[test]
    fn freed_seat_cascades_across_sweeps() {
        // S1 leaves Lab2 for Lab1 in the first sweep; S2 climbs into Lab2 on the next one.
        let applications = vec![
            Application::new("S2")
                .with_choice(1, "Lab2", "")
                .with_choice(2, "Lab3", ""),
            Application::new("S1")
                .with_choice(1, "Lab1", "")
                .with_choice(2, "Lab2", ""),
        ];
        let mut capacities = CapacityMap::new();
        capacities.insert(ResourceKey::from("Lab1"), 0);
        capacities.insert(ResourceKey::from("Lab2"), 1);
        capacities.insert(ResourceKey::from("Lab3"), 1);
        let mut ledger = SeatLedger::new(capacities);

        let s1 = ApplicantKey::from("S1");
        let s2 = ApplicantKey::from("S2");
        assert!(ledger.seat(&s1, &ResourceKey::from("Lab2"), 2));
        assert!(ledger.seat(&s2, &ResourceKey::from("Lab3"), 2));
        ledger
            .set_capacity(&ResourceKey::from("Lab1"), 1)
            .expect("raise Lab1");

        assert_eq!(improve(&applications, &mut ledger), 2);
        assert_eq!(ledger.matched_rank(&s1), Some(1));
        assert_eq!(ledger.matched_rank(&s2), Some(1));
        assert_eq!(ledger.phi(), 2);
        assert_eq!(improve(&applications, &mut ledger), 0);
    }
}
