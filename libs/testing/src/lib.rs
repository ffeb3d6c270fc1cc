//! Test support for the rota workspace.
//!
//! Only use this crate from integration tests (`tests/`); unit tests inside
//! `rota-assign` would see a second copy of its types.

use std::collections::HashSet;

use rota_assign::{
    Assignment, Availability, AvailabilityVote, ParticipationRecord, Position, TieBreaker,
};
use rota_id::{PositionId, UserId};

/// Modulus of the Park-Miller minimal standard generator.
const PARK_MILLER_MODULUS: u64 = 2_147_483_647;

/// Multiplier of the Park-Miller minimal standard generator.
const PARK_MILLER_MULTIPLIER: u64 = 16_807;

/// Deterministic Lehmer generator (`s = s * 16807 mod 2^31 - 1`).
#[derive(Debug, Clone)]
pub struct ParkMiller {
    state: u64,
}

impl ParkMiller {
    /// A seed of zero (mod the modulus) would stick at zero, so it becomes 1.
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed % PARK_MILLER_MODULUS).max(1),
        }
    }
}

impl TieBreaker for ParkMiller {
    fn next_tiebreak(&mut self) -> f64 {
        self.state = self.state * PARK_MILLER_MULTIPLIER % PARK_MILLER_MODULUS;
        self.state as f64 / PARK_MILLER_MODULUS as f64
    }
}

/// Tie-breaker that cycles through a fixed list of values.
#[derive(Debug, Clone)]
pub struct Sequence {
    values: Vec<f64>,
    next: usize,
}

impl Sequence {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.next
    }
}

impl TieBreaker for Sequence {
    fn next_tiebreak(&mut self) -> f64 {
        if self.values.is_empty() {
            self.next += 1;
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

pub fn pos(id: &str) -> PositionId {
    PositionId::parse(id).expect("valid position id")
}

pub fn user(id: &str) -> UserId {
    UserId::parse(id).expect("valid user id")
}

pub fn position(id: &str, name: &str, min: u32, max: u32) -> Position {
    Position::new(pos(id), name, min, max)
}

pub fn vote(user_id: &str, availability: Availability, positions: &[&str]) -> AvailabilityVote {
    AvailabilityVote::new(user(user_id), availability, positions.iter().map(|p| pos(p)))
}

pub fn available(user_id: &str, positions: &[&str]) -> AvailabilityVote {
    vote(user_id, Availability::Available, positions)
}

pub fn record(user_id: &str, total_count: u32, last_consecutive_count: u32) -> ParticipationRecord {
    ParticipationRecord::with_counts(user(user_id), total_count, last_consecutive_count)
}

/// Panic if any person holds more than one position.
pub fn assert_no_double_booking(assignments: &[Assignment]) {
    let mut seen = HashSet::new();
    for assignment in assignments {
        assert!(
            seen.insert(&assignment.user_id),
            "{} assigned more than once",
            assignment.user_id
        );
    }
}

/// Panic if any assignment lacks an `available` vote listing its position.
pub fn assert_eligible(assignments: &[Assignment], votes: &[AvailabilityVote]) {
    for assignment in assignments {
        let first_vote = votes.iter().find(|v| v.user_id == assignment.user_id);
        assert!(
            first_vote.is_some_and(|v| v.is_candidate_for(&assignment.position_id)),
            "{} is not an available candidate for {}",
            assignment.user_id,
            assignment.position_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_park_miller_sequence() {
        let mut source = ParkMiller::new(42);
        let first = source.next_tiebreak();
        assert_eq!(first, (42.0 * 16807.0) / 2_147_483_647.0);
        for _ in 0..100 {
            let value = source.next_tiebreak();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_sequence_cycles() {
        let mut source = Sequence::new([0.1, 0.2]);
        assert_eq!(source.next_tiebreak(), 0.1);
        assert_eq!(source.next_tiebreak(), 0.2);
        assert_eq!(source.next_tiebreak(), 0.1);
        assert_eq!(source.draws(), 3);
    }

    #[test]
    #[should_panic(expected = "assigned more than once")]
    fn test_double_booking_detected() {
        assert_no_double_booking(&[
            Assignment::new(pos("pos-drum"), user("u1")),
            Assignment::new(pos("pos-bass"), user("u1")),
        ]);
    }
}
