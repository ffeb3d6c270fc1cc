//! Fairness scoring.
//!
//! `score = total_count + penalty - last_consecutive_count * 0.01`, where
//! `penalty` is [`BURNOUT_PENALTY`] once a person has served
//! `max_consecutive_weeks` events in a row. Lower scores are picked first.

use std::cmp::Ordering;
use std::collections::HashMap;

use rota_id::UserId;

use crate::model::ParticipationRecord;

/// Score added to anyone at or over the consecutive-event limit.
pub const BURNOUT_PENALTY: f64 = 1000.0;

/// Per-event nudge favouring recently active people among equal totals.
pub const RECENCY_NUDGE: f64 = 0.01;

/// Lower-is-better candidate ranking value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FairnessScore(f64);

impl FairnessScore {
    /// Score for a person with the given history counts.
    pub fn from_counts(total_count: u32, last_consecutive_count: u32, max_consecutive_weeks: u32) -> Self {
        let penalty = if last_consecutive_count >= max_consecutive_weeks {
            BURNOUT_PENALTY
        } else {
            0.0
        };
        Self(f64::from(total_count) + penalty - f64::from(last_consecutive_count) * RECENCY_NUDGE)
    }

    pub fn for_record(record: &ParticipationRecord, max_consecutive_weeks: u32) -> Self {
        Self::from_counts(
            record.total_count,
            record.last_consecutive_count,
            max_consecutive_weeks,
        )
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Total order over scores.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::fmt::Display for FairnessScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Lookup of participation history by person.
///
/// People without a record are treated as never having served. If the same
/// person appears more than once, the last record wins.
#[derive(Debug, Default)]
pub struct HistoryIndex<'a> {
    records: HashMap<&'a UserId, &'a ParticipationRecord>,
}

impl<'a> HistoryIndex<'a> {
    pub fn new(history: &'a [ParticipationRecord]) -> Self {
        let mut records = HashMap::with_capacity(history.len());
        for record in history {
            records.insert(&record.user_id, record);
        }
        Self { records }
    }

    pub fn get(&self, user_id: &UserId) -> Option<&'a ParticipationRecord> {
        self.records.get(user_id).copied()
    }

    /// `(total_count, last_consecutive_count)`, zero when unknown.
    pub fn counts(&self, user_id: &UserId) -> (u32, u32) {
        self.get(user_id)
            .map(|r| (r.total_count, r.last_consecutive_count))
            .unwrap_or((0, 0))
    }

    pub fn score(&self, user_id: &UserId, max_consecutive_weeks: u32) -> FairnessScore {
        let (total, consecutive) = self.counts(user_id);
        FairnessScore::from_counts(total, consecutive, max_consecutive_weeks)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::parse(id).unwrap()
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(FairnessScore::from_counts(0, 0, 3).value(), 0.0);
        assert_eq!(FairnessScore::from_counts(5, 0, 3).value(), 5.0);
        assert!((FairnessScore::from_counts(2, 2, 3).value() - 1.98).abs() < 1e-9);
        assert!((FairnessScore::from_counts(1, 3, 3).value() - 1000.97).abs() < 1e-9);
    }

    #[test]
    fn test_recency_nudge_only_breaks_equal_totals() {
        let recent = FairnessScore::from_counts(2, 2, 3);
        let rested = FairnessScore::from_counts(2, 0, 3);
        let lighter = FairnessScore::from_counts(1, 0, 3);

        assert_eq!(recent.total_cmp(&rested), Ordering::Less);
        assert_eq!(lighter.total_cmp(&recent), Ordering::Less);
    }

    #[test]
    fn test_burnout_outweighs_any_realistic_total() {
        let burned_out = FairnessScore::from_counts(0, 3, 3);
        let veteran = FairnessScore::from_counts(500, 0, 3);
        assert_eq!(veteran.total_cmp(&burned_out), Ordering::Less);
    }

    #[test]
    fn test_history_index_defaults_and_last_wins() {
        let history = vec![
            ParticipationRecord::with_counts(user("u1"), 4, 1),
            ParticipationRecord::with_counts(user("u2"), 2, 0),
            ParticipationRecord::with_counts(user("u1"), 9, 9),
        ];
        let index = HistoryIndex::new(&history);

        assert_eq!(index.len(), 2);
        assert_eq!(index.counts(&user("u1")), (9, 9));
        assert_eq!(index.counts(&user("u3")), (0, 0));
        assert_eq!(index.score(&user("u3"), 3).value(), 0.0);
    }
}
