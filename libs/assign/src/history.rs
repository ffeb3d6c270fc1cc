//! Participation history derived from past rosters.
//!
//! The engine consumes pre-aggregated [`ParticipationRecord`]s. This module
//! builds them from the rosters of earlier events so callers do not have to
//! reimplement the streak logic.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rota_id::{EventId, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Assignment, ParticipationRecord};

/// The final roster of an earlier event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastEvent {
    pub event_id: EventId,
    pub date: NaiveDate,

    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl PastEvent {
    pub fn new(event_id: EventId, date: NaiveDate, assignments: Vec<Assignment>) -> Self {
        Self {
            event_id,
            date,
            assignments,
        }
    }

    fn participants(&self) -> BTreeSet<&UserId> {
        self.assignments.iter().map(|a| &a.user_id).collect()
    }
}

/// Aggregate past rosters into one record per person.
///
/// - `total_count` is the number of distinct events the person served in.
/// - `last_consecutive_count` is the length of the unbroken run of events,
///   counted back from the most recent one, in which the person served.
///
/// Events are ordered newest first by date; events sharing a date keep their
/// input order. `exclude` drops the event currently being rostered so a
/// previous draft of it does not count as history. Records are returned
/// sorted by user ID.
pub fn derive_participation(
    events: &[PastEvent],
    exclude: Option<&EventId>,
) -> Vec<ParticipationRecord> {
    let mut ordered: Vec<&PastEvent> = events
        .iter()
        .filter(|e| exclude.is_none_or(|id| &e.event_id != id))
        .collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));

    let mut totals: BTreeMap<&UserId, u32> = BTreeMap::new();
    let mut streaks: BTreeMap<&UserId, u32> = BTreeMap::new();
    // People whose streak is still unbroken going back in time.
    let mut running: Option<BTreeSet<&UserId>> = None;

    for event in ordered.iter().copied() {
        let participants = event.participants();

        for user_id in &participants {
            *totals.entry(*user_id).or_insert(0) += 1;
        }

        let still_running: BTreeSet<&UserId> = match &running {
            None => participants.clone(),
            Some(prev) => prev.intersection(&participants).copied().collect(),
        };
        for user_id in &still_running {
            *streaks.entry(*user_id).or_insert(0) += 1;
        }
        running = Some(still_running);
    }

    debug!(
        events = ordered.len(),
        excluded = events.len() - ordered.len(),
        people = totals.len(),
        "Derived participation history"
    );

    totals
        .into_iter()
        .map(|(user_id, total_count)| ParticipationRecord {
            user_id: user_id.clone(),
            total_count,
            last_consecutive_count: streaks.get(user_id).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rota_id::PositionId;

    use super::*;

    fn user(id: &str) -> UserId {
        UserId::parse(id).unwrap()
    }

    fn event(id: &str, date: &str, users: &[&str]) -> PastEvent {
        let position = PositionId::parse("pos-drum").unwrap();
        PastEvent::new(
            EventId::parse(id).unwrap(),
            date.parse().unwrap(),
            users
                .iter()
                .map(|u| Assignment::new(position.clone(), user(u)))
                .collect(),
        )
    }

    fn find<'a>(records: &'a [ParticipationRecord], id: &str) -> &'a ParticipationRecord {
        records.iter().find(|r| r.user_id.as_str() == id).unwrap()
    }

    #[test]
    fn test_empty_history() {
        assert!(derive_participation(&[], None).is_empty());
    }

    #[test]
    fn test_totals_and_streaks() {
        // Input order is deliberately not chronological.
        let events = vec![
            event("e2", "2026-03-08", &["u1", "u2"]),
            event("e4", "2026-03-22", &["u1", "u3"]),
            event("e1", "2026-03-01", &["u1", "u2"]),
            event("e3", "2026-03-15", &["u1", "u2"]),
        ];

        let records = derive_participation(&events, None);

        assert_eq!(records.len(), 3);
        assert_eq!(find(&records, "u1").total_count, 4);
        assert_eq!(find(&records, "u1").last_consecutive_count, 4);
        assert_eq!(find(&records, "u2").total_count, 3);
        assert_eq!(find(&records, "u2").last_consecutive_count, 0);
        assert_eq!(find(&records, "u3").total_count, 1);
        assert_eq!(find(&records, "u3").last_consecutive_count, 1);
    }

    #[test]
    fn test_streak_breaks_on_gap() {
        let events = vec![
            event("e1", "2026-03-01", &["u1"]),
            event("e2", "2026-03-08", &["u2"]),
            event("e3", "2026-03-15", &["u1", "u2"]),
            event("e4", "2026-03-22", &["u1", "u2"]),
        ];

        let records = derive_participation(&events, None);

        assert_eq!(find(&records, "u1").last_consecutive_count, 2);
        assert_eq!(find(&records, "u2").last_consecutive_count, 3);
    }

    #[test]
    fn test_multiple_positions_in_one_event_count_once() {
        let bass = PositionId::parse("pos-bass").unwrap();
        let mut e1 = event("e1", "2026-03-01", &["u1"]);
        e1.assignments.push(Assignment::new(bass, user("u1")));

        let records = derive_participation(&[e1], None);

        assert_eq!(find(&records, "u1").total_count, 1);
        assert_eq!(find(&records, "u1").last_consecutive_count, 1);
    }

    #[test]
    fn test_exclude_current_event() {
        let events = vec![
            event("e1", "2026-03-01", &["u1"]),
            event("draft", "2026-03-08", &["u1", "u2"]),
        ];
        let draft = EventId::parse("draft").unwrap();

        let records = derive_participation(&events, Some(&draft));

        assert_eq!(records.len(), 1);
        assert_eq!(find(&records, "u1").total_count, 1);
        assert_eq!(find(&records, "u1").last_consecutive_count, 1);
    }

    #[test]
    fn test_records_sorted_by_user() {
        let events = vec![event("e1", "2026-03-01", &["u3", "u1", "u2"])];

        let records = derive_participation(&events, None);

        let ids: Vec<_> = records.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2", "u3"]);
    }

    #[test]
    fn test_past_event_json() {
        let json = r#"{
            "event_id": "evt-2026-03-01",
            "date": "2026-03-01",
            "assignments": [{"position_id": "pos-drum", "user_id": "u1"}]
        }"#;
        let event: PastEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(event.assignments.len(), 1);
    }
}
