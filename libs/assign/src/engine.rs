//! The assignment engine.
//!
//! A single greedy pass over the positions:
//!
//! 1. Positions are ordered critical-first (`min_required` descending, stable).
//! 2. Each position's pool is every `available` voter listing it who has not
//!    already been placed earlier in the pass.
//! 3. The pool is ranked by fairness score, then by a tie-break draw, and the
//!    first `target_fill` candidates are placed.
//!
//! There is no backtracking: whoever a position claims first is gone for every
//! later position.

use std::cmp::Reverse;
use std::collections::HashSet;

use rota_id::{PositionId, UserId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::model::{Assignment, AvailabilityVote, ParticipationRecord, Position};
use crate::score::{FairnessScore, HistoryIndex};
use crate::settings::DEFAULT_MAX_CONSECUTIVE_WEEKS;
use crate::tiebreak::TieBreaker;
use crate::warning::{Locale, ShortfallWarning};

/// Tunables for one assignment pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignPolicy {
    /// Consecutive events after which a person is heavily de-prioritised.
    pub max_consecutive_weeks: u32,
}

impl Default for AssignPolicy {
    fn default() -> Self {
        Self {
            max_consecutive_weeks: DEFAULT_MAX_CONSECUTIVE_WEEKS,
        }
    }
}

impl AssignPolicy {
    pub fn new(max_consecutive_weeks: u32) -> Self {
        Self {
            max_consecutive_weeks,
        }
    }
}

/// Result of an assignment pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    /// Placements, grouped by position in processing order.
    pub assignments: Vec<Assignment>,

    /// One entry per position filled below its minimum.
    pub warnings: Vec<ShortfallWarning>,
}

impl AssignmentOutcome {
    /// Returns true if every position met its minimum.
    pub fn is_fully_staffed(&self) -> bool {
        self.warnings.is_empty()
    }

    /// People placed in `position_id`, in ranking order.
    pub fn assignees<'a>(
        &'a self,
        position_id: &'a PositionId,
    ) -> impl Iterator<Item = &'a UserId> + 'a {
        self.assignments
            .iter()
            .filter(move |a| &a.position_id == position_id)
            .map(|a| &a.user_id)
    }

    /// The position a person was placed in, if any.
    pub fn position_of(&self, user_id: &UserId) -> Option<&PositionId> {
        self.assignments
            .iter()
            .find(|a| &a.user_id == user_id)
            .map(|a| &a.position_id)
    }

    /// Warning messages rendered for an administrator.
    pub fn warning_messages(&self, locale: Locale) -> Vec<String> {
        self.warnings.iter().map(|w| w.render(locale)).collect()
    }
}

/// Snapshot of everything one assignment pass needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterInput {
    #[serde(default)]
    pub positions: Vec<Position>,

    #[serde(default)]
    pub votes: Vec<AvailabilityVote>,

    #[serde(default)]
    pub history: Vec<ParticipationRecord>,
}

impl RosterInput {
    pub fn assign<T>(&self, policy: &AssignPolicy, tiebreak: &mut T) -> AssignmentOutcome
    where
        T: TieBreaker + ?Sized,
    {
        assign(&self.positions, &self.votes, &self.history, policy, tiebreak)
    }
}

/// A ranked member of a position's candidate pool.
struct Candidate<'a> {
    user_id: &'a UserId,
    score: FairnessScore,
    tiebreak: f64,
}

/// Assign people to positions.
///
/// Never fails: positions that cannot reach `min_required` are filled as far
/// as possible and reported in [`AssignmentOutcome::warnings`].
///
/// Exactly one tie-break value is drawn per candidate, in vote order, so a
/// deterministic `tiebreak` makes the whole result deterministic.
#[instrument(
    skip_all,
    fields(
        positions = positions.len(),
        votes = votes.len(),
        history = history.len(),
        max_consecutive_weeks = policy.max_consecutive_weeks
    )
)]
pub fn assign<T>(
    positions: &[Position],
    votes: &[AvailabilityVote],
    history: &[ParticipationRecord],
    policy: &AssignPolicy,
    tiebreak: &mut T,
) -> AssignmentOutcome
where
    T: TieBreaker + ?Sized,
{
    let history = HistoryIndex::new(history);
    let ballots = first_vote_per_user(votes);

    let mut ordered: Vec<&Position> = positions.iter().collect();
    ordered.sort_by_key(|p| Reverse(p.min_required));

    let mut placed: HashSet<&UserId> = HashSet::new();
    let mut outcome = AssignmentOutcome::default();

    for position in ordered {
        let mut pool: Vec<Candidate<'_>> = ballots
            .iter()
            .filter(|vote| vote.is_candidate_for(&position.id) && !placed.contains(&vote.user_id))
            .map(|vote| Candidate {
                user_id: &vote.user_id,
                score: history.score(&vote.user_id, policy.max_consecutive_weeks),
                tiebreak: tiebreak.next_tiebreak(),
            })
            .collect();

        pool.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.tiebreak.total_cmp(&b.tiebreak))
        });

        let pool_size = pool.len();
        let take = position.target_fill(pool_size).min(pool_size);

        for candidate in pool.into_iter().take(take) {
            placed.insert(candidate.user_id);
            outcome
                .assignments
                .push(Assignment::new(position.id.clone(), candidate.user_id.clone()));
        }

        let filled = u32::try_from(take).unwrap_or(u32::MAX);
        debug!(
            position_id = %position.id,
            pool_size,
            filled,
            min_required = position.min_required,
            max_required = position.effective_max(),
            "Position processed"
        );

        if filled < position.min_required {
            let shortfall = ShortfallWarning {
                position_id: position.id.clone(),
                position_name: position.name.clone(),
                filled,
                needed: position.min_required,
            };
            warn!(
                position_id = %position.id,
                filled,
                needed = position.min_required,
                "Position below minimum headcount"
            );
            outcome.warnings.push(shortfall);
        }
    }

    debug!(
        assignments = outcome.assignments.len(),
        warnings = outcome.warnings.len(),
        "Assignment pass complete"
    );

    outcome
}

/// Keep the first vote per person; later duplicates are ignored.
fn first_vote_per_user(votes: &[AvailabilityVote]) -> Vec<&AvailabilityVote> {
    let mut seen = HashSet::with_capacity(votes.len());
    let ballots: Vec<_> = votes.iter().filter(|v| seen.insert(&v.user_id)).collect();

    if ballots.len() < votes.len() {
        debug!(
            ignored = votes.len() - ballots.len(),
            "Ignoring duplicate votes"
        );
    }

    ballots
}
