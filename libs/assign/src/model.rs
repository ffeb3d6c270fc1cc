//! Roster data model.
//!
//! All types here are plain snapshots supplied by the caller. The engine only
//! borrows them for the duration of one call.

use std::collections::BTreeSet;

use rota_id::{PositionId, UserId};
use serde::{Deserialize, Serialize};

/// A role to be filled for the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub name: String,

    /// Headcount below which a shortfall warning is emitted.
    #[serde(default)]
    pub min_required: u32,

    /// Headcount the engine fills up to when candidates allow.
    #[serde(default)]
    pub max_required: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(id: PositionId, name: impl Into<String>, min_required: u32, max_required: u32) -> Self {
        Self {
            id,
            name: name.into(),
            min_required,
            max_required,
        }
    }

    /// Maximum headcount after clamping a malformed `max < min` to `min`.
    pub fn effective_max(&self) -> u32 {
        self.max_required.max(self.min_required)
    }

    /// Returns true if the position may stay empty without a warning.
    pub fn is_optional(&self) -> bool {
        self.min_required == 0
    }

    /// Number of candidates to take from a pool of `pool_size`.
    ///
    /// This is `max(min, min(effective_max, pool))`. The result can exceed
    /// the pool when the pool is smaller than the minimum; callers take at
    /// most what the pool holds.
    pub fn target_fill(&self, pool_size: usize) -> usize {
        let min = self.min_required as usize;
        let max = self.effective_max() as usize;
        min.max(max.min(pool_size))
    }
}

/// Declared availability for the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Unavailable,
    Maybe,
}

impl Availability {
    /// Only `available` voters are candidates; `maybe` is treated like `unavailable`.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::Maybe => "maybe",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One person's vote for the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityVote {
    pub user_id: UserId,
    pub availability: Availability,

    /// Positions this person may be assigned to.
    #[serde(default, alias = "positions")]
    pub eligible_positions: BTreeSet<PositionId>,
}

impl AvailabilityVote {
    /// Create a new vote.
    pub fn new(
        user_id: UserId,
        availability: Availability,
        eligible_positions: impl IntoIterator<Item = PositionId>,
    ) -> Self {
        Self {
            user_id,
            availability,
            eligible_positions: eligible_positions.into_iter().collect(),
        }
    }

    /// Returns true if this vote makes the person a candidate for `position`.
    pub fn is_candidate_for(&self, position: &PositionId) -> bool {
        self.availability.is_available() && self.eligible_positions.contains(position)
    }
}

/// Historical load for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationRecord {
    pub user_id: UserId,

    #[serde(default)]
    pub total_count: u32,

    /// Number of immediately preceding events served in a row.
    #[serde(default)]
    pub last_consecutive_count: u32,
}

impl ParticipationRecord {
    /// A record for someone who has never served.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            total_count: 0,
            last_consecutive_count: 0,
        }
    }

    pub fn with_counts(user_id: UserId, total_count: u32, last_consecutive_count: u32) -> Self {
        Self {
            user_id,
            total_count,
            last_consecutive_count,
        }
    }

    /// Returns true if the person has hit the consecutive-event limit.
    pub fn is_burned_out(&self, max_consecutive_weeks: u32) -> bool {
        self.last_consecutive_count >= max_consecutive_weeks
    }
}

/// A person placed in a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Assignment {
    pub position_id: PositionId,
    pub user_id: UserId,
}

impl Assignment {
    pub fn new(position_id: PositionId, user_id: UserId) -> Self {
        Self {
            position_id,
            user_id,
        }
    }
}
