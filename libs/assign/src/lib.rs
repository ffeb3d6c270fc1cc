//! Fair roster assignment.
//!
//! This library assigns people to positions for a single event. Key concepts:
//!
//! - **Position**: a role with a minimum and maximum headcount.
//! - **Vote**: a person's availability plus the positions they can serve in.
//! - **Participation**: how often, and how many events in a row, a person has served.
//!
//! # Invariants
//!
//! - A person holds at most one position per event
//! - Only `available` voters are ever assigned
//! - Understaffing is reported as a warning, never as an error
//! - Output is deterministic given the same inputs and tie-break sequence

pub mod engine;
pub mod history;
pub mod model;
pub mod score;
pub mod settings;
pub mod tiebreak;
pub mod warning;

pub use engine::{assign, AssignPolicy, AssignmentOutcome, RosterInput};
pub use history::{derive_participation, PastEvent};
pub use model::{Assignment, Availability, AvailabilityVote, ParticipationRecord, Position};
pub use score::{FairnessScore, HistoryIndex, BURNOUT_PENALTY, RECENCY_NUDGE};
pub use settings::{
    default_positions, TeamSettings, DEFAULT_MAX_CONSECUTIVE_WEEKS, MAX_CONSECUTIVE_WEEKS_RANGE,
};
pub use tiebreak::{RngTieBreaker, TieBreaker};
pub use warning::{Locale, ShortfallWarning};

pub use rota_id::{EventId, PositionId, UserId};
