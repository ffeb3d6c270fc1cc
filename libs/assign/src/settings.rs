//! Team-level settings and templates.

use std::ops::RangeInclusive;

use rota_id::PositionId;
use serde::{Deserialize, Serialize};

use crate::engine::AssignPolicy;
use crate::model::Position;

/// Default consecutive-event limit before the burnout penalty applies.
pub const DEFAULT_MAX_CONSECUTIVE_WEEKS: u32 = 3;

/// Thresholds a team may configure.
pub const MAX_CONSECUTIVE_WEEKS_RANGE: RangeInclusive<u32> = 1..=10;

/// Per-team settings relevant to assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_consecutive_weeks: Option<u32>,
}

impl TeamSettings {
    pub fn new(max_consecutive_weeks: Option<u32>) -> Self {
        Self {
            max_consecutive_weeks,
        }
    }

    /// The configured threshold, or the default.
    pub fn max_consecutive_weeks(&self) -> u32 {
        self.max_consecutive_weeks
            .unwrap_or(DEFAULT_MAX_CONSECUTIVE_WEEKS)
    }

    /// Whether the threshold lies in [`MAX_CONSECUTIVE_WEEKS_RANGE`].
    ///
    /// The engine runs with any value; this is for callers that accept
    /// settings from operators.
    pub fn is_valid(&self) -> bool {
        MAX_CONSECUTIVE_WEEKS_RANGE.contains(&self.max_consecutive_weeks())
    }

    /// Assignment policy for this team.
    pub fn policy(&self) -> AssignPolicy {
        AssignPolicy::new(self.max_consecutive_weeks())
    }
}

/// `(id, name, min, max)` for the default band template.
const DEFAULT_POSITIONS: &[(&str, &str, u32, u32)] = &[
    ("leader", "Leader", 1, 1),
    ("singer", "Singer", 2, 4),
    ("electric-guitar", "Electric Guitar", 1, 1),
    ("acoustic-guitar", "Acoustic Guitar", 0, 1),
    ("bass", "Bass", 1, 1),
    ("drums", "Drums", 1, 1),
    ("keys", "Keys", 1, 1),
    ("sound", "Sound", 1, 1),
];

/// The position template new teams start from.
pub fn default_positions() -> Vec<Position> {
    DEFAULT_POSITIONS
        .iter()
        .filter_map(|(id, name, min, max)| {
            PositionId::parse(id)
                .ok()
                .map(|id| Position::new(id, *name, *min, *max))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults() {
        assert_eq!(TeamSettings::default().policy().max_consecutive_weeks, 3);

        let settings = TeamSettings {
            max_consecutive_weeks: Some(5),
        };
        assert_eq!(settings.policy(), AssignPolicy::new(5));
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(TeamSettings::default().is_valid());
        assert!(TeamSettings::new(Some(1)).is_valid());
        assert!(TeamSettings::new(Some(10)).is_valid());
        assert!(!TeamSettings::new(Some(0)).is_valid());
        assert!(!TeamSettings::new(Some(11)).is_valid());
        assert_eq!(TeamSettings::new(None).max_consecutive_weeks(), 3);
    }

    #[test]
    fn test_settings_json() {
        let settings: TeamSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, TeamSettings::default());
        assert_eq!(serde_json::to_string(&settings).unwrap(), "{}");
    }

    #[test]
    fn test_default_positions_template() {
        let positions = default_positions();
        assert_eq!(positions.len(), DEFAULT_POSITIONS.len());

        let singer = positions.iter().find(|p| p.id.as_str() == "singer").unwrap();
        assert_eq!((singer.min_required, singer.max_required), (2, 4));

        let acoustic = positions
            .iter()
            .find(|p| p.id.as_str() == "acoustic-guitar")
            .unwrap();
        assert!(acoustic.is_optional());

        assert!(positions.iter().all(|p| p.max_required >= p.min_required));
    }
}
