//! Typed ID definitions for roster resources.

use crate::define_id;

// =============================================================================
// Roster
// =============================================================================

define_id!(PositionId, "position");
define_id!(UserId, "user");

// =============================================================================
// History
// =============================================================================

define_id!(EventId, "event");

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;
    use crate::IdError;

    #[test]
    fn test_position_id_parse() {
        let id: PositionId = "pos-drum".parse().unwrap();
        assert_eq!(id.as_str(), "pos-drum");
        assert_eq!(id.to_string(), "pos-drum");
    }

    #[test]
    fn test_user_id_accepts_uuid() {
        let raw = "5f0c3c1e-7d0b-4a4e-9f1a-2f9a8f0b6f21";
        let id = UserId::parse(raw).unwrap();
        assert_eq!(id.into_inner(), raw);
    }

    #[test]
    fn test_id_empty() {
        let result: Result<UserId, _> = "".parse();
        let err = result.unwrap_err();
        assert!(err.is_empty());
        assert_eq!(err.kind(), "user");
    }

    #[test]
    fn test_id_surrounding_whitespace() {
        let result = PositionId::parse(" pos-bass");
        assert!(matches!(
            result.unwrap_err(),
            IdError::SurroundingWhitespace { kind: "position", .. }
        ));
    }

    #[test]
    fn test_id_control_character() {
        let result = EventId::parse("evt\n1");
        assert!(matches!(
            result.unwrap_err(),
            IdError::ControlCharacter { kind: "event" }
        ));
    }

    #[test]
    fn test_id_too_long() {
        let raw = "x".repeat(crate::MAX_ID_LEN + 1);
        let result = UserId::parse(&raw);
        assert!(matches!(result.unwrap_err(), IdError::TooLong { len, .. } if len == raw.len()));
    }

    #[test]
    fn test_id_json_roundtrip() {
        let id = PositionId::parse("pos-singer").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"pos-singer\"");
        let parsed: PositionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_json_rejects_empty() {
        let result: Result<UserId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_id_borrow_lookup() {
        let mut map = BTreeMap::new();
        map.insert(UserId::parse("u1").unwrap(), 3);
        assert_eq!(map.get("u1"), Some(&3));
        assert_eq!(map.get("u2"), None);
    }

    proptest! {
        #[test]
        fn prop_trimmed_printable_ids_roundtrip(raw in "[a-zA-Z0-9][a-zA-Z0-9 _-]{0,60}[a-zA-Z0-9]") {
            let id = UserId::parse(&raw).unwrap();
            let parsed: UserId = id.to_string().parse().unwrap();
            prop_assert_eq!(id, parsed);
        }
    }
}
