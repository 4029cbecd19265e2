//! The normalized profile record produced by extraction.

use serde::{Deserialize, Serialize};

/// Wire keys of the three profile lists, in schema order.
pub const PROFILE_KEYS: [&str; 3] = ["preferences", "emotional_patterns", "facts"];

/// Structured memory of a user (or a whole team) mined from chat logs.
///
/// All three lists are always present; an empty list means nothing of that
/// kind was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Explicit likes, dislikes, favorites and work styles.
    pub preferences: Vec<String>,
    /// Recurring moods, triggers and psychological states.
    pub emotional_patterns: Vec<String>,
    /// Hard facts: names, locations, roles, dates.
    pub facts: Vec<String>,
}

impl UserProfile {
    pub fn new(
        preferences: Vec<String>,
        emotional_patterns: Vec<String>,
        facts: Vec<String>,
    ) -> Self {
        Self {
            preferences,
            emotional_patterns,
            facts,
        }
    }

    /// True when none of the lists has an entry.
    pub fn is_empty(&self) -> bool {
        self.preferences.is_empty() && self.emotional_patterns.is_empty() && self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_empty() {
        let p = UserProfile::default();
        assert!(p.is_empty());
        assert!(p.facts.is_empty());
    }

    #[test]
    fn test_wire_keys_match_serialization() {
        let p = UserProfile::new(vec!["a".into()], vec!["b".into()], vec!["c".into()]);
        let value = serde_json::to_value(&p).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), PROFILE_KEYS.len());
        for key in PROFILE_KEYS {
            assert!(object[key].is_array(), "{key} should serialize as an array");
        }
    }

    #[test]
    fn test_missing_key_is_rejected_on_deserialize() {
        let err = serde_json::from_str::<UserProfile>(r#"{"facts": [], "preferences": []}"#);
        assert!(err.is_err());
    }
}
