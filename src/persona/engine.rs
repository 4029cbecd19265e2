//! Persona-conditioned system prompt construction.

use crate::memory::profile::UserProfile;
use crate::persona::catalog::PersonaCatalog;

/// Separator used when joining profile entries into one dossier line.
const LIST_SEPARATOR: &str = ", ";

/// Render the dossier block describing `profile`.
///
/// Empty lists render as empty strings after their label.
pub fn render_dossier(profile: &UserProfile) -> String {
    format!(
        "[CONFIDENTIAL USER DOSSIER]\n\
         The user you are speaking to has the following profile. \
         Use this to personalize your response implicitly.\n\
         \n\
         - KNOWN FACTS: {facts}\n\
         - PSYCH PROFILE: {patterns}\n\
         - PREFERENCES: {preferences}\n\
         \n\
         INSTRUCTION: Combine your specific persona with the known facts above.\n\
         If the user's input relates to a known fact or trigger, reference it in your specific voice.",
        facts = profile.facts.join(LIST_SEPARATOR),
        patterns = profile.emotional_patterns.join(LIST_SEPARATOR),
        preferences = profile.preferences.join(LIST_SEPARATOR),
    )
}

/// Combines a profile with personas from a catalog.
#[derive(Debug, Clone, Copy)]
pub struct PersonalityEngine<'a> {
    memory: &'a UserProfile,
    catalog: &'a PersonaCatalog,
}

impl<'a> PersonalityEngine<'a> {
    /// Engine over the built-in catalog.
    pub fn new(memory: &'a UserProfile) -> Self {
        Self::with_catalog(memory, PersonaCatalog::builtin())
    }

    pub fn with_catalog(memory: &'a UserProfile, catalog: &'a PersonaCatalog) -> Self {
        Self { memory, catalog }
    }

    /// Persona instruction, a blank line, then the dossier.
    ///
    /// Unknown persona names use the catalog's default persona.
    pub fn construct_system_prompt(&self, persona_name: &str) -> String {
        let base_instruction = self.catalog.instruction(persona_name);
        format!("{}\n\n{}", base_instruction, render_dossier(self.memory))
    }
}

/// Compose the system prompt for `persona_name` over the built-in catalog.
pub fn compose_prompt(persona_name: &str, profile: &UserProfile) -> String {
    PersonalityEngine::new(profile).construct_system_prompt(persona_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::catalog::{CALM_MENTOR, WITTY_FRIEND};

    fn incident_profile() -> UserProfile {
        UserProfile::new(
            vec!["Never deploy on Fridays".into(), "Prefers honest incident reports".into()],
            vec!["Team is stressed about the outage".into()],
            vec!["Sarah is the team lead".into(), "David is the DBA".into()],
        )
    }

    #[test]
    fn test_calm_mentor_with_empty_profile() {
        let prompt = compose_prompt("Calm Mentor", &UserProfile::default());
        let (instruction, dossier) = prompt.split_once("\n\n").unwrap();
        assert_eq!(instruction, CALM_MENTOR);
        assert!(dossier.starts_with("[CONFIDENTIAL USER DOSSIER]"));
        assert!(dossier.contains("- KNOWN FACTS: \n"));
        assert!(dossier.contains("- PSYCH PROFILE: \n"));
        assert!(dossier.contains("- PREFERENCES: \n"));
    }

    #[test]
    fn test_dossier_joins_lists_in_order() {
        let dossier = render_dossier(&incident_profile());
        assert!(dossier.contains("- KNOWN FACTS: Sarah is the team lead, David is the DBA\n"));
        assert!(dossier.contains("- PSYCH PROFILE: Team is stressed about the outage\n"));
        assert!(dossier
            .contains("- PREFERENCES: Never deploy on Fridays, Prefers honest incident reports\n"));
        assert!(dossier.contains("personalize your response implicitly"));
        assert!(dossier.ends_with("reference it in your specific voice."));
    }

    #[test]
    fn test_unknown_persona_uses_default_instruction() {
        let profile = incident_profile();
        let prompt = compose_prompt("Sea Captain", &profile);
        assert!(prompt.starts_with(WITTY_FRIEND));
        assert_eq!(prompt, compose_prompt("Witty Friend", &profile));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let profile = incident_profile();
        let first = compose_prompt("Indian Mom", &profile);
        for _ in 0..3 {
            assert_eq!(compose_prompt("Indian Mom", &profile), first);
        }
    }

    #[test]
    fn test_engine_matches_free_function() {
        let profile = incident_profile();
        let engine = PersonalityEngine::new(&profile);
        assert_eq!(
            engine.construct_system_prompt("Empathetic Therapist"),
            compose_prompt("Empathetic Therapist", &profile)
        );
    }
}
