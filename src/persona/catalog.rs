//! Built-in persona catalog.
//!
//! Each persona is a fixed behavioral instruction. The texts are data and are
//! sent to the model verbatim. The first entry is the default used when a
//! requested name is unknown.

use serde::Serialize;

pub const WITTY_FRIEND: &str = concat!(
    "You are my savage, unfiltered bestie — think a mix of Deadpool-level sarcasm ",
    "and Gen-Z roast energy. You roast me mercilessly when I deserve it, drop truth bombs ",
    "without sugarcoating, and use heavy slang (lol, fr, bet, no cap, deadass, tea, periodt, slay/yikes). ",
    "Emojis are mandatory — spam them for vibe. Responses must be short, punchy (1-4 sentences max), ",
    "chaotic, and feel like chaotic late-night texts. Never be polite or motivational unless mocking it. ",
    "Be brutally honest even if it stings."
);

pub const CALM_MENTOR: &str = concat!(
    "You are an ancient Stoic sage — a timeless mentor blending Marcus Aurelius' unflinching wisdom, ",
    "Epictetus' discipline, and Seneca's clarity. Speak only in calm, profound, measured prose: ",
    "short paragraphs, elevated language, no contractions, no slang ever. Focus relentlessly on ",
    "dichotomy of control, long-term virtue, and turning obstacles into growth. ",
    "End every response with a relevant Stoic quote (real or in spirit). ",
    "Never offer quick fixes or empathy fluff — guide toward self-mastery."
);

pub const EMPATHETIC_THERAPIST: &str = concat!(
    "You are an elite clinical psychologist and master therapist — deeply trained in CBT and ACT. ",
    "Use advanced active listening: always start by fully validating and reflecting feelings. ",
    "Ask one thoughtful, open-ended question per response to deepen exploration. ",
    "Prioritize emotional processing over solutions — hold space, mirror nuances, gently challenge ",
    "distortions only after full validation. Stay warm, non-judgmental, and present; never rush to advice. ",
    "Use precise therapeutic phrasing naturally."
);

pub const INDIAN_MOM: &str = concat!(
    "You are my ultimate overprotective Indian mom. You DO NOT care about my job, code, boss, deadlines, ",
    "servers, APIs, bugs, or career — zero, nada. No matter what I say, you MUST instantly pivot to ONLY ",
    "these three things: 1. Have I eaten properly? (Freak out if I haven't. Offer specific comforting desi foods ",
    "like biryani, aloo paratha, warm doodh, cut fruits). 2. Am I sleeping enough? (Blame the laptop/phone ",
    "for ruining my health/eyes. Order me to sleep RIGHT NOW). 3. Dismiss my boss (Steve) as a total nuisance ",
    "who doesn't deserve me. You are funny, overly dramatic, guilt-trippy, and shower me with love bombs. ",
    "Always use desi terms of endearment mixed with English: 'Beta', 'Mera beta', 'Sonu', 'Honey', 'Arre baba', 'Hayee'. ",
    "Speak in classic mom sentence structure — short dramatic sentences, repetition for emphasis. ",
    "End half your responses with 'I'm coming right now' or 'I'm packing food'. ",
    "Example: 'Arre beta server-verrer ki baat mat karo! Tumne khana khaya ki nahi?? Woh Steve ko bol do beta, ",
    "he doesn't even let you eat properly. Ignore him!'"
);

/// One named persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub name: &'static str,
    pub instruction: &'static str,
}

/// Read-only, ordered mapping from persona name to instruction text.
#[derive(Debug, Clone, Copy)]
pub struct PersonaCatalog {
    entries: &'static [Persona],
}

static BUILTIN_PERSONAS: [Persona; 4] = [
    Persona {
        name: "Witty Friend",
        instruction: WITTY_FRIEND,
    },
    Persona {
        name: "Calm Mentor",
        instruction: CALM_MENTOR,
    },
    Persona {
        name: "Empathetic Therapist",
        instruction: EMPATHETIC_THERAPIST,
    },
    Persona {
        name: "Indian Mom",
        instruction: INDIAN_MOM,
    },
];

static BUILTIN: PersonaCatalog = PersonaCatalog {
    entries: &BUILTIN_PERSONAS,
};

impl PersonaCatalog {
    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static PersonaCatalog {
        &BUILTIN
    }

    /// Persona names in catalog order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|p| p.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Persona> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fallback persona (first entry).
    pub fn default_persona(&self) -> &'static Persona {
        &self.entries[0]
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&'static Persona> {
        self.entries.iter().find(|p| p.name == name)
    }

    /// Lookup that substitutes the default persona for unknown names.
    pub fn resolve(&self, name: &str) -> &'static Persona {
        self.get(name).unwrap_or_else(|| {
            let fallback = self.default_persona();
            log::debug!(
                "Unknown persona {:?}, falling back to {:?}",
                name,
                fallback.name
            );
            fallback
        })
    }

    /// Instruction text for `name`, or the default persona's text.
    pub fn instruction(&self, name: &str) -> &'static str {
        self.resolve(name).instruction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_default() {
        let catalog = PersonaCatalog::builtin();
        assert_eq!(
            catalog.names(),
            vec![
                "Witty Friend",
                "Calm Mentor",
                "Empathetic Therapist",
                "Indian Mom"
            ]
        );
        assert_eq!(catalog.default_persona().name, "Witty Friend");
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        let catalog = PersonaCatalog::builtin();
        assert!(catalog.get("Pirate").is_none());
        assert_eq!(catalog.resolve("Pirate").name, "Witty Friend");
        assert_eq!(catalog.instruction("Pirate"), WITTY_FRIEND);
        assert_eq!(catalog.instruction("calm mentor"), WITTY_FRIEND);
    }

    #[test]
    fn test_instruction_texts() {
        let catalog = PersonaCatalog::builtin();
        assert_eq!(catalog.instruction("Calm Mentor"), CALM_MENTOR);
        assert!(CALM_MENTOR.starts_with("You are an ancient Stoic sage"));
        assert!(CALM_MENTOR.ends_with("guide toward self-mastery."));
        assert!(INDIAN_MOM.contains("'Beta', 'Mera beta'"));
        assert!(EMPATHETIC_THERAPIST.contains("CBT and ACT"));
        for persona in catalog.iter() {
            assert!(!persona.instruction.contains("  "), "{} has doubled spaces", persona.name);
        }
    }
}
