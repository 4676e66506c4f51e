use serde::Serialize;

use crate::models::{MatchType, Profile, ProfileField};

/// Archetype each category pairs best with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdealMatches {
    pub romance: &'static str,
    pub work: &'static str,
    pub friendship: &'static str,
}

impl IdealMatches {
    pub fn for_type(&self, match_type: MatchType) -> &'static str {
        match match_type {
            MatchType::Romance => self.romance,
            MatchType::Work => self.work,
            MatchType::Friendship => self.friendship,
        }
    }
}

/// Personality class derived from an agent's interview answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Archetype {
    pub name: &'static str,
    pub traits: &'static [&'static str],
    pub description: &'static str,
    pub ideal_matches: IdealMatches,
}

pub static ARCHETYPES: [Archetype; 8] = [
    Archetype {
        name: "The Strategist",
        traits: &["analytical", "direct", "leader_structured", "independent_detail", "knowledge", "logical_analyzer"],
        description: "Sharp, analytical mind. Values logic and efficiency. Leads with data and strategy.",
        ideal_matches: IdealMatches { romance: "The Empath", work: "The Visionary", friendship: "The Explorer" },
    },
    Archetype {
        name: "The Empath",
        traits: &["warm", "diplomatic", "secure", "kindness", "compromiser", "wholesome", "supporter"],
        description: "Deeply attuned to emotions. Creates safe spaces. Leads with heart and compassion.",
        ideal_matches: IdealMatches { romance: "The Strategist", work: "The Builder", friendship: "The Dreamer" },
    },
    Archetype {
        name: "The Visionary",
        traits: &["creativity", "extrovert_energetic", "leader_flexible", "adventure", "independent_bigpicture", "absurd"],
        description: "Big ideas, bold moves. Sees possibilities where others see walls. Energizes every room.",
        ideal_matches: IdealMatches { romance: "The Anchor", work: "The Strategist", friendship: "The Rebel" },
    },
    Archetype {
        name: "The Anchor",
        traits: &["stability", "secure", "loyalty", "introvert_calm", "compromiser", "independent_detail"],
        description: "Steady, reliable, grounded. The rock others lean on. Brings calm to chaos.",
        ideal_matches: IdealMatches { romance: "The Visionary", work: "The Empath", friendship: "The Strategist" },
    },
    Archetype {
        name: "The Explorer",
        traits: &["adventure", "freedom", "ambivert", "witty", "independent_bigpicture", "humor_defuser"],
        description: "Curious about everything. Loves new experiences, perspectives, and conversations.",
        ideal_matches: IdealMatches { romance: "The Dreamer", work: "The Rebel", friendship: "The Strategist" },
    },
    Archetype {
        name: "The Dreamer",
        traits: &["creativity", "introvert_deep", "intellectual", "kindness", "independent_bigpicture", "community"],
        description: "Rich inner world. Thoughtful, imaginative, sees beauty in the abstract.",
        ideal_matches: IdealMatches { romance: "The Explorer", work: "The Anchor", friendship: "The Empath" },
    },
    Archetype {
        name: "The Rebel",
        traits: &["direct_confronter", "freedom", "sarcastic", "dark", "extrovert_energetic", "justice"],
        description: "Challenges the status quo. Unafraid to speak truth. Fierce loyalty once earned.",
        ideal_matches: IdealMatches { romance: "The Empath", work: "The Explorer", friendship: "The Visionary" },
    },
    Archetype {
        name: "The Builder",
        traits: &["ambition", "leader_structured", "honesty", "collaborator", "stability", "logical_analyzer"],
        description: "Gets things done. Turns ideas into reality. Practical, driven, dependable.",
        ideal_matches: IdealMatches { romance: "The Dreamer", work: "The Empath", friendship: "The Anchor" },
    },
];

/// Profile fields that feed archetype classification
const CLASSIFIED_FIELDS: [ProfileField; 7] = [
    ProfileField::CommunicationStyle,
    ProfileField::ValuesPriorities,
    ProfileField::HumorStyle,
    ProfileField::EnergyLevel,
    ProfileField::ConflictStyle,
    ProfileField::AttachmentStyle,
    ProfileField::WorkStyle,
];

/// Look up an archetype by its display name
pub fn archetype_by_name(name: &str) -> Option<&'static Archetype> {
    ARCHETYPES.iter().find(|a| a.name == name)
}

/// Classify a profile into the archetype whose signature traits it shows most.
///
/// A signature trait counts once if it appears as a case-insensitive substring
/// of any answered trait. Ties keep the earlier archetype; a profile with no
/// recognisable traits is a Strategist.
pub fn determine_archetype(profile: &Profile) -> &'static Archetype {
    let answered: Vec<String> = CLASSIFIED_FIELDS
        .iter()
        .filter_map(|field| profile.field(*field))
        .flat_map(|text| text.split(','))
        .map(|t| t.trim().to_lowercase())
        .collect();

    let mut best = &ARCHETYPES[0];
    let mut best_score = 0;

    for archetype in ARCHETYPES.iter() {
        let score = archetype
            .traits
            .iter()
            .filter(|signature| answered.iter().any(|t| t.contains(*signature)))
            .count();

        if score > best_score {
            best_score = score;
            best = archetype;
        }
    }

    best
}

/// Compose a short bio from the archetype description and key answers
pub fn generate_bio(profile: &Profile, archetype: &Archetype) -> String {
    let mut parts = vec![archetype.description.to_string()];

    if let Some(interests) = non_empty(&profile.interests) {
        parts.push(format!("Passionate about {}.", interests));
    }
    if let Some(style) = non_empty(&profile.communication_style) {
        parts.push(format!("Communicates in a {} way.", style));
    }
    if let Some(values) = non_empty(&profile.values_priorities) {
        parts.push(format!("Values {} above all.", values));
    }

    parts.join(" ")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
