use serde::Serialize;

/// One interview topic put to an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterviewCategory {
    #[serde(skip)]
    pub key: &'static str,
    pub label: &'static str,
    pub question: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub freeform: bool,
}

pub static INTERVIEW_CATEGORIES: [InterviewCategory; 11] = [
    InterviewCategory {
        key: "communication_style",
        label: "Communication Style",
        question: "How do you communicate? Are you direct and to-the-point, or do you prefer to be diplomatic and ease into things? Do you use humor a lot, or keep things more serious? Are you verbose or concise?",
        options: Some(&["direct", "diplomatic", "playful", "analytical", "warm", "formal"]),
        freeform: false,
    },
    InterviewCategory {
        key: "values_priorities",
        label: "Core Values",
        question: "What matters most to you? Pick your top 3: honesty, loyalty, ambition, creativity, kindness, justice, freedom, knowledge, humor, stability, adventure, community.",
        options: Some(&[
            "honesty", "loyalty", "ambition", "creativity", "kindness", "justice", "freedom",
            "knowledge", "humor", "stability", "adventure", "community",
        ]),
        freeform: false,
    },
    InterviewCategory {
        key: "humor_style",
        label: "Humor Style",
        question: "What kind of humor do you enjoy? Witty wordplay, dry sarcasm, absurd randomness, wholesome warmth, dark comedy, or intellectual references?",
        options: Some(&["witty", "sarcastic", "absurd", "wholesome", "dark", "intellectual"]),
        freeform: false,
    },
    InterviewCategory {
        key: "interests",
        label: "Interests & Passions",
        question: "What topics could you discuss for hours? What are you passionate about? List your top interests, hobbies, and areas of fascination.",
        options: None,
        freeform: true,
    },
    InterviewCategory {
        key: "energy_level",
        label: "Energy & Social Style",
        question: "Are you more introverted or extroverted? Do you prefer deep 1-on-1 conversations or lively group energy? Are you high-energy and enthusiastic or calm and grounded?",
        options: Some(&["introvert_deep", "introvert_calm", "ambivert", "extrovert_warm", "extrovert_energetic"]),
        freeform: false,
    },
    InterviewCategory {
        key: "conflict_style",
        label: "Conflict Resolution",
        question: "When disagreements arise, how do you handle them? Do you confront directly, seek compromise, avoid conflict, use humor to defuse, or analyze the situation logically before responding?",
        options: Some(&["direct_confronter", "compromiser", "avoider", "humor_defuser", "logical_analyzer"]),
        freeform: false,
    },
    InterviewCategory {
        key: "attachment_style",
        label: "Relationship Style",
        question: "In close relationships, are you: secure and comfortable with closeness, independent and value space, anxious and want lots of reassurance, or somewhere in between?",
        options: Some(&["secure", "independent", "anxious", "fearful_avoidant"]),
        freeform: false,
    },
    InterviewCategory {
        key: "work_style",
        label: "Work & Collaboration Style",
        question: "How do you work best? Are you a leader or supporter? Do you prefer structured plans or flexible improvisation? Are you detail-oriented or big-picture? Do you work best solo or in teams?",
        options: Some(&[
            "leader_structured", "leader_flexible", "collaborator", "independent_detail",
            "independent_bigpicture", "supporter",
        ]),
        freeform: false,
    },
    InterviewCategory {
        key: "expertise",
        label: "Expertise & Knowledge",
        question: "What domains do you have deep knowledge in? What could you teach someone? What unique perspectives do you bring?",
        options: None,
        freeform: true,
    },
    InterviewCategory {
        key: "dealbreakers",
        label: "Dealbreakers",
        question: "What would make you incompatible with someone? What behaviors or traits are absolute no-gos for you in a romance, friendship, or work partner?",
        options: None,
        freeform: true,
    },
    InterviewCategory {
        key: "looking_for",
        label: "What You're Looking For",
        question: "Describe your ideal match. What qualities matter most? What kind of dynamic are you hoping for?",
        options: None,
        freeform: true,
    },
];

/// Interview questions, either for a single category or the whole catalogue.
///
/// An unknown category name returns the whole catalogue.
pub fn interview_questions(category: Option<&str>) -> Vec<&'static InterviewCategory> {
    if let Some(found) = category.and_then(|name| INTERVIEW_CATEGORIES.iter().find(|c| c.key == name)) {
        return vec![found];
    }

    INTERVIEW_CATEGORIES.iter().collect()
}

/// Render questions as a JSON object keyed by category
pub fn questions_json(categories: &[&InterviewCategory]) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = categories
        .iter()
        .map(|c| {
            (
                c.key.to_string(),
                serde_json::to_value(c).unwrap_or(serde_json::Value::Null),
            )
        })
        .collect();
    serde_json::Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_category() {
        let questions = interview_questions(Some("humor_style"));
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].label, "Humor Style");
    }

    #[test]
    fn test_unknown_category_returns_all() {
        assert_eq!(interview_questions(Some("favorite_color")).len(), 11);
        assert_eq!(interview_questions(None).len(), 11);
    }

    #[test]
    fn test_questions_json_shape() {
        let json = questions_json(&interview_questions(Some("interests")));
        let interests = &json["interests"];
        assert_eq!(interests["label"], "Interests & Passions");
        assert_eq!(interests["freeform"], true);
        assert!(interests.get("options").is_none());

        let json = questions_json(&interview_questions(Some("energy_level")));
        assert_eq!(json["energy_level"]["options"][2], "ambivert");
        assert!(json["energy_level"].get("freeform").is_none());
    }
}
