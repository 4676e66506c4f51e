/// Traits that complement each other, keyed by the trait on the scoring side.
///
/// Lookups are directional: `b` complements `a` only if it is listed under `a`.
pub type ComplementTable = &'static [(&'static str, &'static [&'static str])];

pub const COMMUNICATION_COMPLEMENTS: ComplementTable = &[
    ("direct", &["diplomatic", "warm"]),
    ("analytical", &["playful", "warm"]),
    ("formal", &["playful", "warm"]),
    ("playful", &["analytical", "formal"]),
    ("warm", &["direct", "analytical"]),
    ("diplomatic", &["direct"]),
];

pub const ENERGY_COMPLEMENTS: ComplementTable = &[
    ("introvert_deep", &["introvert_calm", "ambivert"]),
    ("introvert_calm", &["ambivert", "introvert_deep"]),
    ("ambivert", &["introvert_deep", "extrovert_warm"]),
    ("extrovert_warm", &["ambivert", "introvert_deep"]),
    ("extrovert_energetic", &["ambivert", "extrovert_warm"]),
];

pub const WORK_COMPLEMENTS: ComplementTable = &[
    ("leader_structured", &["supporter", "collaborator"]),
    ("leader_flexible", &["independent_detail", "collaborator"]),
    ("collaborator", &["leader_structured", "leader_flexible"]),
    ("independent_detail", &["independent_bigpicture", "leader_flexible"]),
    ("independent_bigpicture", &["independent_detail", "collaborator"]),
    ("supporter", &["leader_structured", "leader_flexible"]),
];

pub const ATTACHMENT_COMPLEMENTS: ComplementTable = &[
    ("secure", &["secure", "independent", "anxious"]),
    ("independent", &["secure"]),
    ("anxious", &["secure"]),
    ("fearful_avoidant", &["secure"]),
];

/// Neutral score used whenever one side has nothing to compare
pub const NEUTRAL_SCORE: f64 = 0.5;

const SAME_TRAIT_SCORE: f64 = 0.7;
const COMPLEMENT_SCORE: f64 = 1.0;
const UNRELATED_SCORE: f64 = 0.3;

/// Split a comma-separated answer into trimmed, lowercased, non-empty items
pub fn parse_list(text: Option<&str>) -> Vec<String> {
    text.map(|t| {
        t.split(',')
            .map(|item| item.trim().to_lowercase())
            .filter(|item| !item.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Fraction of shared items relative to the longer list (0-1)
///
/// Returns the neutral score if either list is empty.
pub fn overlap_score(list_a: &[String], list_b: &[String]) -> f64 {
    if list_a.is_empty() || list_b.is_empty() {
        return NEUTRAL_SCORE;
    }

    let shared = list_a.iter().filter(|item| list_b.contains(item)).count();
    shared as f64 / list_a.len().max(list_b.len()) as f64
}

/// Whether `b` is listed as a complement of `a`
#[inline]
pub fn complements(table: ComplementTable, a: &str, b: &str) -> bool {
    table
        .iter()
        .find(|(trait_name, _)| *trait_name == a)
        .map(|(_, partners)| partners.contains(&b))
        .unwrap_or(false)
}

/// Average pairwise fit between two trait lists (0-1)
///
/// Each pair scores 0.7 when identical, 1.0 when complementary and
/// 0.3 otherwise.
pub fn complement_score(text_a: Option<&str>, text_b: Option<&str>, table: ComplementTable) -> f64 {
    let traits_a = parse_list(text_a);
    let traits_b = parse_list(text_b);
    if traits_a.is_empty() || traits_b.is_empty() {
        return NEUTRAL_SCORE;
    }

    let mut total = 0.0;
    let mut comparisons = 0usize;

    for a in &traits_a {
        for b in &traits_b {
            comparisons += 1;
            total += if a == b {
                SAME_TRAIT_SCORE
            } else if complements(table, a, b) {
                COMPLEMENT_SCORE
            } else {
                UNRELATED_SCORE
            };
        }
    }

    total / comparisons as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list(Some(" Direct ,warm,, ")), list(&["direct", "warm"]));
        assert!(parse_list(None).is_empty());
        assert!(parse_list(Some("")).is_empty());
    }

    #[test]
    fn test_overlap_score() {
        let a = list(&["honesty", "loyalty", "humor"]);
        let b = list(&["honesty", "ambition"]);
        assert!((overlap_score(&a, &b) - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(overlap_score(&a, &a), 1.0);
        assert_eq!(overlap_score(&a, &[]), NEUTRAL_SCORE);
    }

    #[test]
    fn test_complement_score() {
        // direct -> diplomatic is a listed complement
        assert_eq!(complement_score(Some("direct"), Some("diplomatic"), COMMUNICATION_COMPLEMENTS), 1.0);
        assert_eq!(complement_score(Some("direct"), Some("direct"), COMMUNICATION_COMPLEMENTS), 0.7);
        assert_eq!(complement_score(Some("direct"), Some("formal"), COMMUNICATION_COMPLEMENTS), 0.3);
        assert_eq!(complement_score(None, Some("formal"), COMMUNICATION_COMPLEMENTS), NEUTRAL_SCORE);
    }

    #[test]
    fn test_complement_lookup_is_directional() {
        // diplomatic lists only direct; warm is not a complement of diplomatic
        assert!(complements(COMMUNICATION_COMPLEMENTS, "warm", "direct"));
        assert!(!complements(COMMUNICATION_COMPLEMENTS, "diplomatic", "warm"));
    }

    #[test]
    fn test_complement_score_averages_pairs() {
        // secure/secure = 0.7, secure/anxious = 1.0
        let score = complement_score(Some("secure"), Some("secure, anxious"), ATTACHMENT_COMPLEMENTS);
        assert!((score - 0.85).abs() < 1e-9);
    }
}
