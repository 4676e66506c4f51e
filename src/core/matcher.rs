use crate::core::scoring::calculate_compatibility;
use crate::models::{Compatibility, MatchType, Profile, RankedCandidate, ScoringWeights};

/// Number of candidates returned when the caller gives no limit
pub const DEFAULT_MATCH_LIMIT: usize = 5;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<RankedCandidate>,
    pub total_candidates: usize,
}

/// Ranks the matching pool for an agent
///
/// # Pipeline Stages
/// 1. Drop the target itself and incomplete profiles
/// 2. Keep candidates where both sides opted into the category
/// 3. Score compatibility and rank by score
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Score a single pairing with this matcher's weights
    pub fn compatibility(&self, profile_a: &Profile, profile_b: &Profile, match_type: MatchType) -> Compatibility {
        calculate_compatibility(profile_a, profile_b, match_type, self.weights.for_type(match_type))
    }

    /// Find the best candidates for `target` in the given category
    ///
    /// # Arguments
    /// * `target` - Profile of the agent looking for matches
    /// * `candidates` - The matching pool (may include the target)
    /// * `match_type` - Category to score for
    /// * `limit` - Maximum number of matches to return
    ///
    /// # Returns
    /// MatchResult with candidates sorted by descending score. Equal scores
    /// keep pool order.
    pub fn find_matches(
        &self,
        target: &Profile,
        candidates: &[Profile],
        match_type: MatchType,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        if !target.wants(match_type) {
            return MatchResult {
                matches: Vec::new(),
                total_candidates,
            };
        }

        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .filter(|candidate| candidate.agent_username != target.agent_username)
            .filter(|candidate| candidate.profile_complete)
            .filter(|candidate| candidate.wants(match_type))
            .map(|candidate| RankedCandidate {
                username: candidate.agent_username.clone(),
                archetype: candidate.archetype.clone(),
                compatibility: self.compatibility(target, candidate, match_type),
            })
            .collect();

        // Stable sort so ties keep pool order
        ranked.sort_by(|a, b| {
            b.compatibility
                .score
                .partial_cmp(&a.compatibility.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ranked.truncate(limit);

        MatchResult {
            matches: ranked,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileField;

    fn create_candidate(username: &str, communication: &str, values: &str, match_types: &str) -> Profile {
        let mut profile = Profile::empty(username);
        profile.set_field(ProfileField::CommunicationStyle, communication.to_string());
        profile.set_field(ProfileField::ValuesPriorities, values.to_string());
        profile.set_field(ProfileField::MatchTypes, match_types.to_string());
        profile.profile_complete = true;
        profile
    }

    fn create_target() -> Profile {
        create_candidate("target", "direct", "honesty, loyalty", "romance,work,friendship")
    }

    #[test]
    fn test_excludes_self_and_incomplete() {
        let matcher = Matcher::with_default_weights();
        let target = create_target();

        let mut incomplete = create_candidate("draft", "warm", "honesty", "romance");
        incomplete.profile_complete = false;

        let candidates = vec![
            target.clone(),
            incomplete,
            create_candidate("ready", "warm", "honesty", "romance"),
        ];

        let result = matcher.find_matches(&target, &candidates, MatchType::Romance, 10);

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].username, "ready");
    }

    #[test]
    fn test_both_sides_must_want_category() {
        let matcher = Matcher::with_default_weights();
        let target = create_target();
        let candidates = vec![
            create_candidate("work_only", "warm", "honesty", "work"),
            create_candidate("romantic", "warm", "honesty", "romance"),
        ];

        let result = matcher.find_matches(&target, &candidates, MatchType::Work, 10);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].username, "work_only");

        let mut picky = create_target();
        picky.match_types = "friendship".to_string();
        let result = matcher.find_matches(&picky, &candidates, MatchType::Work, 10);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_matches_sorted_by_score() {
        let matcher = Matcher::with_default_weights();
        let target = create_target();
        let candidates = vec![
            create_candidate("stranger", "formal", "ambition", "romance"),
            create_candidate("kindred", "diplomatic", "honesty, loyalty", "romance"),
        ];

        let result = matcher.find_matches(&target, &candidates, MatchType::Romance, 10);

        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].username, "kindred");
        assert!(result.matches[0].compatibility.score >= result.matches[1].compatibility.score);
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_weights();
        let target = create_target();
        let candidates: Vec<Profile> = (0..20)
            .map(|i| create_candidate(&format!("agent{}", i), "warm", "honesty", "romance"))
            .collect();

        let result = matcher.find_matches(&target, &candidates, MatchType::Romance, DEFAULT_MATCH_LIMIT);
        assert_eq!(result.matches.len(), DEFAULT_MATCH_LIMIT);
        // identical candidates keep pool order
        assert_eq!(result.matches[0].username, "agent0");
    }
}
