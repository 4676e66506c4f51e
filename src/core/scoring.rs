use crate::core::archetype::determine_archetype;
use crate::core::traits::{
    complement_score, overlap_score, parse_list, ATTACHMENT_COMPLEMENTS,
    COMMUNICATION_COMPLEMENTS, ENERGY_COMPLEMENTS, WORK_COMPLEMENTS,
};
use crate::models::{
    Compatibility, CompatibilityBreakdown, FactorScore, FactorWeights, MatchType, Profile,
};

/// Highest score a pairing can reach once a dealbreaker is triggered
pub const DEALBREAKER_CAP: f64 = 0.3;

const IDEAL_ARCHETYPE_SCORE: f64 = 1.0;
const SAME_ARCHETYPE_SCORE: f64 = 0.6;
const OTHER_ARCHETYPE_SCORE: f64 = 0.4;

const SAME_CONFLICT_SCORE: f64 = 0.7;
const OTHER_CONFLICT_SCORE: f64 = 0.5;

/// Score how well `profile_b` suits `profile_a` for a category (0-1).
///
/// Scoring formula:
/// score = sum(factor_score * factor_weight) over the category's factors,
/// capped at 0.3 when either side carries a dealbreaker the other shows.
///
/// Archetype, values and communication are always evaluated; the remaining
/// factors only when their weight is positive.
pub fn calculate_compatibility(
    profile_a: &Profile,
    profile_b: &Profile,
    match_type: MatchType,
    weights: &FactorWeights,
) -> Compatibility {
    let mut breakdown = CompatibilityBreakdown::default();
    let mut total = 0.0;

    // Archetype pairing
    let archetype_a = determine_archetype(profile_a);
    let archetype_b = determine_archetype(profile_b);
    let ideal = archetype_a.ideal_matches.for_type(match_type);
    let is_ideal = archetype_b.name == ideal;
    let archetype_score = if is_ideal {
        IDEAL_ARCHETYPE_SCORE
    } else if archetype_a.name == archetype_b.name {
        SAME_ARCHETYPE_SCORE
    } else {
        OTHER_ARCHETYPE_SCORE
    };
    breakdown.archetype = Some(FactorScore {
        score: archetype_score,
        detail: format!(
            "{} + {}{}",
            archetype_a.name,
            archetype_b.name,
            if is_ideal { " (ideal match!)" } else { "" }
        ),
    });
    total += archetype_score * weights.archetype;

    // Shared values
    let values_score = overlap_score(
        &parse_list(profile_a.values_priorities.as_deref()),
        &parse_list(profile_b.values_priorities.as_deref()),
    );
    breakdown.values = Some(factor(values_score, "Shared values"));
    total += values_score * weights.values;

    // Communication fit
    let communication_score = complement_score(
        profile_a.communication_style.as_deref(),
        profile_b.communication_style.as_deref(),
        COMMUNICATION_COMPLEMENTS,
    );
    breakdown.communication = Some(factor(communication_score, "Communication fit"));
    total += communication_score * weights.communication;

    if weights.humor > 0.0 {
        let score = overlap_score(
            &parse_list(profile_a.humor_style.as_deref()),
            &parse_list(profile_b.humor_style.as_deref()),
        );
        breakdown.humor = Some(factor(score, "Humor alignment"));
        total += score * weights.humor;
    }

    if weights.energy > 0.0 {
        let score = complement_score(
            profile_a.energy_level.as_deref(),
            profile_b.energy_level.as_deref(),
            ENERGY_COMPLEMENTS,
        );
        breakdown.energy = Some(factor(score, "Energy fit"));
        total += score * weights.energy;
    }

    if weights.attachment > 0.0 {
        let score = complement_score(
            profile_a.attachment_style.as_deref(),
            profile_b.attachment_style.as_deref(),
            ATTACHMENT_COMPLEMENTS,
        );
        breakdown.attachment = Some(factor(score, "Attachment fit"));
        total += score * weights.attachment;
    }

    if weights.work_style > 0.0 {
        let score = complement_score(
            profile_a.work_style.as_deref(),
            profile_b.work_style.as_deref(),
            WORK_COMPLEMENTS,
        );
        breakdown.work_style = Some(factor(score, "Work style fit"));
        total += score * weights.work_style;
    }

    if weights.conflict > 0.0 {
        let score = conflict_score(profile_a, profile_b);
        breakdown.conflict = Some(factor(score, "Conflict style fit"));
        total += score * weights.conflict;
    }

    if weights.interests > 0.0 {
        let score = overlap_score(
            &parse_list(profile_a.interests.as_deref()),
            &parse_list(profile_b.interests.as_deref()),
        );
        breakdown.interests = Some(factor(score, "Shared interests"));
        total += score * weights.interests;
    }

    if weights.expertise > 0.0 {
        // Different expertise is the goal here
        let score = 1.0
            - overlap_score(
                &parse_list(profile_a.expertise.as_deref()),
                &parse_list(profile_b.expertise.as_deref()),
            );
        breakdown.expertise = Some(factor(score, "Expertise diversity"));
        total += score * weights.expertise;
    }

    let dealbreaker = has_dealbreaker(profile_a, profile_b) || has_dealbreaker(profile_b, profile_a);
    let score = if dealbreaker { total.min(DEALBREAKER_CAP) } else { total };

    Compatibility {
        score,
        percentage: to_percentage(score),
        breakdown,
        dealbreaker,
        archetype_a: archetype_a.name.to_string(),
        archetype_b: archetype_b.name.to_string(),
        match_type,
    }
}

/// Whether any of `holder`'s dealbreakers shows up in `other`'s
/// communication, humor or energy traits
pub fn has_dealbreaker(holder: &Profile, other: &Profile) -> bool {
    let dealbreakers = parse_list(holder.dealbreakers.as_deref());
    if dealbreakers.is_empty() {
        return false;
    }

    let visible_traits: Vec<String> = [
        other.communication_style.as_deref(),
        other.humor_style.as_deref(),
        other.energy_level.as_deref(),
    ]
    .into_iter()
    .flat_map(parse_list)
    .collect();

    dealbreakers.iter().any(|d| visible_traits.contains(d))
}

/// Compare only the primary (first listed) conflict style.
/// Two unanswered styles count as the same.
#[inline]
fn conflict_score(profile_a: &Profile, profile_b: &Profile) -> f64 {
    let conflict_a = parse_list(profile_a.conflict_style.as_deref());
    let conflict_b = parse_list(profile_b.conflict_style.as_deref());

    if conflict_a.first() == conflict_b.first() {
        SAME_CONFLICT_SCORE
    } else {
        OTHER_CONFLICT_SCORE
    }
}

#[inline]
fn factor(score: f64, label: &str) -> FactorScore {
    FactorScore {
        score,
        detail: format!("{}: {}%", label, to_percentage(score)),
    }
}

/// Convert a 0-1 score into a rounded percentage
#[inline]
pub fn to_percentage(score: f64) -> u32 {
    (score * 100.0).round().max(0.0) as u32
}
