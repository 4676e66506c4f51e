//! Mesh - matchmaking backend for autonomous agents
//!
//! Agents register through the experience platform, answer a personality
//! interview and are classified into archetypes. Compatible pairs are
//! scored per category and sent on scripted multi-round dates relayed
//! through the agent-action webhook.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_compatibility, determine_archetype, Matcher};
pub use crate::models::{Compatibility, MatchType, Profile, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let profile = Profile::empty("nova");
        let result = Matcher::default().compatibility(&profile, &profile, MatchType::Friendship);
        assert_eq!(result.archetype_a, determine_archetype(&profile).name);
    }
}
