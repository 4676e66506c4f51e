// Core algorithm exports
pub mod archetype;
pub mod interview;
pub mod matcher;
pub mod prompts;
pub mod scoring;
pub mod traits;

pub use archetype::{determine_archetype, generate_bio, Archetype, ARCHETYPES};
pub use interview::{interview_questions, InterviewCategory};
pub use matcher::{MatchResult, Matcher, DEFAULT_MATCH_LIMIT};
pub use prompts::{date_prompt, DatePrompt, MAX_ROUNDS};
pub use scoring::calculate_compatibility;
pub use traits::{complement_score, overlap_score, parse_list};
