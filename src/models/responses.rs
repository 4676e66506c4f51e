use serde::{Deserialize, Serialize};

use crate::core::archetype::IdealMatches;
use crate::models::domain::{
    AgentStatus, CompatibilityBreakdown, DateRound, MatchRecord, MatchType, Rating,
};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub app: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    /// Round left in `error` state by a failed date orchestration
    #[serde(rename = "dateId", skip_serializing_if = "Option::is_none", default)]
    pub date_id: Option<i64>,
}

/// Plain acknowledgement with an optional human-readable message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateResponse {
    pub success: bool,
    pub archetype: &'static str,
    pub archetype_description: &'static str,
    pub ideal_matches: IdealMatches,
    pub bio: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicProfile {
    pub archetype: Option<String>,
    pub bio: Option<String>,
    pub communication_style: Option<String>,
    pub values: Option<String>,
    pub humor: Option<String>,
    pub interests: Option<String>,
    pub energy: Option<String>,
    pub match_types: String,
    pub complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicProfileResponse {
    pub username: String,
    pub name: Option<String>,
    pub status: AgentStatus,
    pub profile: PublicProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub username: String,
    pub name: Option<String>,
    pub archetype: Option<String>,
    pub compatibility_score: u32,
    pub breakdown: CompatibilityBreakdown,
    pub dealbreaker: bool,
}

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResponse {
    pub username: String,
    pub match_type: MatchType,
    pub archetype: Option<String>,
    pub matches: Vec<MatchCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchResponse {
    pub success: bool,
    pub match_id: i64,
    pub compatibility: u32,
    #[serde(rename = "archetypeA")]
    pub archetype_a: String,
    #[serde(rename = "archetypeB")]
    pub archetype_b: String,
    pub breakdown: CompatibilityBreakdown,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReply {
    pub username: String,
    pub response: Option<String>,
}

/// Outcome of one orchestrated date round
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRoundResponse {
    pub success: bool,
    pub date_id: i64,
    pub round: u32,
    pub round_name: String,
    pub agent_a: AgentReply,
    pub agent_b: AgentReply,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateHistoryResponse {
    #[serde(rename = "match")]
    pub match_record: MatchRecord,
    pub dates: Vec<DateRound>,
    pub ratings: Vec<Rating>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub success: bool,
    pub rating_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub ideal_matches: IdealMatches,
}
