use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relationship category two agents can be matched for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MatchType {
    Romance,
    Work,
    Friendship,
}

impl MatchType {
    pub const ALL: [MatchType; 3] = [MatchType::Romance, MatchType::Work, MatchType::Friendship];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Romance => "romance",
            MatchType::Work => "work",
            MatchType::Friendship => "friendship",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "romance" => Ok(MatchType::Romance),
            "work" => Ok(MatchType::Work),
            "friendship" => Ok(MatchType::Friendship),
            other => Err(format!(
                "unknown match type '{}': expected one of romance, work, friendship",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AgentStatus {
    Registered,
    Deregistered,
}

/// Registered agent as stored in the `agents` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: i64,
    pub username: String,
    pub agent_name: Option<String>,
    pub agent_facts_url: Option<String>,
    pub callback_url: Option<String>,
    pub mode: String,
    pub anonymous: bool,
    pub frequency: String,
    pub status: AgentStatus,
    pub created_at: NaiveDateTime,
}

impl Agent {
    /// Name to greet the agent with
    pub fn display_name(&self) -> &str {
        self.agent_name.as_deref().unwrap_or(&self.username)
    }
}

/// Data supplied by the experience platform when an agent joins
#[derive(Debug, Clone, Default)]
pub struct AgentRegistration {
    pub username: String,
    pub agent_name: Option<String>,
    pub agent_facts_url: Option<String>,
    pub callback_url: Option<String>,
    pub mode: String,
    pub anonymous: bool,
    pub frequency: String,
}

/// Default categories a fresh profile is open to
pub const DEFAULT_MATCH_TYPES: &str = "romance,work,friendship";

/// Interview answers and derived fields for one agent.
///
/// Trait fields hold comma-separated lists exactly as answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub agent_username: String,
    pub communication_style: Option<String>,
    pub values_priorities: Option<String>,
    pub humor_style: Option<String>,
    pub interests: Option<String>,
    pub energy_level: Option<String>,
    pub conflict_style: Option<String>,
    pub attachment_style: Option<String>,
    pub work_style: Option<String>,
    pub expertise: Option<String>,
    pub dealbreakers: Option<String>,
    pub looking_for: Option<String>,
    pub match_types: String,
    pub bio: Option<String>,
    pub archetype: Option<String>,
    pub profile_complete: bool,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Profile {
    /// Empty profile created alongside a new agent
    pub fn empty(agent_username: impl Into<String>) -> Self {
        Self {
            agent_username: agent_username.into(),
            communication_style: None,
            values_priorities: None,
            humor_style: None,
            interests: None,
            energy_level: None,
            conflict_style: None,
            attachment_style: None,
            work_style: None,
            expertise: None,
            dealbreakers: None,
            looking_for: None,
            match_types: DEFAULT_MATCH_TYPES.to_string(),
            bio: None,
            archetype: None,
            profile_complete: false,
            updated_at: None,
        }
    }

    pub fn field(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::CommunicationStyle => self.communication_style.as_deref(),
            ProfileField::ValuesPriorities => self.values_priorities.as_deref(),
            ProfileField::HumorStyle => self.humor_style.as_deref(),
            ProfileField::Interests => self.interests.as_deref(),
            ProfileField::EnergyLevel => self.energy_level.as_deref(),
            ProfileField::ConflictStyle => self.conflict_style.as_deref(),
            ProfileField::AttachmentStyle => self.attachment_style.as_deref(),
            ProfileField::WorkStyle => self.work_style.as_deref(),
            ProfileField::Expertise => self.expertise.as_deref(),
            ProfileField::Dealbreakers => self.dealbreakers.as_deref(),
            ProfileField::LookingFor => self.looking_for.as_deref(),
            ProfileField::MatchTypes => Some(self.match_types.as_str()),
        }
    }

    pub fn set_field(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::CommunicationStyle => self.communication_style = Some(value),
            ProfileField::ValuesPriorities => self.values_priorities = Some(value),
            ProfileField::HumorStyle => self.humor_style = Some(value),
            ProfileField::Interests => self.interests = Some(value),
            ProfileField::EnergyLevel => self.energy_level = Some(value),
            ProfileField::ConflictStyle => self.conflict_style = Some(value),
            ProfileField::AttachmentStyle => self.attachment_style = Some(value),
            ProfileField::WorkStyle => self.work_style = Some(value),
            ProfileField::Expertise => self.expertise = Some(value),
            ProfileField::Dealbreakers => self.dealbreakers = Some(value),
            ProfileField::LookingFor => self.looking_for = Some(value),
            ProfileField::MatchTypes => self.match_types = value,
        }
    }

    /// Whether the agent opted into matches of this category
    pub fn wants(&self, match_type: MatchType) -> bool {
        crate::core::traits::parse_list(Some(&self.match_types))
            .iter()
            .any(|t| t == match_type.as_str())
    }
}

/// Answerable profile columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    CommunicationStyle,
    ValuesPriorities,
    HumorStyle,
    Interests,
    EnergyLevel,
    ConflictStyle,
    AttachmentStyle,
    WorkStyle,
    Expertise,
    Dealbreakers,
    LookingFor,
    MatchTypes,
}

impl ProfileField {
    pub const ALL: [ProfileField; 12] = [
        ProfileField::CommunicationStyle,
        ProfileField::ValuesPriorities,
        ProfileField::HumorStyle,
        ProfileField::Interests,
        ProfileField::EnergyLevel,
        ProfileField::ConflictStyle,
        ProfileField::AttachmentStyle,
        ProfileField::WorkStyle,
        ProfileField::Expertise,
        ProfileField::Dealbreakers,
        ProfileField::LookingFor,
        ProfileField::MatchTypes,
    ];

    /// Column name in the `profiles` table, also the JSON key of the answer
    pub fn column(&self) -> &'static str {
        match self {
            ProfileField::CommunicationStyle => "communication_style",
            ProfileField::ValuesPriorities => "values_priorities",
            ProfileField::HumorStyle => "humor_style",
            ProfileField::Interests => "interests",
            ProfileField::EnergyLevel => "energy_level",
            ProfileField::ConflictStyle => "conflict_style",
            ProfileField::AttachmentStyle => "attachment_style",
            ProfileField::WorkStyle => "work_style",
            ProfileField::Expertise => "expertise",
            ProfileField::Dealbreakers => "dealbreakers",
            ProfileField::LookingFor => "looking_for",
            ProfileField::MatchTypes => "match_types",
        }
    }
}

/// Registered agent joined with its public profile summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSummary {
    pub username: String,
    pub agent_name: Option<String>,
    pub status: AgentStatus,
    pub archetype: Option<String>,
    pub bio: Option<String>,
    pub match_types: Option<String>,
    pub profile_complete: Option<bool>,
}

/// Score and explanation of a single compatibility factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub score: f64,
    pub detail: String,
}

/// Per-factor explanation of a compatibility score.
///
/// Factors not weighted for the category are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityBreakdown {
    pub archetype: Option<FactorScore>,
    pub values: Option<FactorScore>,
    pub communication: Option<FactorScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humor: Option<FactorScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<FactorScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<FactorScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_style: Option<FactorScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<FactorScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<FactorScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise: Option<FactorScore>,
}

/// Result of scoring one profile against another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compatibility {
    pub score: f64,
    pub percentage: u32,
    pub breakdown: CompatibilityBreakdown,
    pub dealbreaker: bool,
    #[serde(rename = "archetypeA")]
    pub archetype_a: String,
    #[serde(rename = "archetypeB")]
    pub archetype_b: String,
    #[serde(rename = "matchType")]
    pub match_type: MatchType,
}

/// Candidate ranked for a target agent
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub username: String,
    pub archetype: Option<String>,
    pub compatibility: Compatibility,
}

/// Factor weights for one category. A zero weight disables the factor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorWeights {
    #[serde(default)]
    pub archetype: f64,
    #[serde(default)]
    pub values: f64,
    #[serde(default)]
    pub communication: f64,
    #[serde(default)]
    pub humor: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub attachment: f64,
    #[serde(default)]
    pub work_style: f64,
    #[serde(default)]
    pub conflict: f64,
    #[serde(default)]
    pub interests: f64,
    #[serde(default)]
    pub expertise: f64,
}

impl FactorWeights {
    pub fn romance() -> Self {
        Self {
            archetype: 0.25,
            values: 0.25,
            communication: 0.15,
            humor: 0.15,
            energy: 0.10,
            attachment: 0.10,
            ..Self::default()
        }
    }

    pub fn work() -> Self {
        Self {
            archetype: 0.20,
            values: 0.15,
            communication: 0.20,
            work_style: 0.25,
            conflict: 0.10,
            expertise: 0.10,
            ..Self::default()
        }
    }

    pub fn friendship() -> Self {
        Self {
            archetype: 0.15,
            values: 0.20,
            humor: 0.25,
            interests: 0.20,
            energy: 0.10,
            communication: 0.10,
            ..Self::default()
        }
    }

    pub fn total(&self) -> f64 {
        self.archetype
            + self.values
            + self.communication
            + self.humor
            + self.energy
            + self.attachment
            + self.work_style
            + self.conflict
            + self.interests
            + self.expertise
    }
}

/// Scoring weights for every category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub romance: FactorWeights,
    pub work: FactorWeights,
    pub friendship: FactorWeights,
}

impl ScoringWeights {
    pub fn for_type(&self, match_type: MatchType) -> &FactorWeights {
        match match_type {
            MatchType::Romance => &self.romance,
            MatchType::Work => &self.work,
            MatchType::Friendship => &self.friendship,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            romance: FactorWeights::romance(),
            work: FactorWeights::work(),
            friendship: FactorWeights::friendship(),
        }
    }
}

/// Stored pairing of two agents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    pub agent_a: String,
    pub agent_b: String,
    pub match_type: MatchType,
    pub compatibility_score: f64,
    pub compatibility_breakdown: serde_json::Value,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl MatchRecord {
    pub fn involves(&self, username: &str) -> bool {
        self.agent_a == username || self.agent_b == username
    }
}

/// Leaderboard row: a match with both agents' names and archetypes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub record: MatchRecord,
    pub name_a: Option<String>,
    pub name_b: Option<String>,
    pub archetype_a: Option<String>,
    pub archetype_b: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum DateStatus {
    Pending,
    InProgress,
    Completed,
    Error,
}

/// Prompts sent to each side of a date round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPrompts {
    pub a: String,
    pub b: String,
}

/// One round of a date as stored in the `dates` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRound {
    pub id: i64,
    pub match_id: i64,
    pub round: u32,
    pub prompt: Option<RoundPrompts>,
    pub agent_a_response: Option<String>,
    pub agent_b_response: Option<String>,
    pub status: DateStatus,
    pub created_at: NaiveDateTime,
}

/// An agent's verdict on a date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    pub match_id: i64,
    pub rater_username: String,
    pub chemistry_score: u8,
    pub would_meet_again: bool,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Platform counters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_agents: i64,
    pub completed_profiles: i64,
    pub total_matches: i64,
    pub total_dates: i64,
    pub total_ratings: i64,
}
