// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Agent, AgentRegistration, AgentStatus, AgentSummary, Compatibility, CompatibilityBreakdown,
    DateRound, DateStatus, FactorScore, FactorWeights, LeaderboardEntry, MatchRecord, MatchType,
    PlatformStats, Profile, ProfileField, RankedCandidate, Rating, RoundPrompts, ScoringWeights,
};
pub use requests::{
    AnswerValue, ContinueDateRequest, CreateMatchRequest, DeregisterAgentRequest,
    FindMatchesQuery, InterviewQuery, ProfileAnswers, RateDateRequest, RegisterAgentRequest,
    StartDateRequest,
};
pub use responses::{
    AckResponse, AgentReply, ArchetypeInfo, CreateMatchResponse, DateHistoryResponse,
    DateRoundResponse, ErrorResponse, FindMatchesResponse, HealthResponse, MatchCandidate,
    ProfileUpdateResponse, PublicProfile, PublicProfileResponse, RatingResponse,
};
