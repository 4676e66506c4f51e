// Service exports
pub mod agent_api;
pub mod database;
pub mod orchestrator;

pub use agent_api::{ActionType, AgentActionClient, AgentApiError};
pub use database::{Database, DatabaseError, LEADERBOARD_SIZE};
pub use orchestrator::{DateOrchestrator, OrchestratorError};
