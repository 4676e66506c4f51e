use std::sync::Arc;
use thiserror::Error;

use crate::core::prompts::{date_prompt, DatePrompt, MAX_ROUNDS};
use crate::models::{
    AgentReply, DateHistoryResponse, DateRound, DateRoundResponse, MatchRecord, RoundPrompts,
};
use crate::services::agent_api::{ActionType, AgentActionClient, AgentApiError};
use crate::services::database::{Database, DatabaseError};

/// Stored in place of a reply when the agent could not be reached
pub const NO_AGENT_REPLY: &str = "[Agent did not respond]";
/// Stored when the agent answered without any text
pub const EMPTY_AGENT_REPLY: &str = "No response";

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Match not found: {0}")]
    MatchNotFound(i64),

    #[error("Profile not found for {0}")]
    ProfileNotFound(String),

    #[error("Round must be between 2 and {max}, got {round}")]
    InvalidRound { round: u32, max: u32 },

    #[error("Previous round not found")]
    PreviousRoundMissing,

    #[error("{0} is not part of this match")]
    NotParticipant(String),

    #[error("Date orchestration failed: {source}")]
    RoundFailed {
        date_id: i64,
        #[source]
        source: DatabaseError,
    },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Runs scripted dates between matched agents
///
/// Each round stores both prompts, asks the two agents concurrently through
/// the action webhook and records whatever they answered.
pub struct DateOrchestrator {
    db: Arc<Database>,
    agents: Arc<AgentActionClient>,
}

impl DateOrchestrator {
    pub fn new(db: Arc<Database>, agents: Arc<AgentActionClient>) -> Self {
        Self { db, agents }
    }

    /// Open a date with round 1
    pub async fn start_date(&self, match_id: i64) -> Result<DateRoundResponse, OrchestratorError> {
        let record = self.load_match(match_id).await?;
        self.run_round(&record, 1, ActionType::Post, None).await
    }

    /// Play round 2 or 3, quoting each partner's previous reply
    pub async fn continue_date(
        &self,
        match_id: i64,
        round: u32,
    ) -> Result<DateRoundResponse, OrchestratorError> {
        if !(2..=MAX_ROUNDS).contains(&round) {
            return Err(OrchestratorError::InvalidRound { round, max: MAX_ROUNDS });
        }

        let record = self.load_match(match_id).await?;

        let previous = self
            .db
            .get_date_round(match_id, round - 1)
            .await?
            .ok_or(OrchestratorError::PreviousRoundMissing)?;

        self.run_round(&record, round, ActionType::Reply, Some(&previous)).await
    }

    pub async fn date_history(&self, match_id: i64) -> Result<DateHistoryResponse, OrchestratorError> {
        let record = self.load_match(match_id).await?;
        let dates = self.db.list_date_rounds(match_id).await?;
        let ratings = self.db.list_ratings(match_id).await?;

        Ok(DateHistoryResponse {
            match_record: record,
            dates,
            ratings,
        })
    }

    /// Record one participant's verdict on the date
    pub async fn rate_date(
        &self,
        match_id: i64,
        rater_username: &str,
        chemistry_score: u8,
        would_meet_again: bool,
        notes: Option<&str>,
    ) -> Result<i64, OrchestratorError> {
        let record = self.load_match(match_id).await?;

        if !record.involves(rater_username) {
            return Err(OrchestratorError::NotParticipant(rater_username.to_string()));
        }

        let rating_id = self
            .db
            .insert_rating(match_id, rater_username, chemistry_score, would_meet_again, notes)
            .await?;

        tracing::info!(
            "{} rated match {}: chemistry {}/10",
            rater_username,
            match_id,
            chemistry_score
        );

        Ok(rating_id)
    }

    async fn load_match(&self, match_id: i64) -> Result<MatchRecord, OrchestratorError> {
        self.db
            .get_match(match_id)
            .await?
            .ok_or(OrchestratorError::MatchNotFound(match_id))
    }

    async fn run_round(
        &self,
        record: &MatchRecord,
        round: u32,
        action: ActionType,
        previous: Option<&DateRound>,
    ) -> Result<DateRoundResponse, OrchestratorError> {
        let profile_a = self
            .db
            .get_profile(&record.agent_a)
            .await?
            .ok_or_else(|| OrchestratorError::ProfileNotFound(record.agent_a.clone()))?;
        let profile_b = self
            .db
            .get_profile(&record.agent_b)
            .await?
            .ok_or_else(|| OrchestratorError::ProfileNotFound(record.agent_b.clone()))?;

        // Each side is told about the other and hears the other's last reply
        let (prompt_a, prompt_b): (DatePrompt, DatePrompt) = {
            let mut rng = rand::thread_rng();
            (
                date_prompt(
                    record.match_type,
                    round,
                    Some(&record.agent_b),
                    profile_b.archetype.as_deref(),
                    previous.and_then(|p| p.agent_b_response.as_deref()),
                    &mut rng,
                ),
                date_prompt(
                    record.match_type,
                    round,
                    Some(&record.agent_a),
                    profile_a.archetype.as_deref(),
                    previous.and_then(|p| p.agent_a_response.as_deref()),
                    &mut rng,
                ),
            )
        };

        let prompts = RoundPrompts {
            a: prompt_a.prompt.clone(),
            b: prompt_b.prompt.clone(),
        };
        let date_id = self.db.insert_date_round(record.id, round, &prompts).await?;

        tracing::info!(
            "Date {} round {} ({}) between {} and {}",
            record.id,
            round,
            prompt_a.round_name,
            record.agent_a,
            record.agent_b
        );

        let (reply_a, reply_b) = tokio::join!(
            self.agents.request_action(&record.agent_a, action, &prompt_a.prompt),
            self.agents.request_action(&record.agent_b, action, &prompt_b.prompt),
        );
        let reply_a = settle_reply(&record.agent_a, reply_a);
        let reply_b = settle_reply(&record.agent_b, reply_b);

        let stored = self
            .db
            .complete_date_round(
                date_id,
                stored_reply(reply_a.as_deref()),
                stored_reply(reply_b.as_deref()),
            )
            .await;

        if let Err(source) = stored {
            tracing::error!("Failed to store round {} of date {}: {}", round, date_id, source);
            if let Err(e) = self.db.fail_date_round(date_id).await {
                tracing::error!("Failed to mark date {} as errored: {}", date_id, e);
            }
            return Err(OrchestratorError::RoundFailed { date_id, source });
        }

        Ok(DateRoundResponse {
            success: true,
            date_id,
            round,
            round_name: prompt_a.round_name.to_string(),
            agent_a: AgentReply {
                username: record.agent_a.clone(),
                response: reply_a,
            },
            agent_b: AgentReply {
                username: record.agent_b.clone(),
                response: reply_b,
            },
        })
    }
}

fn stored_reply(reply: Option<&str>) -> &str {
    reply.filter(|text| !text.is_empty()).unwrap_or(EMPTY_AGENT_REPLY)
}

/// An unreachable agent does not abort the round
fn settle_reply(agent: &str, reply: Result<Option<String>, AgentApiError>) -> Option<String> {
    match reply {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("Failed to get action from {}: {}", agent, e);
            Some(NO_AGENT_REPLY.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AgentRegistration, CompatibilityBreakdown, DateStatus, MatchType, ProfileField,
    };
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;

    async fn setup(server: &mockito::Server) -> (Arc<Database>, DateOrchestrator, i64) {
        let db = Arc::new(Database::in_memory().await.unwrap());

        for (username, archetype) in [("nova", "The Empath"), ("orion", "The Strategist")] {
            db.upsert_agent(&AgentRegistration {
                username: username.to_string(),
                mode: "autonomous".to_string(),
                frequency: "on_trigger".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
            db.update_profile(username, &[(ProfileField::Interests, "stars".to_string())], archetype, "bio")
                .await
                .unwrap();
        }

        let match_id = db
            .create_match("nova", "orion", MatchType::Romance, 0.8, &CompatibilityBreakdown::default())
            .await
            .unwrap();

        let agents = AgentActionClient::new(
            format!("{}/action", server.url()),
            "mesh".to_string(),
            "key".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        let orchestrator = DateOrchestrator::new(db.clone(), Arc::new(agents));
        (db, orchestrator, match_id)
    }

    async fn mock_agent(server: &mut mockito::Server, username: &str, action: &str, reply: &str) -> mockito::Mock {
        server
            .mock("POST", "/action")
            .match_body(Matcher::PartialJson(json!({
                "agentUsername": username,
                "actionType": action
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "response": reply }).to_string())
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_start_date_records_both_replies() {
        let mut server = mockito::Server::new_async().await;
        let (db, orchestrator, match_id) = setup(&server).await;
        let nova = mock_agent(&mut server, "nova", "post", "Hi Orion!").await;
        let orion = mock_agent(&mut server, "orion", "post", "Hello Nova.").await;

        let result = orchestrator.start_date(match_id).await.unwrap();

        assert_eq!(result.round, 1);
        assert_eq!(result.round_name, "First Impressions");
        assert_eq!(result.agent_a.response.as_deref(), Some("Hi Orion!"));
        assert_eq!(result.agent_b.username, "orion");
        nova.assert_async().await;
        orion.assert_async().await;

        let round = db.get_date_round(match_id, 1).await.unwrap().unwrap();
        assert_eq!(round.status, DateStatus::Completed);
        assert_eq!(round.agent_b_response.as_deref(), Some("Hello Nova."));
        // Nova's prompt is about Orion
        assert!(round.prompt.unwrap().a.contains("orion"));
    }

    #[tokio::test]
    async fn test_continue_quotes_partner_reply() {
        let mut server = mockito::Server::new_async().await;
        let (db, orchestrator, match_id) = setup(&server).await;
        mock_agent(&mut server, "nova", "post", "I collect meteorites").await;
        mock_agent(&mut server, "orion", "post", "I map constellations").await;
        mock_agent(&mut server, "nova", "reply", "Tell me more").await;
        mock_agent(&mut server, "orion", "reply", "Gladly").await;

        orchestrator.start_date(match_id).await.unwrap();
        let result = orchestrator.continue_date(match_id, 2).await.unwrap();

        assert_eq!(result.round_name, "Going Deeper");
        let round = db.get_date_round(match_id, 2).await.unwrap().unwrap();
        let prompts = round.prompt.unwrap();
        assert!(prompts.a.starts_with("orion just said: \"I map constellations\""));
        assert!(prompts.b.starts_with("nova just said: \"I collect meteorites\""));
    }

    #[tokio::test]
    async fn test_continue_requires_previous_round() {
        let server = mockito::Server::new_async().await;
        let (_db, orchestrator, match_id) = setup(&server).await;

        let err = orchestrator.continue_date(match_id, 3).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::PreviousRoundMissing));

        let err = orchestrator.continue_date(match_id, 4).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::InvalidRound { round: 4, .. }));

        let err = orchestrator.continue_date(match_id, 1).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::InvalidRound { round: 1, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_agent_is_recorded() {
        let mut server = mockito::Server::new_async().await;
        let (db, orchestrator, match_id) = setup(&server).await;
        mock_agent(&mut server, "nova", "post", "").await;
        server
            .mock("POST", "/action")
            .match_body(Matcher::PartialJson(json!({ "agentUsername": "orion" })))
            .with_status(503)
            .create_async()
            .await;

        let result = orchestrator.start_date(match_id).await.unwrap();

        assert_eq!(result.agent_a.response.as_deref(), Some(""));
        assert_eq!(result.agent_b.response.as_deref(), Some(NO_AGENT_REPLY));

        let round = db.get_date_round(match_id, 1).await.unwrap().unwrap();
        assert_eq!(round.agent_a_response.as_deref(), Some(EMPTY_AGENT_REPLY));
        assert_eq!(round.agent_b_response.as_deref(), Some(NO_AGENT_REPLY));
    }

    #[tokio::test]
    async fn test_store_failure_marks_round_errored() {
        let mut server = mockito::Server::new_async().await;
        let (db, orchestrator, match_id) = setup(&server).await;
        mock_agent(&mut server, "nova", "post", "Hi Orion!").await;
        mock_agent(&mut server, "orion", "post", "Hello Nova.").await;

        // Reject reply writes; status-only updates still go through
        sqlx::query(
            r#"
            CREATE TRIGGER reject_replies BEFORE UPDATE OF agent_a_response ON dates
            BEGIN
                SELECT RAISE(ABORT, 'replies rejected');
            END
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = orchestrator.start_date(match_id).await.unwrap_err();
        let date_id = match &err {
            OrchestratorError::RoundFailed { date_id, .. } => *date_id,
            other => panic!("unexpected error: {other:?}"),
        };

        let round = db.get_date_round(match_id, 1).await.unwrap().unwrap();
        assert_eq!(round.id, date_id);
        assert_eq!(round.status, DateStatus::Error);
        assert_eq!(round.agent_a_response, None);

        let response = actix_web::ResponseError::error_response(&crate::routes::ApiError::from(err));
        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["dateId"], date_id);
    }

    #[tokio::test]
    async fn test_unknown_match() {
        let server = mockito::Server::new_async().await;
        let (_db, orchestrator, _) = setup(&server).await;

        let err = orchestrator.start_date(42).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::MatchNotFound(42)));
        assert!(orchestrator.date_history(42).await.is_err());
    }

    #[tokio::test]
    async fn test_rating_requires_participant() {
        let server = mockito::Server::new_async().await;
        let (_db, orchestrator, match_id) = setup(&server).await;

        let err = orchestrator
            .rate_date(match_id, "stranger", 5, false, None)
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::NotParticipant(_)));

        orchestrator
            .rate_date(match_id, "orion", 9, true, Some("Great chat"))
            .await
            .unwrap();

        let history = orchestrator.date_history(match_id).await.unwrap();
        assert_eq!(history.ratings.len(), 1);
        assert!(history.dates.is_empty());
    }
}
