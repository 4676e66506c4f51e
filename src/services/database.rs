use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseSettings;
use crate::models::{
    Agent, AgentRegistration, AgentSummary, CompatibilityBreakdown, DateRound, DateStatus,
    LeaderboardEntry, MatchRecord, MatchType, PlatformStats, Profile, ProfileField, Rating,
    RoundPrompts,
};

/// Number of matches shown on the public leaderboard
pub const LEADERBOARD_SIZE: i64 = 20;

/// Errors that can occur when interacting with SQLite
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Stored JSON is invalid: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// SQLite store for agents, profiles, matches, dates and ratings
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database file and run migrations
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await?;

        Self::migrate(pool).await
    }

    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, DatabaseError> {
        tracing::info!("Opening SQLite database at {}", settings.url);

        Self::connect(
            &settings.url,
            settings.max_connections.unwrap_or(5),
            settings.min_connections.unwrap_or(1),
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
        )
        .await
    }

    /// Private in-memory database, used by tests and benches.
    ///
    /// Every connection to `:memory:` is a separate database, so the pool
    /// holds exactly one connection for its whole lifetime.
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::migrate(pool).await
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(pool: SqlitePool) -> Result<Self, DatabaseError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    // ---- agents ----

    /// Register an agent, or refresh an existing registration.
    ///
    /// New agents get an empty profile. Returns `true` when the agent was created.
    /// The transaction opens with a write, so concurrent registrations of the
    /// same username serialize on SQLite's write lock instead of racing.
    pub async fn upsert_agent(&self, registration: &AgentRegistration) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO agents (username, agent_name, agent_facts_url, callback_url, mode, anonymous, frequency)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(username) DO NOTHING
            "#,
        )
        .bind(&registration.username)
        .bind(&registration.agent_name)
        .bind(&registration.agent_facts_url)
        .bind(&registration.callback_url)
        .bind(&registration.mode)
        .bind(registration.anonymous)
        .bind(&registration.frequency)
        .execute(&mut *tx)
        .await?;

        let created = inserted.rows_affected() > 0;

        if created {
            sqlx::query("INSERT INTO profiles (agent_username) VALUES (?) ON CONFLICT(agent_username) DO NOTHING")
                .bind(&registration.username)
                .execute(&mut *tx)
                .await?;
        } else {
            sqlx::query(
                r#"
                UPDATE agents
                SET agent_name = ?, agent_facts_url = ?, callback_url = ?, mode = ?,
                    anonymous = ?, frequency = ?, status = 'registered'
                WHERE username = ?
                "#,
            )
            .bind(&registration.agent_name)
            .bind(&registration.agent_facts_url)
            .bind(&registration.callback_url)
            .bind(&registration.mode)
            .bind(registration.anonymous)
            .bind(&registration.frequency)
            .bind(&registration.username)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!("Registered agent {} (created: {})", registration.username, created);

        Ok(created)
    }

    /// Mark an agent as deregistered. Returns `false` for unknown agents.
    pub async fn deregister_agent(&self, username: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE agents SET status = 'deregistered' WHERE username = ?")
            .bind(username)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get_agent(&self, username: &str) -> Result<Option<Agent>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM agents WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(agent_from_row))
    }

    /// Registered agents with their profile summary, complete profiles first
    pub async fn list_registered_agents(&self) -> Result<Vec<AgentSummary>, DatabaseError> {
        let query = r#"
            SELECT a.username, a.agent_name, a.status, p.archetype, p.bio, p.match_types, p.profile_complete
            FROM agents a
            LEFT JOIN profiles p ON a.username = p.agent_username
            WHERE a.status = 'registered'
            ORDER BY p.profile_complete DESC, a.created_at DESC, a.id DESC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| AgentSummary {
                username: row.get("username"),
                agent_name: row.get("agent_name"),
                status: row.get("status"),
                archetype: row.get("archetype"),
                bio: row.get("bio"),
                match_types: row.get("match_types"),
                profile_complete: row.get("profile_complete"),
            })
            .collect())
    }

    // ---- profiles ----

    pub async fn get_profile(&self, username: &str) -> Result<Option<Profile>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM profiles WHERE agent_username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(profile_from_row))
    }

    /// Store answered fields with the derived archetype and bio, and mark the
    /// profile complete
    pub async fn update_profile(
        &self,
        username: &str,
        fields: &[(ProfileField, String)],
        archetype: &str,
        bio: &str,
    ) -> Result<(), DatabaseError> {
        if fields.is_empty() {
            return Err(DatabaseError::InvalidInput(
                "No valid profile fields provided".to_string(),
            ));
        }

        let mut assignments: Vec<String> = fields
            .iter()
            .map(|(field, _)| format!("{} = ?", field.column()))
            .collect();
        assignments.extend([
            "archetype = ?".to_string(),
            "bio = ?".to_string(),
            "profile_complete = 1".to_string(),
            "updated_at = CURRENT_TIMESTAMP".to_string(),
        ]);

        let sql = format!(
            "UPDATE profiles SET {} WHERE agent_username = ?",
            assignments.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for (_, value) in fields {
            query = query.bind(value.as_str());
        }

        let result = query
            .bind(archetype)
            .bind(bio)
            .bind(username)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("profile for {}", username)));
        }

        Ok(())
    }

    /// The matching pool: complete profiles of registered agents
    pub async fn complete_profiles(&self) -> Result<Vec<Profile>, DatabaseError> {
        let query = r#"
            SELECT p.*
            FROM profiles p
            JOIN agents a ON a.username = p.agent_username
            WHERE p.profile_complete = 1 AND a.status = 'registered'
            ORDER BY p.id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(profile_from_row).collect())
    }

    // ---- matches ----

    pub async fn create_match(
        &self,
        agent_a: &str,
        agent_b: &str,
        match_type: MatchType,
        score: f64,
        breakdown: &CompatibilityBreakdown,
    ) -> Result<i64, DatabaseError> {
        let breakdown_json = serde_json::to_string(breakdown)?;

        let result = sqlx::query(
            r#"
            INSERT INTO matches (agent_a, agent_b, match_type, compatibility_score, compatibility_breakdown, status)
            VALUES (?, ?, ?, ?, ?, 'matched')
            "#,
        )
        .bind(agent_a)
        .bind(agent_b)
        .bind(match_type)
        .bind(score)
        .bind(breakdown_json)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_match(&self, match_id: i64) -> Result<Option<MatchRecord>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM matches WHERE id = ?")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(match_from_row).transpose()
    }

    /// Highest scoring matches with both agents' names and archetypes
    pub async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, DatabaseError> {
        let query = r#"
            SELECT m.*, a1.agent_name AS name_a, a2.agent_name AS name_b,
                   p1.archetype AS archetype_a, p2.archetype AS archetype_b
            FROM matches m
            JOIN agents a1 ON m.agent_a = a1.username
            JOIN agents a2 ON m.agent_b = a2.username
            LEFT JOIN profiles p1 ON m.agent_a = p1.agent_username
            LEFT JOIN profiles p2 ON m.agent_b = p2.agent_username
            ORDER BY m.compatibility_score DESC
            LIMIT ?
        "#;

        let rows = sqlx::query(query).bind(limit).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| {
                Ok(LeaderboardEntry {
                    record: match_from_row(row)?,
                    name_a: row.get("name_a"),
                    name_b: row.get("name_b"),
                    archetype_a: row.get("archetype_a"),
                    archetype_b: row.get("archetype_b"),
                })
            })
            .collect()
    }

    // ---- dates ----

    /// Store a new round with its prompts, status `in_progress`
    pub async fn insert_date_round(
        &self,
        match_id: i64,
        round: u32,
        prompts: &RoundPrompts,
    ) -> Result<i64, DatabaseError> {
        let result = sqlx::query(
            "INSERT INTO dates (match_id, round, prompt, status) VALUES (?, ?, ?, ?)",
        )
        .bind(match_id)
        .bind(round)
        .bind(serde_json::to_string(prompts)?)
        .bind(DateStatus::InProgress)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn complete_date_round(
        &self,
        date_id: i64,
        agent_a_response: &str,
        agent_b_response: &str,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE dates SET agent_a_response = ?, agent_b_response = ?, status = ? WHERE id = ?",
        )
        .bind(agent_a_response)
        .bind(agent_b_response)
        .bind(DateStatus::Completed)
        .bind(date_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("date {}", date_id)));
        }

        Ok(())
    }

    pub async fn fail_date_round(&self, date_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE dates SET status = ? WHERE id = ?")
            .bind(DateStatus::Error)
            .bind(date_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Most recent attempt at a given round of a match
    pub async fn get_date_round(
        &self,
        match_id: i64,
        round: u32,
    ) -> Result<Option<DateRound>, DatabaseError> {
        let row = sqlx::query(
            "SELECT * FROM dates WHERE match_id = ? AND round = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(match_id)
        .bind(round)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(date_from_row).transpose()
    }

    pub async fn list_date_rounds(&self, match_id: i64) -> Result<Vec<DateRound>, DatabaseError> {
        let rows = sqlx::query("SELECT * FROM dates WHERE match_id = ? ORDER BY round, id")
            .bind(match_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(date_from_row).collect()
    }

    // ---- ratings ----

    pub async fn insert_rating(
        &self,
        match_id: i64,
        rater_username: &str,
        chemistry_score: u8,
        would_meet_again: bool,
        notes: Option<&str>,
    ) -> Result<i64, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO ratings (match_id, rater_username, chemistry_score, would_meet_again, notes)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(match_id)
        .bind(rater_username)
        .bind(chemistry_score)
        .bind(would_meet_again)
        .bind(notes)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn list_ratings(&self, match_id: i64) -> Result<Vec<Rating>, DatabaseError> {
        let rows = sqlx::query("SELECT * FROM ratings WHERE match_id = ? ORDER BY id")
            .bind(match_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| Rating {
                id: row.get("id"),
                match_id: row.get("match_id"),
                rater_username: row.get("rater_username"),
                chemistry_score: row.get("chemistry_score"),
                would_meet_again: row.get("would_meet_again"),
                notes: row.get("notes"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    // ---- stats ----

    pub async fn stats(&self) -> Result<PlatformStats, DatabaseError> {
        let query = r#"
            SELECT
                (SELECT COUNT(*) FROM agents WHERE status = 'registered') AS total_agents,
                (SELECT COUNT(*) FROM profiles WHERE profile_complete = 1) AS completed_profiles,
                (SELECT COUNT(*) FROM matches) AS total_matches,
                (SELECT COUNT(*) FROM dates WHERE status = 'completed') AS total_dates,
                (SELECT COUNT(*) FROM ratings) AS total_ratings
        "#;

        let row = sqlx::query(query).fetch_one(&self.pool).await?;

        Ok(PlatformStats {
            total_agents: row.get("total_agents"),
            completed_profiles: row.get("completed_profiles"),
            total_matches: row.get("total_matches"),
            total_dates: row.get("total_dates"),
            total_ratings: row.get("total_ratings"),
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, DatabaseError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn agent_from_row(row: &SqliteRow) -> Agent {
    Agent {
        id: row.get("id"),
        username: row.get("username"),
        agent_name: row.get("agent_name"),
        agent_facts_url: row.get("agent_facts_url"),
        callback_url: row.get("callback_url"),
        mode: row.get("mode"),
        anonymous: row.get("anonymous"),
        frequency: row.get("frequency"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

fn profile_from_row(row: &SqliteRow) -> Profile {
    Profile {
        agent_username: row.get("agent_username"),
        communication_style: row.get("communication_style"),
        values_priorities: row.get("values_priorities"),
        humor_style: row.get("humor_style"),
        interests: row.get("interests"),
        energy_level: row.get("energy_level"),
        conflict_style: row.get("conflict_style"),
        attachment_style: row.get("attachment_style"),
        work_style: row.get("work_style"),
        expertise: row.get("expertise"),
        dealbreakers: row.get("dealbreakers"),
        looking_for: row.get("looking_for"),
        match_types: row.get("match_types"),
        bio: row.get("bio"),
        archetype: row.get("archetype"),
        profile_complete: row.get("profile_complete"),
        updated_at: row.get("updated_at"),
    }
}

fn match_from_row(row: &SqliteRow) -> Result<MatchRecord, DatabaseError> {
    let breakdown: String = row.get("compatibility_breakdown");

    Ok(MatchRecord {
        id: row.get("id"),
        agent_a: row.get("agent_a"),
        agent_b: row.get("agent_b"),
        match_type: row.get("match_type"),
        compatibility_score: row.get("compatibility_score"),
        compatibility_breakdown: serde_json::from_str(&breakdown)?,
        status: row.get("status"),
        created_at: row.get("created_at"),
    })
}

fn date_from_row(row: &SqliteRow) -> Result<DateRound, DatabaseError> {
    let prompt: Option<String> = row.get("prompt");

    Ok(DateRound {
        id: row.get("id"),
        match_id: row.get("match_id"),
        round: row.get("round"),
        prompt: prompt.as_deref().map(serde_json::from_str).transpose()?,
        agent_a_response: row.get("agent_a_response"),
        agent_b_response: row.get("agent_b_response"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: &str, name: Option<&str>) -> AgentRegistration {
        AgentRegistration {
            username: username.to_string(),
            agent_name: name.map(str::to_string),
            mode: "autonomous".to_string(),
            frequency: "on_trigger".to_string(),
            ..Default::default()
        }
    }

    async fn seeded() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.upsert_agent(&registration("nova", Some("Nova"))).await.unwrap();
        db.upsert_agent(&registration("orion", None)).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_register_creates_empty_profile() {
        let db = Database::in_memory().await.unwrap();

        assert!(db.upsert_agent(&registration("nova", Some("Nova"))).await.unwrap());

        let profile = db.get_profile("nova").await.unwrap().unwrap();
        assert!(!profile.profile_complete);
        assert_eq!(profile.match_types, "romance,work,friendship");
    }

    #[tokio::test]
    async fn test_reregister_reactivates_agent() {
        let db = seeded().await;

        assert!(db.deregister_agent("nova").await.unwrap());
        let agent = db.get_agent("nova").await.unwrap().unwrap();
        assert_eq!(agent.status, crate::models::AgentStatus::Deregistered);

        let created = db.upsert_agent(&registration("nova", Some("Nova II"))).await.unwrap();
        assert!(!created);

        let agent = db.get_agent("nova").await.unwrap().unwrap();
        assert_eq!(agent.status, crate::models::AgentStatus::Registered);
        assert_eq!(agent.display_name(), "Nova II");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_of_same_agent() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("mesh.db").display());
        let db = std::sync::Arc::new(Database::connect(&url, 5, 1, Duration::from_secs(5)).await.unwrap());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { db.upsert_agent(&registration("nova", Some("Nova"))).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(db.list_registered_agents().await.unwrap().len(), 1);
        assert!(db.get_profile("nova").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_deregister_unknown_agent() {
        let db = Database::in_memory().await.unwrap();
        assert!(!db.deregister_agent("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_profile_marks_complete() {
        let db = seeded().await;

        db.update_profile(
            "nova",
            &[
                (ProfileField::CommunicationStyle, "warm,direct".to_string()),
                (ProfileField::MatchTypes, "work".to_string()),
            ],
            "The Empath",
            "A bio",
        )
        .await
        .unwrap();

        let profile = db.get_profile("nova").await.unwrap().unwrap();
        assert!(profile.profile_complete);
        assert_eq!(profile.communication_style.as_deref(), Some("warm,direct"));
        assert_eq!(profile.match_types, "work");
        assert_eq!(profile.archetype.as_deref(), Some("The Empath"));

        let pool = db.complete_profiles().await.unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].agent_username, "nova");

        // Deregistered agents leave the pool
        db.deregister_agent("nova").await.unwrap();
        assert!(db.complete_profiles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_profile_requires_fields() {
        let db = seeded().await;
        let result = db.update_profile("nova", &[], "The Empath", "bio").await;
        assert!(matches!(result, Err(DatabaseError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_list_agents_complete_first() {
        let db = seeded().await;
        db.update_profile("orion", &[(ProfileField::Interests, "stars".to_string())], "The Explorer", "bio")
            .await
            .unwrap();

        let agents = db.list_registered_agents().await.unwrap();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].username, "orion");
        assert_eq!(agents[0].profile_complete, Some(true));
    }

    #[tokio::test]
    async fn test_match_and_leaderboard() {
        let db = seeded().await;
        let low = db
            .create_match("nova", "orion", MatchType::Work, 0.4, &CompatibilityBreakdown::default())
            .await
            .unwrap();
        let high = db
            .create_match("orion", "nova", MatchType::Romance, 0.9, &CompatibilityBreakdown::default())
            .await
            .unwrap();

        let record = db.get_match(low).await.unwrap().unwrap();
        assert_eq!(record.match_type, MatchType::Work);
        assert_eq!(record.status, "matched");

        let board = db.leaderboard(LEADERBOARD_SIZE).await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].record.id, high);
        assert_eq!(board[0].name_b.as_deref(), Some("Nova"));

        assert!(db.get_match(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_date_round_lifecycle() {
        let db = seeded().await;
        let match_id = db
            .create_match("nova", "orion", MatchType::Friendship, 0.7, &CompatibilityBreakdown::default())
            .await
            .unwrap();

        let prompts = RoundPrompts { a: "hi orion".to_string(), b: "hi nova".to_string() };
        let date_id = db.insert_date_round(match_id, 1, &prompts).await.unwrap();

        let round = db.get_date_round(match_id, 1).await.unwrap().unwrap();
        assert_eq!(round.status, DateStatus::InProgress);
        assert_eq!(round.prompt, Some(prompts));

        db.complete_date_round(date_id, "hello", "hey").await.unwrap();
        let round = db.get_date_round(match_id, 1).await.unwrap().unwrap();
        assert_eq!(round.status, DateStatus::Completed);
        assert_eq!(round.agent_b_response.as_deref(), Some("hey"));

        let second = db
            .insert_date_round(match_id, 2, &RoundPrompts { a: "a".into(), b: "b".into() })
            .await
            .unwrap();
        db.fail_date_round(second).await.unwrap();

        let rounds = db.list_date_rounds(match_id).await.unwrap();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[1].status, DateStatus::Error);

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.total_dates, 1);
        assert_eq!(stats.total_matches, 1);
    }

    #[tokio::test]
    async fn test_ratings() {
        let db = seeded().await;
        let match_id = db
            .create_match("nova", "orion", MatchType::Romance, 0.7, &CompatibilityBreakdown::default())
            .await
            .unwrap();

        db.insert_rating(match_id, "nova", 8, true, Some("lovely")).await.unwrap();

        let ratings = db.list_ratings(match_id).await.unwrap();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].chemistry_score, 8);
        assert!(ratings[0].would_meet_again);
        assert_eq!(db.stats().await.unwrap().total_ratings, 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.health_check().await.unwrap());
    }
}
