use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::{FactorWeights, MatchType, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub agent_api: AgentApiSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

/// Experience platform endpoint that relays prompts to agents
#[derive(Debug, Clone, Deserialize)]
pub struct AgentApiSettings {
    pub action_url: String,
    pub experience_id: String,
    pub api_key: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_match_type")]
    pub default_match_type: MatchType,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            default_match_type: default_match_type(),
        }
    }
}

fn default_limit() -> usize { crate::core::DEFAULT_MATCH_LIMIT }
fn default_max_limit() -> usize { 50 }
fn default_match_type() -> MatchType { MatchType::Romance }

/// Factor weights per category; omitted categories keep the built-in tables
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "FactorWeights::romance")]
    pub romance: FactorWeights,
    #[serde(default = "FactorWeights::work")]
    pub work: FactorWeights,
    #[serde(default = "FactorWeights::friendship")]
    pub friendship: FactorWeights,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            romance: FactorWeights::romance(),
            work: FactorWeights::work(),
            friendship: FactorWeights::friendship(),
        }
    }
}

impl From<&ScoringSettings> for ScoringWeights {
    fn from(settings: &ScoringSettings) -> Self {
        Self {
            romance: settings.romance,
            work: settings.work,
            friendship: settings.friendship,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MESH__)
    /// 5. Legacy variables: DATABASE_URL, PORT, EXPERIENCE_ID, EXPERIENCE_API_KEY,
    ///    LOG_LEVEL, LOG_FORMAT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MESH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MESH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_legacy_env(settings)?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring)
    }
}

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

fn with_defaults(builder: Builder) -> Result<Builder, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3002)?
        .set_default("database.url", "sqlite://mesh.db")?
        .set_default("agent_api.action_url", "https://join39.com/api/agent-participations/action")?
        .set_default("agent_api.experience_id", "mesh")?
        .set_default("agent_api.api_key", "")
        .and_then(|builder| seed_weights(builder, "romance", &FactorWeights::romance()))
        .and_then(|builder| seed_weights(builder, "work", &FactorWeights::work()))
        .and_then(|builder| seed_weights(builder, "friendship", &FactorWeights::friendship()))
}

/// Seed each factor separately so overriding one keeps the rest of the table
fn seed_weights(builder: Builder, category: &str, weights: &FactorWeights) -> Result<Builder, ConfigError> {
    let factors = [
        ("archetype", weights.archetype),
        ("values", weights.values),
        ("communication", weights.communication),
        ("humor", weights.humor),
        ("energy", weights.energy),
        ("attachment", weights.attachment),
        ("work_style", weights.work_style),
        ("conflict", weights.conflict),
        ("interests", weights.interests),
        ("expertise", weights.expertise),
    ];

    factors.into_iter().try_fold(builder, |builder, (factor, weight)| {
        builder.set_default(format!("scoring.{}.{}", category, factor), weight)
    })
}

/// Honour the environment variable names the service has always been deployed with
fn apply_legacy_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("database.url", env::var("DATABASE_URL").ok()),
        ("server.port", env::var("PORT").ok()),
        ("agent_api.experience_id", env::var("EXPERIENCE_ID").ok()),
        ("agent_api.api_key", env::var("EXPERIENCE_API_KEY").ok()),
        ("logging.level", env::var("LOG_LEVEL").ok()),
        ("logging.format", env::var("LOG_FORMAT").ok()),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (key, value) in overrides {
        if let Some(value) = value {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_settings() {
        let scoring = ScoringSettings::default();
        assert_eq!(scoring.romance.archetype, 0.25);
        assert_eq!(scoring.work.work_style, 0.25);
        assert_eq!(scoring.friendship.humor, 0.25);
        assert_eq!(ScoringWeights::from(&scoring), ScoringWeights::default());
    }

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.default_limit, 5);
        assert_eq!(matching.max_limit, 50);
        assert_eq!(matching.default_match_type, MatchType::Romance);
    }

    #[test]
    fn test_defaults_deserialize_without_files() {
        let settings: Settings = with_defaults(Config::builder())
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 3002);
        assert_eq!(settings.database.url, "sqlite://mesh.db");
        assert_eq!(settings.agent_api.experience_id, "mesh");
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_partial_weight_override() {
        let settings: Settings = with_defaults(Config::builder())
            .unwrap()
            .set_override("scoring.work.expertise", 0.3)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let work = FactorWeights::work();
        assert_eq!(settings.scoring.work.expertise, 0.3);
        assert_eq!(settings.scoring.work.archetype, work.archetype);
        assert_eq!(settings.scoring.work.work_style, work.work_style);
        assert_eq!(settings.scoring.work.conflict, work.conflict);
        assert_eq!(settings.scoring.work.humor, 0.0);
        assert_eq!(settings.scoring.romance, FactorWeights::romance());
        assert_eq!(settings.scoring.friendship, FactorWeights::friendship());
    }
}
