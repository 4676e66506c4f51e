use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use mesh_matchmaker::config::Settings;
use mesh_matchmaker::core::Matcher;
use mesh_matchmaker::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use mesh_matchmaker::services::{AgentActionClient, Database, DateOrchestrator};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| io_error("Configuration error", e))?;

    // Initialize logging; RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Mesh matchmaking service...");
    info!("Configuration loaded successfully");

    let db = Arc::new(
        Database::from_settings(&settings.database)
            .await
            .map_err(|e| io_error("Database error", e))?,
    );

    info!("Database ready at {}", settings.database.url);

    let agents = Arc::new(
        AgentActionClient::from_settings(&settings.agent_api)
            .map_err(|e| io_error("Agent API client error", e))?,
    );

    info!(
        "Agent actions relayed through {} (experience {})",
        settings.agent_api.action_url, settings.agent_api.experience_id
    );

    let orchestrator = Arc::new(DateOrchestrator::new(db.clone(), agents));

    // Initialize matcher with configured weights
    let weights = settings.scoring_weights();
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        db,
        orchestrator,
        matcher,
        matching: settings.matching.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Mesh is live on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
