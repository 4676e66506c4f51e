// Route exports
pub mod agents;
pub mod dates;
pub mod error;
pub mod matches;
pub mod profiles;
pub mod stats;

use actix_web::web;
use std::sync::Arc;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::services::{Database, DateOrchestrator};

pub use error::{handle_json_payload_error, handle_query_payload_error, ApiError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub orchestrator: Arc<DateOrchestrator>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(stats::health_check))
        .service(
            web::scope("/api")
                .configure(agents::configure)
                .configure(profiles::configure)
                .configure(matches::configure)
                .configure(dates::configure)
                .configure(stats::configure),
        );
}
