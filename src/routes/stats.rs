use actix_web::{web, HttpResponse, Responder};

use crate::core::ARCHETYPES;
use crate::models::{ArchetypeInfo, HealthResponse};
use crate::routes::{ApiError, AppState};
use crate::services::LEADERBOARD_SIZE;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/leaderboard", web::get().to(leaderboard))
        .route("/archetypes", web::get().to(archetypes))
        .route("/stats", web::get().to(stats));
}

/// Health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.db.health_check().await.unwrap_or(false);

    let status = if db_healthy { "ok" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        app: "mesh".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Top matches by compatibility
async fn leaderboard(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let entries = state.db.leaderboard(LEADERBOARD_SIZE).await?;
    Ok(HttpResponse::Ok().json(entries))
}

async fn archetypes() -> HttpResponse {
    let catalogue: Vec<ArchetypeInfo> = ARCHETYPES
        .iter()
        .map(|a| ArchetypeInfo {
            name: a.name,
            description: a.description,
            ideal_matches: a.ideal_matches,
        })
        .collect();

    HttpResponse::Ok().json(catalogue)
}

async fn stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let stats = state.db.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}
