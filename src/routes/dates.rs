use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::models::{ContinueDateRequest, RateDateRequest, RatingResponse, StartDateRequest};
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dates/start", web::post().to(start_date))
        .route("/dates/continue", web::post().to(continue_date))
        .route("/dates/{match_id}", web::get().to(date_history))
        .route("/dates/{match_id}/ratings", web::post().to(rate_date));
}

/// Start a date: round 1 prompts are relayed to both agents
///
/// POST /api/dates/start
async fn start_date(
    state: web::Data<AppState>,
    req: web::Json<StartDateRequest>,
) -> Result<HttpResponse, ApiError> {
    let result = state.orchestrator.start_date(req.match_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// POST /api/dates/continue
async fn continue_date(
    state: web::Data<AppState>,
    req: web::Json<ContinueDateRequest>,
) -> Result<HttpResponse, ApiError> {
    let result = state
        .orchestrator
        .continue_date(req.match_id, req.round)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /api/dates/{match_id}
async fn date_history(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let history = state.orchestrator.date_history(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(history))
}

/// POST /api/dates/{match_id}/ratings
async fn rate_date(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<RateDateRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let rating_id = state
        .orchestrator
        .rate_date(
            path.into_inner(),
            &req.rater_username,
            req.chemistry_score,
            req.would_meet_again,
            req.notes.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(RatingResponse {
        success: true,
        rating_id,
    }))
}
