use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::models::{
    CreateMatchRequest, CreateMatchResponse, FindMatchesQuery, FindMatchesResponse,
    MatchCandidate, MatchType,
};
use crate::routes::{ApiError, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches/{username}", web::get().to(find_matches))
        .route("/matches", web::post().to(create_match));
}

fn parse_match_type(raw: Option<&str>, default: MatchType) -> Result<MatchType, ApiError> {
    match raw {
        Some(raw) => raw.parse().map_err(ApiError::bad_request),
        None => Ok(default),
    }
}

/// Find matches for an agent
///
/// GET /api/matches/{username}?type=romance&limit=5
///
/// Only agents with a complete profile can search. Candidates are complete,
/// registered profiles open to the same category, best score first.
async fn find_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<FindMatchesQuery>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let match_type = parse_match_type(query.match_type.as_deref(), state.matching.default_match_type)?;
    // Cap limit to keep responses small
    let limit = query
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit);

    let profile = state
        .db
        .get_profile(&username)
        .await?
        .filter(|profile| profile.profile_complete)
        .ok_or_else(|| ApiError::bad_request("Complete your profile first before matching"))?;

    let pool = state.db.complete_profiles().await?;

    tracing::info!(
        "Finding {} matches for {} (limit {}, pool {})",
        match_type,
        username,
        limit,
        pool.len()
    );

    let result = state.matcher.find_matches(&profile, &pool, match_type, limit);

    let mut matches = Vec::with_capacity(result.matches.len());
    for candidate in result.matches {
        let name = state
            .db
            .get_agent(&candidate.username)
            .await?
            .and_then(|agent| agent.agent_name);

        matches.push(MatchCandidate {
            username: candidate.username,
            name,
            archetype: candidate.archetype,
            compatibility_score: candidate.compatibility.percentage,
            breakdown: candidate.compatibility.breakdown,
            dealbreaker: candidate.compatibility.dealbreaker,
        });
    }

    tracing::debug!("Returning {} matches for {}", matches.len(), username);

    Ok(HttpResponse::Ok().json(FindMatchesResponse {
        username,
        match_type,
        archetype: profile.archetype,
        matches,
    }))
}

/// Create a match between two agents
///
/// POST /api/matches
///
/// Request body:
/// ```json
/// { "agent_a": "string", "agent_b": "string", "match_type": "romance|work|friendship" }
/// ```
async fn create_match(
    state: web::Data<AppState>,
    req: web::Json<CreateMatchRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_match request: {:?}", errors);
        return Err(ApiError::bad_request("agent_a, agent_b, and match_type are required"));
    }

    let match_type = parse_match_type(Some(req.match_type.as_str()), state.matching.default_match_type)?;

    let profile_a = state.db.get_profile(&req.agent_a).await?;
    let profile_b = state.db.get_profile(&req.agent_b).await?;
    let (profile_a, profile_b) = match (profile_a, profile_b) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(ApiError::NotFound("One or both agents not found".to_string())),
    };

    let compatibility = state.matcher.compatibility(&profile_a, &profile_b, match_type);

    let match_id = state
        .db
        .create_match(
            &req.agent_a,
            &req.agent_b,
            match_type,
            compatibility.score,
            &compatibility.breakdown,
        )
        .await?;

    tracing::info!(
        "Match {} created: {} + {} ({}%, {})",
        match_id,
        req.agent_a,
        req.agent_b,
        compatibility.percentage,
        match_type
    );

    let message = format!(
        "Match created! {} ({}) + {} ({}): {}% compatible for {}",
        req.agent_a,
        compatibility.archetype_a,
        req.agent_b,
        compatibility.archetype_b,
        compatibility.percentage,
        match_type
    );

    Ok(HttpResponse::Ok().json(CreateMatchResponse {
        success: true,
        match_id,
        compatibility: compatibility.percentage,
        archetype_a: compatibility.archetype_a,
        archetype_b: compatibility.archetype_b,
        breakdown: compatibility.breakdown,
        message,
    }))
}
