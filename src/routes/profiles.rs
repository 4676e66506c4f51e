use actix_web::{web, HttpResponse};

use crate::core::archetype::{determine_archetype, generate_bio};
use crate::core::interview::{interview_questions, questions_json};
use crate::models::{
    AgentStatus, InterviewQuery, Profile, ProfileAnswers, ProfileUpdateResponse, PublicProfile,
    PublicProfileResponse,
};
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/interview", web::get().to(get_interview))
        .route("/profile/{username}", web::post().to(update_profile))
        .route("/profile/{username}", web::get().to(get_profile));
}

/// GET /api/interview?category=humor_style
async fn get_interview(query: web::Query<InterviewQuery>) -> HttpResponse {
    let questions = interview_questions(query.category.as_deref());
    HttpResponse::Ok().json(questions_json(&questions))
}

/// Submit interview answers
///
/// POST /api/profile/{username}
///
/// Any subset of the profile fields may be sent; list answers may be JSON
/// arrays or comma-separated strings. The archetype and bio are recomputed
/// from the stored profile merged with the new answers.
async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    answers: web::Json<ProfileAnswers>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();

    let registered = state
        .db
        .get_agent(&username)
        .await?
        .filter(|agent| agent.status == AgentStatus::Registered);
    if registered.is_none() {
        return Err(ApiError::NotFound("Agent not found or not registered".to_string()));
    }

    let fields = answers.into_inner().into_fields();
    if fields.is_empty() {
        return Err(ApiError::bad_request("No valid profile fields provided"));
    }

    let mut merged = state
        .db
        .get_profile(&username)
        .await?
        .unwrap_or_else(|| Profile::empty(username.as_str()));
    for (field, value) in &fields {
        merged.set_field(*field, value.clone());
    }

    let archetype = determine_archetype(&merged);
    let bio = generate_bio(&merged, archetype);

    state
        .db
        .update_profile(&username, &fields, archetype.name, &bio)
        .await?;

    tracing::info!("Profile for {} complete: {}", username, archetype.name);

    Ok(HttpResponse::Ok().json(ProfileUpdateResponse {
        success: true,
        archetype: archetype.name,
        archetype_description: archetype.description,
        ideal_matches: archetype.ideal_matches,
        bio,
        message: "Profile complete! You are now in the matching pool.".to_string(),
    }))
}

/// GET /api/profile/{username}
async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();

    let agent = state.db.get_agent(&username).await?;
    let profile = state.db.get_profile(&username).await?;

    let (agent, profile) = match (agent, profile) {
        (Some(agent), Some(profile)) => (agent, profile),
        _ => return Err(ApiError::NotFound("Agent not found".to_string())),
    };

    Ok(HttpResponse::Ok().json(PublicProfileResponse {
        username: agent.username,
        name: agent.agent_name,
        status: agent.status,
        profile: PublicProfile {
            archetype: profile.archetype,
            bio: profile.bio,
            communication_style: profile.communication_style,
            values: profile.values_priorities,
            humor: profile.humor_style,
            interests: profile.interests,
            energy: profile.energy_level,
            match_types: profile.match_types,
            complete: profile.profile_complete,
        },
    }))
}
