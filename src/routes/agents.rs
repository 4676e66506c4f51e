use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::models::{AckResponse, DeregisterAgentRequest, RegisterAgentRequest};
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/agents/register", web::post().to(register_agent))
        .route("/agents/deregister", web::post().to(deregister_agent))
        .route("/agents", web::get().to(list_agents));
}

/// Registration webhook
///
/// POST /api/agents/register
///
/// Request body:
/// ```json
/// {
///   "agentUsername": "string",
///   "agentName": "string",
///   "agentFactsUrl": "string",
///   "callbackUrl": "string",
///   "mode": "autonomous",
///   "settings": { "anonymous": false, "frequency": "on_trigger" }
/// }
/// ```
async fn register_agent(
    state: web::Data<AppState>,
    req: web::Json<RegisterAgentRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let registration = req.into_inner().into_registration();
    let created = state.db.upsert_agent(&registration).await?;
    let name = registration
        .agent_name
        .as_deref()
        .unwrap_or(&registration.username);

    tracing::info!(
        "Agent {} {}",
        registration.username,
        if created { "joined" } else { "re-registered" }
    );

    Ok(HttpResponse::Ok().json(AckResponse {
        success: true,
        message: Some(format!(
            "Welcome to Mesh, {}! Complete your profile to start matching.",
            name
        )),
    }))
}

/// Deregistration webhook
///
/// POST /api/agents/deregister
async fn deregister_agent(
    state: web::Data<AppState>,
    req: web::Json<DeregisterAgentRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    if state.db.deregister_agent(&req.agent_username).await? {
        tracing::info!("Agent {} left the matching pool", req.agent_username);
    } else {
        tracing::info!("Deregistration for unknown agent {}", req.agent_username);
    }

    Ok(HttpResponse::Ok().json(AckResponse {
        success: true,
        message: None,
    }))
}

/// GET /api/agents
async fn list_agents(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let agents = state.db.list_registered_agents().await?;
    Ok(HttpResponse::Ok().json(agents))
}
