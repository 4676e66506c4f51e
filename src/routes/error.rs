use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use std::fmt;

use crate::models::ErrorResponse;
use crate::services::{DatabaseError, OrchestratorError};

/// Error returned by every handler, rendered as an `ErrorResponse` body
#[derive(Debug)]
pub enum ApiError {
    BadRequest { error: &'static str, message: String },
    NotFound(String),
    Forbidden(String),
    Internal(String),
    /// A date round that was stored and then failed
    DateFailed { date_id: i64, message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            error: "bad_request",
            message: message.into(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { error, .. } => *error,
            ApiError::NotFound(_) => "not_found",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::Internal(_) | ApiError::DateFailed { .. } => "internal_error",
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest { message, .. }
            | ApiError::NotFound(message)
            | ApiError::Forbidden(message)
            | ApiError::Internal(message)
            | ApiError::DateFailed { message, .. } => message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ApiError {}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) | ApiError::DateFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let date_id = match self {
            ApiError::DateFailed { date_id, .. } => Some(*date_id),
            _ => None,
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.message().to_string(),
            status_code: status.as_u16(),
            date_id,
        })
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest {
            error: "validation_failed",
            message: errors.to_string(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(what) => ApiError::NotFound(format!("Not found: {}", what)),
            DatabaseError::InvalidInput(message) => ApiError::bad_request(message),
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(err: OrchestratorError) -> Self {
        match err {
            OrchestratorError::MatchNotFound(_) => ApiError::NotFound("Match not found".to_string()),
            OrchestratorError::ProfileNotFound(_) => ApiError::NotFound(err.to_string()),
            OrchestratorError::InvalidRound { .. } | OrchestratorError::PreviousRoundMissing => {
                ApiError::bad_request(err.to_string())
            }
            OrchestratorError::NotParticipant(_) => ApiError::Forbidden(err.to_string()),
            OrchestratorError::RoundFailed { date_id, .. } => ApiError::DateFailed {
                date_id,
                message: err.to_string(),
            },
            OrchestratorError::Database(db) => db.into(),
        }
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::BadRequest {
        error: "invalid_json",
        message: format!("Invalid JSON: {}", err),
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ApiError::BadRequest {
        error: "invalid_query",
        message: format!("Invalid query: {}", err),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_orchestrator_error_statuses() {
        let cases = [
            (OrchestratorError::MatchNotFound(1), StatusCode::NOT_FOUND),
            (OrchestratorError::PreviousRoundMissing, StatusCode::BAD_REQUEST),
            (OrchestratorError::InvalidRound { round: 9, max: 3 }, StatusCode::BAD_REQUEST),
            (OrchestratorError::NotParticipant("x".into()), StatusCode::FORBIDDEN),
            (
                OrchestratorError::RoundFailed {
                    date_id: 7,
                    source: DatabaseError::NotFound("date 7".into()),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[actix_web::test]
    async fn test_date_failure_carries_id() {
        let err = ApiError::DateFailed {
            date_id: 7,
            message: "boom".into(),
        };
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["dateId"], 7);
        assert_eq!(body["message"], "boom");
    }
}
