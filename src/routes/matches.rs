use crate::engine::{EngineError, MatchEngine, NextMatch};
use crate::models::{
    ErrorResponse, HealthResponse, NextMatchRequest, NextMatchResponse, SwipeDirection,
    SwipeRequest, SwipeResponse, UndoRequest,
};
use crate::services::SwipeStore;
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchEngine>,
    pub ledger: Arc<dyn SwipeStore>,
}

/// Configure all matching-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/next", web::post().to(next_match))
        .route("/swipes", web::post().to(swipe))
        .route("/swipes/undo", web::post().to(undo_swipe));
}

/// Map an engine error to its HTTP representation
fn engine_error_response(err: &EngineError) -> HttpResponse {
    let (status, error) = match err {
        EngineError::DependencyUnavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "dependency_unavailable")
        }
        EngineError::DuplicateSwipe => (StatusCode::CONFLICT, "duplicate_swipe"),
        EngineError::CandidateNotFound(_) => (StatusCode::NOT_FOUND, "candidate_not_found"),
        EngineError::InvalidTarget => (StatusCode::BAD_REQUEST, "invalid_target"),
        EngineError::NothingToUndo => (StatusCode::CONFLICT, "nothing_to_undo"),
    };

    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let ledger_healthy = state.ledger.health_check().await.unwrap_or(false);

    let status = if ledger_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Next candidate endpoint
///
/// POST /api/v1/matches/next
///
/// Request body:
/// ```json
/// { "userId": "string" }
/// ```
///
/// Retrying this call while a candidate is outstanding returns the same
/// candidate. An exhausted pool returns `exhausted: true`, not an error.
async fn next_match(
    state: web::Data<AppState>,
    req: web::Json<NextMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!("Serving next match for user: {}", req.user_id);

    match state.engine.get_next_match(&req.user_id).await {
        Ok(NextMatch::Candidate(profile)) => HttpResponse::Ok().json(NextMatchResponse {
            candidate: Some(profile),
            exhausted: false,
        }),
        Ok(NextMatch::Exhausted) => HttpResponse::Ok().json(NextMatchResponse {
            candidate: None,
            exhausted: true,
        }),
        Err(e) => {
            tracing::warn!("Failed to serve next match for {}: {}", req.user_id, e);
            engine_error_response(&e)
        }
    }
}

/// Swipe endpoint
///
/// POST /api/v1/swipes
///
/// Request body:
/// ```json
/// { "userId": "string", "targetId": "string", "direction": "right|left" }
/// ```
async fn swipe(state: web::Data<AppState>, req: web::Json<SwipeRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let direction = match req.direction.to_lowercase().as_str() {
        "right" => SwipeDirection::Right,
        "left" => SwipeDirection::Left,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid direction".to_string(),
                message: "Direction must be one of: right, left".to_string(),
                status_code: 400,
            });
        }
    };

    match state
        .engine
        .swipe(&req.user_id, &req.target_id, direction)
        .await
    {
        Ok(outcome) => {
            tracing::debug!(
                "Swipe committed: {} -> {} ({:?}, matched: {})",
                req.user_id,
                req.target_id,
                direction,
                outcome.matched
            );
            HttpResponse::Ok().json(SwipeResponse {
                accepted: outcome.accepted,
                matched: outcome.matched,
                match_id: outcome.match_id,
            })
        }
        Err(e) => {
            tracing::warn!(
                "Swipe rejected: {} -> {}: {}",
                req.user_id,
                req.target_id,
                e
            );
            engine_error_response(&e)
        }
    }
}

/// Undo endpoint
///
/// POST /api/v1/swipes/undo
///
/// Request body:
/// ```json
/// { "userId": "string" }
/// ```
///
/// Reverts the user's most recent swipe and re-serves that candidate.
async fn undo_swipe(state: web::Data<AppState>, req: web::Json<UndoRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.engine.undo_last_swipe(&req.user_id).await {
        Ok(profile) => HttpResponse::Ok().json(NextMatchResponse {
            candidate: Some(profile),
            exhausted: false,
        }),
        Err(e) => {
            tracing::debug!("Undo rejected for {}: {}", req.user_id, e);
            engine_error_response(&e)
        }
    }
}
