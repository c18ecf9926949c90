use actix_web::{web, HttpResponse, Responder};
use validator::{Validate, ValidateEmail};
use crate::core::MatchOutcome;
use crate::models::{
    ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse, LikesQuery,
    LikesResponse, ProfileRecord, RecordSwipeRequest, RecordSwipeResponse, RejectionView,
    SaveProfileResponse, SimilarUser, SwipeDecision,
};
use crate::services::{MatchService, MatchServiceError, ProfileStore, StoreError};
use std::sync::Arc;

const NO_MATCHES_MESSAGE: &str = "No similar users found.";

/// Application state shared across all handlers
pub struct AppState<S: ProfileStore> {
    pub service: Arc<MatchService<S>>,
}

impl<S: ProfileStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Configure all profile, match and swipe routes
pub fn configure<S: ProfileStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check::<S>))
        .route("/profiles", web::put().to(save_profile::<S>))
        .route("/matches/find", web::post().to(find_matches::<S>))
        .route("/swipes", web::post().to(record_swipe::<S>))
        .route("/swipes", web::get().to(liked_emails::<S>));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Map a service failure to its HTTP response
fn service_error_response(e: &MatchServiceError) -> HttpResponse {
    use actix_web::http::StatusCode;

    match e {
        MatchServiceError::Store(StoreError::NotFound(what)) => {
            error_response(StatusCode::NOT_FOUND, "Profile not found", format!("No profile for {}", what))
        }
        MatchServiceError::Store(StoreError::DuplicateSwipe { .. }) => {
            error_response(StatusCode::CONFLICT, "Duplicate swipe", e.to_string())
        }
        MatchServiceError::UnsupportedDecision => {
            error_response(StatusCode::BAD_REQUEST, "Unsupported decision", e.to_string())
        }
        MatchServiceError::InvalidProfile(_) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, "Invalid profile", e.to_string())
        }
        MatchServiceError::Store(_) => {
            // Storage details stay in the logs
            tracing::error!("Storage failure: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
                "An internal error occurred".to_string(),
            )
        }
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    error_response(
        actix_web::http::StatusCode::BAD_REQUEST,
        "Validation failed",
        errors.to_string(),
    )
}

/// Health check endpoint
async fn health_check<S: ProfileStore + 'static>(state: web::Data<AppState<S>>) -> impl Responder {
    let store_healthy = state.service.store().is_healthy().await;

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Create or replace a profile
///
/// PUT /api/v1/profiles
async fn save_profile<S: ProfileStore + 'static>(
    state: web::Data<AppState<S>>,
    record: web::Json<ProfileRecord>,
) -> impl Responder {
    if !record.email.validate_email() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            format!("Invalid email: {}", record.email),
        );
    }

    match state.service.save_profile(&record).await {
        Ok(()) => HttpResponse::Ok().json(SaveProfileResponse {
            email: record.email.clone(),
            message: "Profile saved.".to_string(),
        }),
        Err(e) => service_error_response(&e),
    }
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// { "email": "string" }
/// ```
async fn find_matches<S: ProfileStore + 'static>(
    state: web::Data<AppState<S>>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return validation_failed(errors);
    }

    tracing::info!("Finding matches for {}", req.email);

    let outcome = match state.service.find_matches(&req.email).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Matching failed for {}: {}", req.email, e);
            return service_error_response(&e);
        }
    };

    let rejections: Vec<RejectionView> = outcome.rejections().iter().map(RejectionView::from).collect();

    match &outcome {
        MatchOutcome::NoSurvivors { total_candidates, .. } => {
            HttpResponse::NotFound().json(FindMatchesResponse {
                similar_users: vec![],
                message: NO_MATCHES_MESSAGE.to_string(),
                total_candidates: *total_candidates,
                rejected_count: rejections.len(),
                rejections,
            })
        }
        MatchOutcome::Ranked { matches, total_candidates, .. } => {
            let response = FindMatchesResponse {
                similar_users: matches.iter().map(SimilarUser::from).collect(),
                message: format!("Found {} similar users.", matches.len()),
                total_candidates: *total_candidates,
                rejected_count: rejections.len(),
                rejections,
            };

            tracing::info!(
                "Returning {} matches for {} (from {} candidates)",
                response.similar_users.len(),
                req.email,
                total_candidates
            );

            HttpResponse::Ok().json(response)
        }
    }
}

/// Record swipe endpoint
///
/// POST /api/v1/swipes
///
/// Request body:
/// ```json
/// {
///   "swipedByEmail": "string",
///   "swipedUserEmail": "string",
///   "decision": "yes"
/// }
/// ```
async fn record_swipe<S: ProfileStore + 'static>(
    state: web::Data<AppState<S>>,
    req: web::Json<RecordSwipeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let decision = match req.decision.parse::<SwipeDecision>() {
        Ok(decision) => decision,
        Err(message) => {
            return error_response(
                actix_web::http::StatusCode::BAD_REQUEST,
                "Invalid decision",
                message,
            );
        }
    };

    match state
        .service
        .record_swipe(&req.swiped_by_email, &req.swiped_user_email, decision)
        .await
    {
        Ok(()) => HttpResponse::Created().json(RecordSwipeResponse {
            success: true,
            message: "Swipe recorded successfully.".to_string(),
            request_id: uuid::Uuid::new_v4().to_string(),
        }),
        Err(e) => {
            tracing::debug!(
                "Swipe {} -> {} not recorded: {}",
                req.swiped_by_email,
                req.swiped_user_email,
                e
            );
            service_error_response(&e)
        }
    }
}

/// List likes for a user
///
/// GET /api/v1/swipes?email={email}
async fn liked_emails<S: ProfileStore + 'static>(
    state: web::Data<AppState<S>>,
    query: web::Query<LikesQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    match state.service.liked_emails(&query.email).await {
        Ok(liked_emails) => HttpResponse::Ok().json(LikesResponse {
            email: query.email.clone(),
            count: liked_emails.len(),
            liked_emails,
        }),
        Err(e) => service_error_response(&e),
    }
}
