use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::domain::UserId;
use super::repository::{ProfileStore, QuizRepository, ResultRepository};
use super::service::{QuizServiceError, StreamAdvisorService, SubmissionRequest};

/// Header carrying the identity established by the upstream authentication layer.
pub const USER_HEADER: &str = "x-user-id";

/// Router builder exposing the quiz retrieval, submission and history endpoints.
pub fn quiz_router<Q, R, P>(service: Arc<StreamAdvisorService<Q, R, P>>) -> Router
where
    Q: QuizRepository + 'static,
    R: ResultRepository + 'static,
    P: ProfileStore + 'static,
{
    Router::new()
        .route("/api/quiz", get(active_quiz_handler::<Q, R, P>))
        .route("/api/quiz/submit", post(submit_handler::<Q, R, P>))
        .route("/api/quiz/results", get(results_handler::<Q, R, P>))
        .route(
            "/api/quiz/recommendation",
            get(recommendation_handler::<Q, R, P>),
        )
        .with_state(service)
}

pub(crate) fn user_from_headers(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| UserId(value.to_string()))
}

pub(crate) async fn active_quiz_handler<Q, R, P>(
    State(service): State<Arc<StreamAdvisorService<Q, R, P>>>,
) -> Response
where
    Q: QuizRepository + 'static,
    R: ResultRepository + 'static,
    P: ProfileStore + 'static,
{
    match service.active_quiz() {
        Ok(quiz) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": quiz })),
        )
            .into_response(),
        Err(err) => error_response(err, "Server error retrieving quiz"),
    }
}

pub(crate) async fn submit_handler<Q, R, P>(
    State(service): State<Arc<StreamAdvisorService<Q, R, P>>>,
    headers: HeaderMap,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Response
where
    Q: QuizRepository + 'static,
    R: ResultRepository + 'static,
    P: ProfileStore + 'static,
{
    let user_id = user_from_headers(&headers);
    let request = match payload {
        Ok(Json(request)) => request,
        // Identity is checked before the body, matching the service's own ordering.
        Err(_) if user_id.is_none() => {
            return error_response(QuizServiceError::Unauthenticated, "");
        }
        Err(rejection) => {
            return error_response(
                QuizServiceError::Validation(rejection.body_text()),
                "",
            );
        }
    };

    match service.submit(user_id, request) {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": "Quiz submitted successfully and recommendations computed",
                "data": receipt,
            })),
        )
            .into_response(),
        Err(err) => error_response(err, "Server error processing quiz submission"),
    }
}

pub(crate) async fn results_handler<Q, R, P>(
    State(service): State<Arc<StreamAdvisorService<Q, R, P>>>,
    headers: HeaderMap,
) -> Response
where
    Q: QuizRepository + 'static,
    R: ResultRepository + 'static,
    P: ProfileStore + 'static,
{
    let Some(user_id) = user_from_headers(&headers) else {
        return error_response(QuizServiceError::Unauthenticated, "");
    };

    match service.results_overview(&user_id) {
        Ok(results) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "count": results.len(),
                "data": results,
            })),
        )
            .into_response(),
        Err(err) => error_response(err, "Server error retrieving quiz results"),
    }
}

pub(crate) async fn recommendation_handler<Q, R, P>(
    State(service): State<Arc<StreamAdvisorService<Q, R, P>>>,
    headers: HeaderMap,
) -> Response
where
    Q: QuizRepository + 'static,
    R: ResultRepository + 'static,
    P: ProfileStore + 'static,
{
    let Some(user_id) = user_from_headers(&headers) else {
        return error_response(QuizServiceError::Unauthenticated, "");
    };

    match service.latest_recommendation(&user_id) {
        Ok(latest) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": latest })),
        )
            .into_response(),
        Err(err) => error_response(err, "Server error retrieving recommendation"),
    }
}

/// Maps service failures onto status codes. Internal failures are logged and replaced by
/// `internal_message` so storage or engine details never reach the client.
fn error_response(err: QuizServiceError, internal_message: &str) -> Response {
    let (status, message) = match &err {
        QuizServiceError::Unauthenticated => (
            StatusCode::UNAUTHORIZED,
            "Not authorized, user identity missing".to_string(),
        ),
        QuizServiceError::Validation(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
        QuizServiceError::NoActiveQuiz => {
            (StatusCode::NOT_FOUND, "No active quiz found".to_string())
        }
        QuizServiceError::QuizNotFound(_) => {
            (StatusCode::NOT_FOUND, "Quiz not found".to_string())
        }
        QuizServiceError::AlreadySubmitted { .. } => (
            StatusCode::CONFLICT,
            "Quiz already completed by this user".to_string(),
        ),
        QuizServiceError::NoResults => (
            StatusCode::NOT_FOUND,
            "No quiz results found for this user".to_string(),
        ),
        QuizServiceError::Engine(_) | QuizServiceError::Repository(_) => {
            error!(error = %err, "quiz request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                internal_message.to_string(),
            )
        }
    };

    (
        status,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}
