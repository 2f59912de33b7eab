use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use stream_advisor::quiz::{
    quiz_router, ProfileStore, QuizRepository, ResultRepository, StreamAdvisorService,
};

pub(crate) fn with_quiz_routes<Q, R, P>(service: Arc<StreamAdvisorService<Q, R, P>>) -> axum::Router
where
    Q: QuizRepository + 'static,
    R: ResultRepository + 'static,
    P: ProfileStore + 'static,
{
    quiz_router(service)
        .route("/", get(index))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "service": "stream-advisor",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "quiz": {
                "getQuiz": "GET /api/quiz",
                "submitQuiz": "POST /api/quiz/submit",
                "getResults": "GET /api/quiz/results",
                "getRecommendation": "GET /api/quiz/recommendation"
            }
        }
    }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
