use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;

use hireflow::workflows::analytics::analytics_router;
use hireflow::workflows::applications::application_router;
use hireflow::workflows::interviews::interview_router;
use hireflow::workflows::jobs::job_router;
use hireflow::workflows::messaging::message_router;
use hireflow::workflows::PageDefaults;

use crate::infra::{AppState, Services};

/// Compose every workflow router with the operational endpoints.
pub(crate) fn api_routes(services: Services, page_defaults: PageDefaults) -> Router {
    job_router(services.jobs, page_defaults)
        .merge(application_router(services.applications, page_defaults))
        .merge(interview_router(services.interviews))
        .merge(analytics_router(services.analytics))
        .merge(message_router(services.messages))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
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
