use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::store::{ApplicationStore, InterviewStore, JobStore, UserStore};
use crate::workflows::{actor_id, WorkflowError};

use super::service::{
    CompleteInterviewRequest, InterviewResponseRequest, InterviewWorkflow,
    ScheduleInterviewRequest, UpdateInterviewRequest,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RangeParams {
    pub(crate) start: DateTime<Utc>,
    pub(crate) end: DateTime<Utc>,
}

/// HTTP surface for the interview lifecycle.
pub fn interview_router<I, A, J, U>(service: Arc<InterviewWorkflow<I, A, J, U>>) -> Router
where
    I: InterviewStore + 'static,
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    Router::new()
        .route("/api/v1/interviews", post(schedule_handler::<I, A, J, U>))
        .route(
            "/api/v1/interviews/mine",
            get(list_mine_handler::<I, A, J, U>),
        )
        .route(
            "/api/v1/interviews/recruiter",
            get(list_recruiter_handler::<I, A, J, U>),
        )
        .route(
            "/api/v1/interviews/range",
            get(list_range_handler::<I, A, J, U>),
        )
        .route(
            "/api/v1/interviews/:id",
            get(get_handler::<I, A, J, U>).put(update_handler::<I, A, J, U>),
        )
        .route(
            "/api/v1/interviews/:id/complete",
            post(complete_handler::<I, A, J, U>),
        )
        .route(
            "/api/v1/interviews/:id/respond",
            put(respond_handler::<I, A, J, U>),
        )
        .with_state(service)
}

async fn schedule_handler<I, A, J, U>(
    State(service): State<Arc<InterviewWorkflow<I, A, J, U>>>,
    headers: HeaderMap,
    Json(request): Json<ScheduleInterviewRequest>,
) -> Result<impl IntoResponse, WorkflowError>
where
    I: InterviewStore + 'static,
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    let actor = actor_id(&headers)?;
    let view = service.schedule(request, &actor)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update_handler<I, A, J, U>(
    State(service): State<Arc<InterviewWorkflow<I, A, J, U>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<UpdateInterviewRequest>,
) -> Result<impl IntoResponse, WorkflowError>
where
    I: InterviewStore + 'static,
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    let actor = actor_id(&headers)?;
    Ok(Json(service.update(&id, request, &actor)?))
}

async fn complete_handler<I, A, J, U>(
    State(service): State<Arc<InterviewWorkflow<I, A, J, U>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<CompleteInterviewRequest>,
) -> Result<impl IntoResponse, WorkflowError>
where
    I: InterviewStore + 'static,
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    let actor = actor_id(&headers)?;
    Ok(Json(service.complete(&id, request, &actor)?))
}

async fn respond_handler<I, A, J, U>(
    State(service): State<Arc<InterviewWorkflow<I, A, J, U>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<InterviewResponseRequest>,
) -> Result<impl IntoResponse, WorkflowError>
where
    I: InterviewStore + 'static,
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    let candidate = actor_id(&headers)?;
    Ok(Json(service.respond(&id, &candidate, request)?))
}

async fn get_handler<I, A, J, U>(
    State(service): State<Arc<InterviewWorkflow<I, A, J, U>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, WorkflowError>
where
    I: InterviewStore + 'static,
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    Ok(Json(service.get(&id)?))
}

async fn list_mine_handler<I, A, J, U>(
    State(service): State<Arc<InterviewWorkflow<I, A, J, U>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, WorkflowError>
where
    I: InterviewStore + 'static,
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    let candidate = actor_id(&headers)?;
    Ok(Json(service.list_by_candidate(&candidate)?))
}

async fn list_recruiter_handler<I, A, J, U>(
    State(service): State<Arc<InterviewWorkflow<I, A, J, U>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, WorkflowError>
where
    I: InterviewStore + 'static,
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    let recruiter = actor_id(&headers)?;
    Ok(Json(service.list_by_recruiter(&recruiter)?))
}

async fn list_range_handler<I, A, J, U>(
    State(service): State<Arc<InterviewWorkflow<I, A, J, U>>>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, WorkflowError>
where
    I: InterviewStore + 'static,
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    Ok(Json(service.list_between(params.start, params.end)?))
}
