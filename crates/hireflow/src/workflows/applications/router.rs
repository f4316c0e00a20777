use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::domain::ApplicationStatus;
use crate::store::{ApplicationStore, JobStore, UserStore};
use crate::workflows::{actor_id, PageDefaults, PageParams, WorkflowError};

use super::service::{ApplicationRequest, ApplicationWorkflow};

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    pub(crate) status: ApplicationStatus,
}

/// HTTP surface for the application lifecycle.
pub fn application_router<A, J, U>(
    service: Arc<ApplicationWorkflow<A, J, U>>,
    defaults: PageDefaults,
) -> Router
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(create_handler::<A, J, U>))
        .route(
            "/api/v1/applications/mine",
            get(list_mine_handler::<A, J, U>),
        )
        .route(
            "/api/v1/applications/recruiter",
            get(list_recruiter_handler::<A, J, U>),
        )
        .route(
            "/api/v1/applications/job/:job_id",
            get(list_by_job_handler::<A, J, U>),
        )
        .route("/api/v1/applications/:id", get(get_handler::<A, J, U>))
        .route(
            "/api/v1/applications/:id/status",
            put(update_status_handler::<A, J, U>),
        )
        .with_state(service)
        .layer(Extension(defaults))
}

async fn create_handler<A, J, U>(
    State(service): State<Arc<ApplicationWorkflow<A, J, U>>>,
    headers: HeaderMap,
    Json(request): Json<ApplicationRequest>,
) -> Result<impl IntoResponse, WorkflowError>
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    let candidate = actor_id(&headers)?;
    let view = service.create(request, &candidate)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn list_mine_handler<A, J, U>(
    State(service): State<Arc<ApplicationWorkflow<A, J, U>>>,
    Extension(defaults): Extension<PageDefaults>,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, WorkflowError>
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    let candidate = actor_id(&headers)?;
    Ok(Json(
        service.list_by_candidate(&candidate, params.request(defaults))?,
    ))
}

async fn list_recruiter_handler<A, J, U>(
    State(service): State<Arc<ApplicationWorkflow<A, J, U>>>,
    Extension(defaults): Extension<PageDefaults>,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, WorkflowError>
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    let recruiter = actor_id(&headers)?;
    Ok(Json(
        service.list_by_recruiter(&recruiter, params.request(defaults))?,
    ))
}

async fn list_by_job_handler<A, J, U>(
    State(service): State<Arc<ApplicationWorkflow<A, J, U>>>,
    Extension(defaults): Extension<PageDefaults>,
    Path(job_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, WorkflowError>
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    Ok(Json(service.list_by_job(&job_id, params.request(defaults))?))
}

async fn get_handler<A, J, U>(
    State(service): State<Arc<ApplicationWorkflow<A, J, U>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, WorkflowError>
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    Ok(Json(service.get(&id)?))
}

async fn update_status_handler<A, J, U>(
    State(service): State<Arc<ApplicationWorkflow<A, J, U>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<impl IntoResponse, WorkflowError>
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    let recruiter = actor_id(&headers)?;
    Ok(Json(service.update_status(&id, request.status, &recruiter)?))
}
