use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::domain::JobStatus;
use crate::store::{ApplicationStore, JobSearch, JobStore, PageRequest, UserStore};
use crate::workflows::{actor_id, PageDefaults, PageParams, WorkflowError};

use super::service::{JobRequest, JobWorkflow};

#[derive(Debug, Deserialize)]
pub(crate) struct JobSearchParams {
    pub(crate) title: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) status: Option<JobStatus>,
    #[serde(default)]
    pub(crate) page: usize,
    #[serde(default)]
    pub(crate) size: Option<usize>,
}

/// HTTP surface for the job lifecycle. Actor identity arrives as `x-user-id`.
pub fn job_router<J, A, U>(service: Arc<JobWorkflow<J, A, U>>, defaults: PageDefaults) -> Router
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    U: UserStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            post(create_handler::<J, A, U>).get(list_published_handler::<J, A, U>),
        )
        .route("/api/v1/jobs/search", get(search_handler::<J, A, U>))
        .route("/api/v1/jobs/mine", get(list_mine_handler::<J, A, U>))
        .route(
            "/api/v1/jobs/:id",
            get(get_handler::<J, A, U>)
                .put(update_handler::<J, A, U>)
                .delete(delete_handler::<J, A, U>),
        )
        .route("/api/v1/jobs/:id/publish", post(publish_handler::<J, A, U>))
        .route("/api/v1/jobs/:id/close", post(close_handler::<J, A, U>))
        .with_state(service)
        .layer(Extension(defaults))
}

async fn create_handler<J, A, U>(
    State(service): State<Arc<JobWorkflow<J, A, U>>>,
    headers: HeaderMap,
    Json(request): Json<JobRequest>,
) -> Result<impl IntoResponse, WorkflowError>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    U: UserStore + 'static,
{
    let recruiter = actor_id(&headers)?;
    let view = service.create(request, &recruiter)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn list_published_handler<J, A, U>(
    State(service): State<Arc<JobWorkflow<J, A, U>>>,
    Extension(defaults): Extension<PageDefaults>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, WorkflowError>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    U: UserStore + 'static,
{
    let page = service.list_published(params.request(defaults))?;
    Ok(Json(page))
}

async fn search_handler<J, A, U>(
    State(service): State<Arc<JobWorkflow<J, A, U>>>,
    Extension(defaults): Extension<PageDefaults>,
    Query(params): Query<JobSearchParams>,
) -> Result<impl IntoResponse, WorkflowError>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    U: UserStore + 'static,
{
    let filter = JobSearch {
        title: params.title,
        location: params.location,
        status: params.status,
    };
    let size = params.size.unwrap_or(defaults.size).max(1);
    let page = service.search(&filter, PageRequest::new(params.page, size))?;
    Ok(Json(page))
}

async fn list_mine_handler<J, A, U>(
    State(service): State<Arc<JobWorkflow<J, A, U>>>,
    Extension(defaults): Extension<PageDefaults>,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, WorkflowError>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    U: UserStore + 'static,
{
    let recruiter = actor_id(&headers)?;
    let page = service.list_by_recruiter(&recruiter, params.request(defaults))?;
    Ok(Json(page))
}

async fn get_handler<J, A, U>(
    State(service): State<Arc<JobWorkflow<J, A, U>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, WorkflowError>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    U: UserStore + 'static,
{
    Ok(Json(service.get(&id)?))
}

async fn update_handler<J, A, U>(
    State(service): State<Arc<JobWorkflow<J, A, U>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<JobRequest>,
) -> Result<impl IntoResponse, WorkflowError>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    U: UserStore + 'static,
{
    let recruiter = actor_id(&headers)?;
    Ok(Json(service.update(&id, request, &recruiter)?))
}

async fn delete_handler<J, A, U>(
    State(service): State<Arc<JobWorkflow<J, A, U>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, WorkflowError>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    U: UserStore + 'static,
{
    let recruiter = actor_id(&headers)?;
    service.delete(&id, &recruiter)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn publish_handler<J, A, U>(
    State(service): State<Arc<JobWorkflow<J, A, U>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, WorkflowError>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    U: UserStore + 'static,
{
    let recruiter = actor_id(&headers)?;
    Ok(Json(service.publish(&id, &recruiter)?))
}

async fn close_handler<J, A, U>(
    State(service): State<Arc<JobWorkflow<J, A, U>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, WorkflowError>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    U: UserStore + 'static,
{
    let recruiter = actor_id(&headers)?;
    Ok(Json(service.close(&id, &recruiter)?))
}
