//! Lifecycle managers for the recruitment entities plus the read-only
//! analytics reduction. Each workflow owns the writes to its entity; nothing
//! here mutates more than one entity per operation.

pub mod analytics;
pub mod applications;
pub mod interviews;
pub mod jobs;
pub mod messaging;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::store::{PageRequest, StoreError};

/// Failure taxonomy shared by every workflow operation. Preconditions are
/// validated before any write, so an error response implies no mutation.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("{0}")]
    InvalidState(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WorkflowError {
    fn status_code(&self) -> StatusCode {
        match self {
            WorkflowError::NotFound(_) => StatusCode::NOT_FOUND,
            WorkflowError::Unauthorized(_) => StatusCode::FORBIDDEN,
            WorkflowError::Conflict(_) => StatusCode::CONFLICT,
            WorkflowError::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WorkflowError::Validation(_) => StatusCode::BAD_REQUEST,
            WorkflowError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WorkflowError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

/// Header carrying the already-authenticated actor identity. Token validation
/// happens upstream; the workflows only consume the resolved id.
pub const ACTOR_HEADER: &str = "x-user-id";

pub(crate) fn actor_id(headers: &HeaderMap) -> Result<String, WorkflowError> {
    headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or(WorkflowError::Unauthorized("missing x-user-id header"))
}

/// Paging query parameters accepted by the listing endpoints. When the caller
/// omits `size`, the [`PageDefaults`] injected into the router fills it in.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub size: Option<usize>,
}

impl PageParams {
    pub fn request(self, defaults: PageDefaults) -> PageRequest {
        PageRequest::new(self.page, self.size.unwrap_or(defaults.size).max(1))
    }
}

/// Page size applied when a listing request omits `size`. Carried as a router
/// extension so the configured `HIREFLOW_PAGE_SIZE` reaches every handler.
#[derive(Debug, Clone, Copy)]
pub struct PageDefaults {
    pub size: usize,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self { size: 20 }
    }
}
