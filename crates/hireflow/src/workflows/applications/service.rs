use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::Clock;
use crate::domain::{Application, ApplicationStatus, JobStatus};
use crate::policy;
use crate::store::{ApplicationStore, JobStore, Page, PageRequest, UserStore};
use crate::workflows::WorkflowError;

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> String {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("app-{id:06}")
}

/// Candidate-authored intake payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationRequest {
    pub job_id: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

/// Application enriched with job title and candidate display data.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub id: String,
    pub job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    pub candidate_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_email: Option<String>,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle manager for applications. Authorship belongs to the candidate;
/// status transitions belong to the job's recruiter.
pub struct ApplicationWorkflow<A, J, U> {
    applications: Arc<A>,
    jobs: Arc<J>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<A, J, U> ApplicationWorkflow<A, J, U>
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    pub fn new(applications: Arc<A>, jobs: Arc<J>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            applications,
            jobs,
            users,
            clock,
        }
    }

    /// Submit an application. Only published jobs accept submissions, and a
    /// candidate may apply to a given job at most once.
    pub fn create(
        &self,
        request: ApplicationRequest,
        candidate_id: &str,
    ) -> Result<ApplicationView, WorkflowError> {
        let job = self
            .jobs
            .get(&request.job_id)?
            .ok_or(WorkflowError::NotFound("job"))?;

        if job.status != JobStatus::Published {
            return Err(WorkflowError::InvalidState(
                "cannot apply to an unpublished job",
            ));
        }

        if self
            .applications
            .find_by_job_and_candidate(&request.job_id, candidate_id)?
            .is_some()
        {
            return Err(WorkflowError::Conflict(
                "candidate has already applied for this job",
            ));
        }

        self.users
            .get(candidate_id)?
            .ok_or(WorkflowError::NotFound("candidate"))?;

        let now = self.clock.now();
        let application = Application {
            id: next_application_id(),
            job_id: request.job_id,
            candidate_id: candidate_id.to_string(),
            status: ApplicationStatus::Applied,
            cover_letter: request.cover_letter,
            resume_url: request.resume_url,
            created_at: now,
            updated_at: now,
        };

        let stored = self.applications.save(application)?;
        info!(application_id = %stored.id, job_id = %stored.job_id, "application submitted");
        self.view(stored)
    }

    /// Set the pipeline status. Gated on the owning job's recruiter — no admin
    /// override, and no transition-graph validation: any status may follow any
    /// other.
    pub fn update_status(
        &self,
        id: &str,
        new_status: ApplicationStatus,
        recruiter_id: &str,
    ) -> Result<ApplicationView, WorkflowError> {
        let mut application = self.load(id)?;
        let job = self
            .jobs
            .get(&application.job_id)?
            .ok_or(WorkflowError::NotFound("job"))?;

        if !policy::is_owner(recruiter_id, &job.recruiter_id) {
            return Err(WorkflowError::Unauthorized(
                "not authorized to update this application",
            ));
        }

        application.status = new_status;
        application.updated_at = self.clock.now();

        let stored = self.applications.save(application)?;
        info!(
            application_id = %stored.id,
            status = stored.status.label(),
            "application status updated"
        );
        self.view(stored)
    }

    pub fn get(&self, id: &str) -> Result<ApplicationView, WorkflowError> {
        let application = self.load(id)?;
        self.view(application)
    }

    pub fn list_by_candidate(
        &self,
        candidate_id: &str,
        page: PageRequest,
    ) -> Result<Page<ApplicationView>, WorkflowError> {
        let applications = self.applications.find_by_candidate(candidate_id, page)?;
        self.views(applications)
    }

    pub fn list_by_job(
        &self,
        job_id: &str,
        page: PageRequest,
    ) -> Result<Page<ApplicationView>, WorkflowError> {
        let applications = self.applications.find_by_job(job_id, page)?;
        self.views(applications)
    }

    /// Derived two-hop query: every application whose job belongs to the
    /// recruiter. Kept as a composed read instead of denormalizing a
    /// recruiter id onto applications.
    pub fn list_by_recruiter(
        &self,
        recruiter_id: &str,
        page: PageRequest,
    ) -> Result<Page<ApplicationView>, WorkflowError> {
        let job_ids: Vec<String> = self
            .jobs
            .find_by_recruiter(recruiter_id, PageRequest::unpaged())?
            .items
            .into_iter()
            .map(|job| job.id)
            .collect();

        let applications = self.applications.find_by_job_ids(&job_ids, page)?;
        self.views(applications)
    }

    fn load(&self, id: &str) -> Result<Application, WorkflowError> {
        self.applications
            .get(id)?
            .ok_or(WorkflowError::NotFound("application"))
    }

    fn view(&self, application: Application) -> Result<ApplicationView, WorkflowError> {
        // Dangling job/candidate references are omitted, never an error.
        let job_title = self.jobs.get(&application.job_id)?.map(|job| job.title);
        let candidate = self.users.get(&application.candidate_id)?;

        Ok(ApplicationView {
            id: application.id,
            job_id: application.job_id,
            job_title,
            candidate_id: application.candidate_id,
            candidate_name: candidate.as_ref().map(|user| user.display_name()),
            candidate_email: candidate.map(|user| user.email),
            status: application.status,
            cover_letter: application.cover_letter,
            resume_url: application.resume_url,
            created_at: application.created_at,
            updated_at: application.updated_at,
        })
    }

    fn views(&self, page: Page<Application>) -> Result<Page<ApplicationView>, WorkflowError> {
        let mut items = Vec::with_capacity(page.items.len());
        for application in page.items {
            items.push(self.view(application)?);
        }
        Ok(Page {
            items,
            total: page.total,
            page: page.page,
            size: page.size,
        })
    }
}
