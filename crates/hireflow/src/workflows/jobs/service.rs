use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::Clock;
use crate::domain::{Job, JobStatus};
use crate::policy;
use crate::store::{ApplicationStore, JobSearch, JobStore, Page, PageRequest, UserStore};
use crate::workflows::WorkflowError;

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> String {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("job-{id:06}")
}

/// Mutable posting fields, shared by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct JobRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
}

impl JobRequest {
    fn validate(&self) -> Result<(), WorkflowError> {
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(WorkflowError::Validation(format!("{field} is required")));
            }
        }
        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                return Err(WorkflowError::Validation(
                    "salary_min must not exceed salary_max".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Posting enriched with recruiter display data and a live application count.
#[derive(Debug, Clone, Serialize)]
pub struct JobView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<u32>,
    pub status: JobStatus,
    pub recruiter_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub application_count: usize,
}

/// Lifecycle manager for job postings.
pub struct JobWorkflow<J, A, U> {
    jobs: Arc<J>,
    applications: Arc<A>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<J, A, U> JobWorkflow<J, A, U>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    U: UserStore + 'static,
{
    pub fn new(jobs: Arc<J>, applications: Arc<A>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            jobs,
            applications,
            users,
            clock,
        }
    }

    /// Create a posting in `Draft`, owned by the acting recruiter.
    pub fn create(&self, request: JobRequest, recruiter_id: &str) -> Result<JobView, WorkflowError> {
        request.validate()?;
        self.users
            .get(recruiter_id)?
            .ok_or(WorkflowError::NotFound("recruiter"))?;

        let now = self.clock.now();
        let job = Job {
            id: next_job_id(),
            title: request.title,
            description: request.description,
            location: request.location,
            department: request.department,
            employment_type: request.employment_type,
            salary_min: request.salary_min,
            salary_max: request.salary_max,
            status: JobStatus::Draft,
            recruiter_id: recruiter_id.to_string(),
            created_at: now,
            updated_at: now,
            published_at: None,
            closed_at: None,
        };

        let stored = self.jobs.save(job)?;
        info!(job_id = %stored.id, %recruiter_id, "job created");
        self.view(stored)
    }

    /// Rewrite the mutable posting fields. Status never changes here, and only
    /// the literal owner may edit (no admin override for job writes).
    pub fn update(
        &self,
        id: &str,
        request: JobRequest,
        recruiter_id: &str,
    ) -> Result<JobView, WorkflowError> {
        request.validate()?;
        let mut job = self.load(id)?;
        if !policy::is_owner(recruiter_id, &job.recruiter_id) {
            return Err(WorkflowError::Unauthorized(
                "not authorized to update this job",
            ));
        }

        job.title = request.title;
        job.description = request.description;
        job.location = request.location;
        job.department = request.department;
        job.employment_type = request.employment_type;
        job.salary_min = request.salary_min;
        job.salary_max = request.salary_max;
        job.updated_at = self.clock.now();

        self.view(self.jobs.save(job)?)
    }

    /// Advance to `Published`. Re-publishing an already published job simply
    /// re-stamps `published_at`; a closed job never goes back.
    pub fn publish(&self, id: &str, recruiter_id: &str) -> Result<JobView, WorkflowError> {
        let mut job = self.load(id)?;
        if !policy::is_owner(recruiter_id, &job.recruiter_id) {
            return Err(WorkflowError::Unauthorized(
                "not authorized to publish this job",
            ));
        }
        if job.status == JobStatus::Closed {
            return Err(WorkflowError::InvalidState(
                "cannot publish a closed job",
            ));
        }

        let now = self.clock.now();
        job.status = JobStatus::Published;
        job.published_at = Some(now);
        job.updated_at = now;

        let stored = self.jobs.save(job)?;
        info!(job_id = %stored.id, "job published");
        self.view(stored)
    }

    /// Advance to `Closed` and stamp `closed_at`.
    pub fn close(&self, id: &str, recruiter_id: &str) -> Result<JobView, WorkflowError> {
        let mut job = self.load(id)?;
        if !policy::is_owner(recruiter_id, &job.recruiter_id) {
            return Err(WorkflowError::Unauthorized(
                "not authorized to close this job",
            ));
        }

        let now = self.clock.now();
        job.status = JobStatus::Closed;
        job.closed_at = Some(now);
        job.updated_at = now;

        let stored = self.jobs.save(job)?;
        info!(job_id = %stored.id, "job closed");
        self.view(stored)
    }

    /// Hard delete. Existing applications and interviews keep their references
    /// and become orphans; cascading cleanup is out of scope.
    pub fn delete(&self, id: &str, recruiter_id: &str) -> Result<(), WorkflowError> {
        let job = self.load(id)?;
        if !policy::is_owner(recruiter_id, &job.recruiter_id) {
            return Err(WorkflowError::Unauthorized(
                "not authorized to delete this job",
            ));
        }
        self.jobs.delete(id)?;
        info!(job_id = %id, "job deleted");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<JobView, WorkflowError> {
        let job = self.load(id)?;
        self.view(job)
    }

    pub fn list_published(&self, page: PageRequest) -> Result<Page<JobView>, WorkflowError> {
        let jobs = self.jobs.find_by_status(JobStatus::Published, page)?;
        self.views(jobs)
    }

    pub fn list_by_recruiter(
        &self,
        recruiter_id: &str,
        page: PageRequest,
    ) -> Result<Page<JobView>, WorkflowError> {
        let jobs = self.jobs.find_by_recruiter(recruiter_id, page)?;
        self.views(jobs)
    }

    pub fn search(
        &self,
        filter: &JobSearch,
        page: PageRequest,
    ) -> Result<Page<JobView>, WorkflowError> {
        let jobs = self.jobs.search(filter, page)?;
        self.views(jobs)
    }

    fn load(&self, id: &str) -> Result<Job, WorkflowError> {
        self.jobs.get(id)?.ok_or(WorkflowError::NotFound("job"))
    }

    fn view(&self, job: Job) -> Result<JobView, WorkflowError> {
        // Missing recruiters are omitted from the view, never an error.
        let recruiter_name = self
            .users
            .get(&job.recruiter_id)?
            .map(|user| user.display_name());
        let application_count = self
            .applications
            .find_by_job(&job.id, PageRequest::unpaged())?
            .total;

        Ok(JobView {
            id: job.id,
            title: job.title,
            description: job.description,
            location: job.location,
            department: job.department,
            employment_type: job.employment_type,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            status: job.status,
            recruiter_id: job.recruiter_id,
            recruiter_name,
            created_at: job.created_at,
            published_at: job.published_at,
            closed_at: job.closed_at,
            application_count,
        })
    }

    fn views(&self, page: Page<Job>) -> Result<Page<JobView>, WorkflowError> {
        let mut items = Vec::with_capacity(page.items.len());
        for job in page.items {
            items.push(self.view(job)?);
        }
        Ok(Page {
            items,
            total: page.total,
            page: page.page,
            size: page.size,
        })
    }
}
