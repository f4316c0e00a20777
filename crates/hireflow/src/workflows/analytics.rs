//! Read-only dashboard reductions over the stores. Everything here is a full
//! scan; missing references are excluded from the numbers, never an error.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Datelike, Months, Utc};
use serde::Serialize;

use crate::clock::Clock;
use crate::domain::{ApplicationStatus, Interview, JobStatus, Role};
use crate::store::{ApplicationStore, InterviewStore, JobStore, PageRequest, UserStore};
use crate::workflows::{actor_id, WorkflowError};

/// Aggregate snapshot rendered by the dashboard endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total_jobs: usize,
    pub total_applications: usize,
    pub total_interviews: usize,
    pub total_users: usize,
    pub total_recruiters: usize,
    pub total_candidates: usize,
    /// Histogram keyed by status label; every status appears, zero included.
    pub applications_by_status: BTreeMap<String, usize>,
    /// Histogram keyed by status label; every status appears, zero included.
    pub jobs_by_status: BTreeMap<String, usize>,
    /// Interviews scheduled in the trailing six months, keyed `"YYYY-MM"`.
    /// Months without interviews are absent.
    pub interviews_by_month: BTreeMap<String, usize>,
    /// `100 × hired / total` applications, `0.0` when there are none.
    pub conversion_rate: f64,
}

fn month_key(instant: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", instant.year(), instant.month())
}

fn months_histogram(
    interviews: &[Interview],
    window_start: DateTime<Utc>,
    now: DateTime<Utc>,
) -> BTreeMap<String, usize> {
    let mut months = BTreeMap::new();
    for interview in interviews {
        if interview.scheduled_at >= window_start && interview.scheduled_at <= now {
            *months.entry(month_key(interview.scheduled_at)).or_insert(0) += 1;
        }
    }
    months
}

fn conversion_rate(hired: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * hired as f64 / total as f64
}

/// Dashboard reducer. `dashboard(None)` covers the whole platform;
/// `dashboard(Some(recruiter_id))` restricts jobs, their reachable
/// applications, and the recruiter's interviews. User totals are always
/// platform-wide.
pub struct AnalyticsService<J, A, I, U> {
    jobs: Arc<J>,
    applications: Arc<A>,
    interviews: Arc<I>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<J, A, I, U> AnalyticsService<J, A, I, U>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    I: InterviewStore + 'static,
    U: UserStore + 'static,
{
    pub fn new(
        jobs: Arc<J>,
        applications: Arc<A>,
        interviews: Arc<I>,
        users: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            jobs,
            applications,
            interviews,
            users,
            clock,
        }
    }

    /// Resolve the acting user and pick the scope: recruiters and admins see
    /// the slice owned by their own id; candidates and unresolvable ids fall
    /// back to the platform-wide numbers.
    pub fn dashboard_for(&self, acting_user_id: &str) -> Result<Dashboard, WorkflowError> {
        match self.users.get(acting_user_id)? {
            Some(actor) if matches!(actor.role, Role::Recruiter | Role::Admin) => {
                self.dashboard(Some(&actor.id))
            }
            _ => self.dashboard(None),
        }
    }

    pub fn dashboard(&self, scope: Option<&str>) -> Result<Dashboard, WorkflowError> {
        let now = self.clock.now();
        let window_start = now.checked_sub_months(Months::new(6)).unwrap_or(now);

        let (total_jobs, jobs_by_status, job_ids) = self.job_numbers(scope)?;
        let (total_applications, applications_by_status, hired) =
            self.application_numbers(scope.map(|_| job_ids.as_slice()))?;
        let (total_interviews, interviews_by_month) =
            self.interview_numbers(scope, window_start, now)?;

        Ok(Dashboard {
            total_jobs,
            total_applications,
            total_interviews,
            total_users: self.users.count()?,
            total_recruiters: self.users.count_by_role(Role::Recruiter)?,
            total_candidates: self.users.count_by_role(Role::Candidate)?,
            applications_by_status,
            jobs_by_status,
            interviews_by_month,
            conversion_rate: conversion_rate(hired, total_applications),
        })
    }

    fn job_numbers(
        &self,
        scope: Option<&str>,
    ) -> Result<(usize, BTreeMap<String, usize>, Vec<String>), WorkflowError> {
        let mut by_status: BTreeMap<String, usize> = JobStatus::ALL
            .iter()
            .map(|status| (status.label().to_string(), 0))
            .collect();

        match scope {
            Some(recruiter_id) => {
                let jobs = self
                    .jobs
                    .find_by_recruiter(recruiter_id, PageRequest::unpaged())?;
                for job in &jobs.items {
                    *by_status.entry(job.status.label().to_string()).or_insert(0) += 1;
                }
                let ids = jobs.items.into_iter().map(|job| job.id).collect();
                Ok((jobs.total, by_status, ids))
            }
            None => {
                for status in JobStatus::ALL {
                    let page = self.jobs.find_by_status(status, PageRequest::unpaged())?;
                    by_status.insert(status.label().to_string(), page.total);
                }
                Ok((self.jobs.count()?, by_status, Vec::new()))
            }
        }
    }

    fn application_numbers(
        &self,
        scope_job_ids: Option<&[String]>,
    ) -> Result<(usize, BTreeMap<String, usize>, usize), WorkflowError> {
        let mut by_status: BTreeMap<String, usize> = ApplicationStatus::ALL
            .iter()
            .map(|status| (status.label().to_string(), 0))
            .collect();

        let (total, hired) = match scope_job_ids {
            Some(job_ids) => {
                let page = self
                    .applications
                    .find_by_job_ids(job_ids, PageRequest::unpaged())?;
                let mut hired = 0;
                for application in &page.items {
                    if application.status == ApplicationStatus::Hired {
                        hired += 1;
                    }
                    *by_status
                        .entry(application.status.label().to_string())
                        .or_insert(0) += 1;
                }
                (page.total, hired)
            }
            None => {
                let mut hired = 0;
                for status in ApplicationStatus::ALL {
                    let count = self.applications.find_by_status(status)?.len();
                    if status == ApplicationStatus::Hired {
                        hired = count;
                    }
                    by_status.insert(status.label().to_string(), count);
                }
                (self.applications.count()?, hired)
            }
        };

        Ok((total, by_status, hired))
    }

    fn interview_numbers(
        &self,
        scope: Option<&str>,
        window_start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(usize, BTreeMap<String, usize>), WorkflowError> {
        match scope {
            Some(recruiter_id) => {
                let interviews = self.interviews.find_by_recruiter(recruiter_id)?;
                let months = months_histogram(&interviews, window_start, now);
                Ok((interviews.len(), months))
            }
            None => {
                let windowed = self.interviews.find_between(window_start, now)?;
                let months = months_histogram(&windowed, window_start, now);
                Ok((self.interviews.count()?, months))
            }
        }
    }
}

/// HTTP surface for the dashboard.
pub fn analytics_router<J, A, I, U>(service: Arc<AnalyticsService<J, A, I, U>>) -> Router
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    I: InterviewStore + 'static,
    U: UserStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/analytics/dashboard",
            get(dashboard_handler::<J, A, I, U>),
        )
        .with_state(service)
}

async fn dashboard_handler<J, A, I, U>(
    State(service): State<Arc<AnalyticsService<J, A, I, U>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, WorkflowError>
where
    J: JobStore + 'static,
    A: ApplicationStore + 'static,
    I: InterviewStore + 'static,
    U: UserStore + 'static,
{
    // Anonymous callers still get the platform-wide view.
    let dashboard = match actor_id(&headers) {
        Ok(actor) => service.dashboard_for(&actor)?,
        Err(_) => service.dashboard(None)?,
    };
    Ok(Json(dashboard))
}
