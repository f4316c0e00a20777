use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::clock::FixedClock;
use crate::domain::{Application, ApplicationStatus, Job, JobStatus, Role, User};
use crate::store::memory::{
    InMemoryApplicationStore, InMemoryInterviewStore, InMemoryJobStore, InMemoryUserStore,
};
use crate::store::{ApplicationStore, JobStore};
use crate::workflows::interviews::service::{InterviewWorkflow, ScheduleInterviewRequest};

pub(super) type Workflow = InterviewWorkflow<
    InMemoryInterviewStore,
    InMemoryApplicationStore,
    InMemoryJobStore,
    InMemoryUserStore,
>;

pub(super) struct Fixture {
    pub(super) workflow: Arc<Workflow>,
    pub(super) jobs: Arc<InMemoryJobStore>,
    pub(super) applications: Arc<InMemoryApplicationStore>,
    pub(super) clock: Arc<FixedClock>,
}

pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

fn user(id: &str, role: Role) -> User {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    User {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        first_name: "Jordan".to_string(),
        last_name: id.to_uppercase(),
        role,
        phone: None,
        resume_url: None,
        profile_picture_url: None,
        created_at: now,
        updated_at: now,
    }
}

pub(super) fn fixture() -> Fixture {
    let interviews = Arc::new(InMemoryInterviewStore::default());
    let applications = Arc::new(InMemoryApplicationStore::default());
    let jobs = Arc::new(InMemoryJobStore::default());
    let users = Arc::new(InMemoryUserStore::default());
    let clock = Arc::new(FixedClock::at(base_time()));

    users.insert(user("rec-1", Role::Recruiter)).expect("seed");
    users.insert(user("rec-2", Role::Recruiter)).expect("seed");
    users.insert(user("admin-1", Role::Admin)).expect("seed");
    users.insert(user("cand-1", Role::Candidate)).expect("seed");
    users.insert(user("cand-2", Role::Candidate)).expect("seed");

    let workflow = Arc::new(InterviewWorkflow::new(
        interviews,
        applications.clone(),
        jobs.clone(),
        users,
        clock.clone(),
    ));

    Fixture {
        workflow,
        jobs,
        applications,
        clock,
    }
}

/// Seed a published job owned by `recruiter_id` plus an applied application
/// from `candidate_id`, returning the application id.
pub(super) fn seed_pipeline(
    fx: &Fixture,
    job_id: &str,
    recruiter_id: &str,
    candidate_id: &str,
) -> String {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    fx.jobs
        .save(Job {
            id: job_id.to_string(),
            title: format!("{job_id} title"),
            description: "desc".to_string(),
            location: "Remote".to_string(),
            department: None,
            employment_type: None,
            salary_min: None,
            salary_max: None,
            status: JobStatus::Published,
            recruiter_id: recruiter_id.to_string(),
            created_at: now,
            updated_at: now,
            published_at: Some(now),
            closed_at: None,
        })
        .expect("seed job");

    let application_id = format!("{job_id}-{candidate_id}");
    fx.applications
        .save(Application {
            id: application_id.clone(),
            job_id: job_id.to_string(),
            candidate_id: candidate_id.to_string(),
            status: ApplicationStatus::Reviewing,
            cover_letter: None,
            resume_url: None,
            created_at: now,
            updated_at: now,
        })
        .expect("seed application");

    application_id
}

pub(super) fn schedule_request(application_id: &str) -> ScheduleInterviewRequest {
    ScheduleInterviewRequest {
        application_id: application_id.to_string(),
        scheduled_at: base_time() + chrono::Duration::days(3),
        location: Some("Video call".to_string()),
        interview_type: Some("Technical".to_string()),
        notes: Some("Bring portfolio".to_string()),
    }
}
