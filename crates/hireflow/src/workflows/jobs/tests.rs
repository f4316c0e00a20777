use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use crate::clock::{Clock, FixedClock};
use crate::domain::{Application, ApplicationStatus, Job, JobStatus, Role, User};
use crate::store::memory::{InMemoryApplicationStore, InMemoryJobStore, InMemoryUserStore};
use crate::store::{ApplicationStore, JobSearch, JobStore, PageRequest};
use crate::workflows::WorkflowError;

use super::service::{JobRequest, JobWorkflow};

fn user(id: &str, role: Role) -> User {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    User {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        first_name: "Avery".to_string(),
        last_name: id.to_uppercase(),
        role,
        phone: None,
        resume_url: None,
        profile_picture_url: None,
        created_at: now,
        updated_at: now,
    }
}

fn request() -> JobRequest {
    JobRequest {
        title: "Backend Engineer".to_string(),
        description: "Own the services layer".to_string(),
        location: "Des Moines".to_string(),
        department: Some("Engineering".to_string()),
        employment_type: Some("FULL_TIME".to_string()),
        salary_min: Some(90_000),
        salary_max: Some(120_000),
    }
}

struct Fixture {
    workflow: JobWorkflow<InMemoryJobStore, InMemoryApplicationStore, InMemoryUserStore>,
    jobs: Arc<InMemoryJobStore>,
    applications: Arc<InMemoryApplicationStore>,
    clock: FixedClock,
}

fn fixture() -> Fixture {
    let jobs = Arc::new(InMemoryJobStore::default());
    let applications = Arc::new(InMemoryApplicationStore::default());
    let users = Arc::new(InMemoryUserStore::default());
    let clock = FixedClock::at(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap());

    users.insert(user("rec-1", Role::Recruiter)).expect("seed");
    users.insert(user("rec-2", Role::Recruiter)).expect("seed");
    users.insert(user("admin-1", Role::Admin)).expect("seed");

    let workflow = JobWorkflow::new(
        jobs.clone(),
        applications.clone(),
        users.clone(),
        Arc::new(clock.clone()),
    );

    Fixture {
        workflow,
        jobs,
        applications,
        clock,
    }
}

#[test]
fn create_starts_in_draft_with_enriched_view() {
    let fx = fixture();
    let view = fx.workflow.create(request(), "rec-1").expect("create");

    assert_eq!(view.status, JobStatus::Draft);
    assert_eq!(view.recruiter_id, "rec-1");
    assert_eq!(view.recruiter_name.as_deref(), Some("Avery REC-1"));
    assert_eq!(view.application_count, 0);
    assert!(view.published_at.is_none());
    assert_eq!(view.created_at, fx.clock.now());
}

#[test]
fn create_rejects_unknown_recruiter() {
    let fx = fixture();
    match fx.workflow.create(request(), "rec-missing") {
        Err(WorkflowError::NotFound("recruiter")) => {}
        other => panic!("expected recruiter not found, got {other:?}"),
    }
}

#[test]
fn create_validates_required_fields_and_salary_range() {
    let fx = fixture();

    let mut blank_title = request();
    blank_title.title = "  ".to_string();
    assert!(matches!(
        fx.workflow.create(blank_title, "rec-1"),
        Err(WorkflowError::Validation(_))
    ));

    let mut inverted = request();
    inverted.salary_min = Some(150_000);
    inverted.salary_max = Some(100_000);
    assert!(matches!(
        fx.workflow.create(inverted, "rec-1"),
        Err(WorkflowError::Validation(_))
    ));
}

#[test]
fn update_is_owner_only_even_for_admins() {
    let fx = fixture();
    let view = fx.workflow.create(request(), "rec-1").expect("create");

    let mut edited = request();
    edited.title = "Staff Engineer".to_string();
    let updated = fx
        .workflow
        .update(&view.id, edited.clone(), "rec-1")
        .expect("owner edits");
    assert_eq!(updated.title, "Staff Engineer");

    assert!(matches!(
        fx.workflow.update(&view.id, edited.clone(), "rec-2"),
        Err(WorkflowError::Unauthorized(_))
    ));
    // Job edits have no admin override; only the literal owner may write.
    assert!(matches!(
        fx.workflow.update(&view.id, edited, "admin-1"),
        Err(WorkflowError::Unauthorized(_))
    ));
}

#[test]
fn publish_stamps_published_at_and_republish_restamps() {
    let fx = fixture();
    let view = fx.workflow.create(request(), "rec-1").expect("create");

    let published = fx.workflow.publish(&view.id, "rec-1").expect("publish");
    assert_eq!(published.status, JobStatus::Published);
    let first_stamp = published.published_at.expect("stamped");
    assert_eq!(first_stamp, fx.clock.now());

    fx.clock.advance(Duration::hours(2));
    let republished = fx.workflow.publish(&view.id, "rec-1").expect("republish");
    assert_eq!(republished.status, JobStatus::Published);
    assert_eq!(
        republished.published_at.expect("restamped"),
        first_stamp + Duration::hours(2)
    );
}

#[test]
fn publish_after_close_is_rejected() {
    let fx = fixture();
    let view = fx.workflow.create(request(), "rec-1").expect("create");
    fx.workflow.publish(&view.id, "rec-1").expect("publish");
    let closed = fx.workflow.close(&view.id, "rec-1").expect("close");
    assert_eq!(closed.status, JobStatus::Closed);
    assert!(closed.closed_at.is_some());

    match fx.workflow.publish(&view.id, "rec-1") {
        Err(WorkflowError::InvalidState(_)) => {}
        other => panic!("expected invalid state, got {other:?}"),
    }

    // Status never regressed.
    let current = fx.workflow.get(&view.id).expect("get");
    assert_eq!(current.status, JobStatus::Closed);
}

#[test]
fn publish_and_close_require_ownership() {
    let fx = fixture();
    let view = fx.workflow.create(request(), "rec-1").expect("create");

    assert!(matches!(
        fx.workflow.publish(&view.id, "rec-2"),
        Err(WorkflowError::Unauthorized(_))
    ));
    assert!(matches!(
        fx.workflow.close(&view.id, "rec-2"),
        Err(WorkflowError::Unauthorized(_))
    ));
}

#[test]
fn delete_removes_job_without_cascading() {
    let fx = fixture();
    let view = fx.workflow.create(request(), "rec-1").expect("create");

    // An application referencing the job survives the delete as an orphan.
    let now = fx.clock.now();
    fx.applications
        .save(Application {
            id: "app-orphan".to_string(),
            job_id: view.id.clone(),
            candidate_id: "cand-1".to_string(),
            status: ApplicationStatus::Applied,
            cover_letter: None,
            resume_url: None,
            created_at: now,
            updated_at: now,
        })
        .expect("seed application");

    assert!(matches!(
        fx.workflow.delete(&view.id, "rec-2"),
        Err(WorkflowError::Unauthorized(_))
    ));

    fx.workflow.delete(&view.id, "rec-1").expect("delete");
    assert!(matches!(
        fx.workflow.get(&view.id),
        Err(WorkflowError::NotFound("job"))
    ));
    assert_eq!(
        fx.applications
            .find_by_job(&view.id, PageRequest::unpaged())
            .expect("query")
            .total,
        1
    );
}

#[test]
fn view_counts_applications_and_omits_missing_recruiter() {
    let fx = fixture();
    let now = fx.clock.now();

    // Seeded directly so the job can reference a recruiter the user store
    // no longer knows about.
    fx.jobs
        .save(Job {
            id: "job-ghost".to_string(),
            title: "Orphaned".to_string(),
            description: "d".to_string(),
            location: "l".to_string(),
            department: None,
            employment_type: None,
            salary_min: None,
            salary_max: None,
            status: JobStatus::Published,
            recruiter_id: "rec-gone".to_string(),
            created_at: now,
            updated_at: now,
            published_at: Some(now),
            closed_at: None,
        })
        .expect("seed job");

    fx.applications
        .save(Application {
            id: "app-1".to_string(),
            job_id: "job-ghost".to_string(),
            candidate_id: "cand-1".to_string(),
            status: ApplicationStatus::Applied,
            cover_letter: None,
            resume_url: None,
            created_at: now,
            updated_at: now,
        })
        .expect("seed application");

    let view = fx.workflow.get("job-ghost").expect("view");
    assert!(view.recruiter_name.is_none());
    assert_eq!(view.application_count, 1);
}

#[test]
fn listings_filter_by_status_and_owner() {
    let fx = fixture();
    let draft = fx.workflow.create(request(), "rec-1").expect("create");
    let other = fx.workflow.create(request(), "rec-2").expect("create");
    fx.workflow.publish(&other.id, "rec-2").expect("publish");

    let published = fx
        .workflow
        .list_published(PageRequest::default())
        .expect("list");
    assert_eq!(published.total, 1);
    assert_eq!(published.items[0].id, other.id);

    let mine = fx
        .workflow
        .list_by_recruiter("rec-1", PageRequest::default())
        .expect("list");
    assert_eq!(mine.total, 1);
    assert_eq!(mine.items[0].id, draft.id);

    let searched = fx
        .workflow
        .search(
            &JobSearch {
                title: Some("backend".to_string()),
                location: None,
                status: Some(JobStatus::Published),
            },
            PageRequest::default(),
        )
        .expect("search");
    assert_eq!(searched.total, 1);
    assert_eq!(searched.items[0].id, other.id);
}
