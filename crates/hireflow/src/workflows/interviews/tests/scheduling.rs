use chrono::Duration;

use crate::domain::InterviewResponseStatus;
use crate::workflows::interviews::service::UpdateInterviewRequest;
use crate::workflows::WorkflowError;

use super::common::{base_time, fixture, schedule_request, seed_pipeline};

#[test]
fn schedule_records_participants_and_defaults() {
    let fx = fixture();
    let app_id = seed_pipeline(&fx, "job-a", "rec-1", "cand-1");

    let view = fx
        .workflow
        .schedule(schedule_request(&app_id), "rec-1")
        .expect("schedule");

    assert_eq!(view.application_id, app_id);
    assert_eq!(view.candidate_id, "cand-1");
    assert_eq!(view.recruiter_id, "rec-1");
    assert_eq!(view.candidate_name.as_deref(), Some("Jordan CAND-1"));
    assert_eq!(view.recruiter_email.as_deref(), Some("rec-1@example.com"));
    assert!(!view.is_completed);
    assert_eq!(
        view.candidate_response_status,
        InterviewResponseStatus::Pending
    );
    assert!(view.candidate_responded_at.is_none());
}

#[test]
fn admin_schedules_and_becomes_recruiter_of_record() {
    let fx = fixture();
    let app_id = seed_pipeline(&fx, "job-a", "rec-1", "cand-1");

    let view = fx
        .workflow
        .schedule(schedule_request(&app_id), "admin-1")
        .expect("admin schedule");

    assert_eq!(view.recruiter_id, "admin-1");
}

#[test]
fn schedule_rejects_non_owning_recruiter() {
    let fx = fixture();
    let app_id = seed_pipeline(&fx, "job-a", "rec-1", "cand-1");

    assert!(matches!(
        fx.workflow.schedule(schedule_request(&app_id), "rec-2"),
        Err(WorkflowError::Unauthorized(_))
    ));
}

#[test]
fn schedule_rejects_past_slot() {
    let fx = fixture();
    let app_id = seed_pipeline(&fx, "job-a", "rec-1", "cand-1");

    let mut request = schedule_request(&app_id);
    request.scheduled_at = base_time() - Duration::hours(1);
    assert!(matches!(
        fx.workflow.schedule(request, "rec-1"),
        Err(WorkflowError::Validation(_))
    ));

    // The present instant is not "in the future" either.
    let mut request = schedule_request(&app_id);
    request.scheduled_at = base_time();
    assert!(matches!(
        fx.workflow.schedule(request, "rec-1"),
        Err(WorkflowError::Validation(_))
    ));
}

#[test]
fn schedule_rejects_second_interview_for_same_application() {
    let fx = fixture();
    let app_id = seed_pipeline(&fx, "job-a", "rec-1", "cand-1");

    fx.workflow
        .schedule(schedule_request(&app_id), "rec-1")
        .expect("first");

    match fx.workflow.schedule(schedule_request(&app_id), "rec-1") {
        Err(WorkflowError::Conflict(_)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn schedule_rejects_unknown_application() {
    let fx = fixture();

    assert!(matches!(
        fx.workflow.schedule(schedule_request("app-nope"), "rec-1"),
        Err(WorkflowError::NotFound("application"))
    ));
}

#[test]
fn update_reschedules_and_resets_candidate_response() {
    let fx = fixture();
    let app_id = seed_pipeline(&fx, "job-a", "rec-1", "cand-1");
    let view = fx
        .workflow
        .schedule(schedule_request(&app_id), "rec-1")
        .expect("schedule");

    fx.workflow
        .respond(
            &view.id,
            "cand-1",
            crate::workflows::interviews::service::InterviewResponseRequest {
                response: InterviewResponseStatus::Accepted,
                note: Some("see you there".to_string()),
            },
        )
        .expect("respond");

    let updated = fx
        .workflow
        .update(
            &view.id,
            UpdateInterviewRequest {
                scheduled_at: base_time() + Duration::days(5),
                location: Some("On-site".to_string()),
                interview_type: Some("Final".to_string()),
                notes: None,
            },
            "rec-1",
        )
        .expect("update");

    assert_eq!(updated.scheduled_at, base_time() + Duration::days(5));
    assert_eq!(updated.location.as_deref(), Some("On-site"));
    assert!(updated.notes.is_none());
    assert_eq!(
        updated.candidate_response_status,
        InterviewResponseStatus::Pending
    );
    assert!(updated.candidate_responded_at.is_none());
    assert!(updated.candidate_response_note.is_none());
}

#[test]
fn update_is_gated_like_scheduling() {
    let fx = fixture();
    let app_id = seed_pipeline(&fx, "job-a", "rec-1", "cand-1");
    let view = fx
        .workflow
        .schedule(schedule_request(&app_id), "rec-1")
        .expect("schedule");

    let request = UpdateInterviewRequest {
        scheduled_at: base_time() + Duration::days(5),
        location: None,
        interview_type: None,
        notes: None,
    };

    assert!(matches!(
        fx.workflow.update(&view.id, request.clone(), "rec-2"),
        Err(WorkflowError::Unauthorized(_))
    ));
    // Admin override applies to interviews.
    fx.workflow
        .update(&view.id, request, "admin-1")
        .expect("admin update");
}

#[test]
fn update_rejects_past_slot() {
    let fx = fixture();
    let app_id = seed_pipeline(&fx, "job-a", "rec-1", "cand-1");
    let view = fx
        .workflow
        .schedule(schedule_request(&app_id), "rec-1")
        .expect("schedule");

    assert!(matches!(
        fx.workflow.update(
            &view.id,
            UpdateInterviewRequest {
                scheduled_at: base_time() - Duration::days(1),
                location: None,
                interview_type: None,
                notes: None,
            },
            "rec-1",
        ),
        Err(WorkflowError::Validation(_))
    ));
}

#[test]
fn listings_split_by_participant() {
    let fx = fixture();
    let app_a = seed_pipeline(&fx, "job-a", "rec-1", "cand-1");
    let app_b = seed_pipeline(&fx, "job-b", "rec-2", "cand-2");

    fx.workflow
        .schedule(schedule_request(&app_a), "rec-1")
        .expect("a");
    fx.workflow
        .schedule(schedule_request(&app_b), "rec-2")
        .expect("b");

    let mine = fx.workflow.list_by_candidate("cand-1").expect("mine");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].application_id, app_a);

    let theirs = fx.workflow.list_by_recruiter("rec-2").expect("theirs");
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].application_id, app_b);
}

#[test]
fn list_between_includes_both_bounds() {
    let fx = fixture();
    let app_a = seed_pipeline(&fx, "job-a", "rec-1", "cand-1");
    let app_b = seed_pipeline(&fx, "job-b", "rec-1", "cand-2");

    let mut early = schedule_request(&app_a);
    early.scheduled_at = base_time() + Duration::days(1);
    let mut late = schedule_request(&app_b);
    late.scheduled_at = base_time() + Duration::days(4);

    fx.workflow.schedule(early, "rec-1").expect("early");
    fx.workflow.schedule(late, "rec-1").expect("late");

    let exact = fx
        .workflow
        .list_between(
            base_time() + Duration::days(1),
            base_time() + Duration::days(4),
        )
        .expect("range");
    assert_eq!(exact.len(), 2);

    let narrow = fx
        .workflow
        .list_between(
            base_time() + Duration::days(2),
            base_time() + Duration::days(3),
        )
        .expect("range");
    assert!(narrow.is_empty());
}
