use chrono::Duration;

use crate::clock::Clock;
use crate::domain::InterviewResponseStatus;
use crate::workflows::interviews::service::{CompleteInterviewRequest, InterviewResponseRequest};
use crate::workflows::WorkflowError;

use super::common::{fixture, schedule_request, seed_pipeline, Fixture};

fn scheduled(fx: &Fixture) -> String {
    let app_id = seed_pipeline(fx, "job-a", "rec-1", "cand-1");
    fx.workflow
        .schedule(schedule_request(&app_id), "rec-1")
        .expect("schedule")
        .id
}

fn response(status: InterviewResponseStatus, note: Option<&str>) -> InterviewResponseRequest {
    InterviewResponseRequest {
        response: status,
        note: note.map(str::to_string),
    }
}

#[test]
fn candidate_response_is_stamped() {
    let fx = fixture();
    let id = scheduled(&fx);

    let view = fx
        .workflow
        .respond(
            &id,
            "cand-1",
            response(InterviewResponseStatus::Accepted, Some("works for me")),
        )
        .expect("respond");

    assert_eq!(
        view.candidate_response_status,
        InterviewResponseStatus::Accepted
    );
    assert_eq!(view.candidate_response_note.as_deref(), Some("works for me"));
    assert_eq!(view.candidate_responded_at, Some(fx.clock.now()));
}

#[test]
fn candidate_may_revise_their_response() {
    let fx = fixture();
    let id = scheduled(&fx);

    fx.workflow
        .respond(
            &id,
            "cand-1",
            response(InterviewResponseStatus::Accepted, None),
        )
        .expect("accept");

    let view = fx
        .workflow
        .respond(
            &id,
            "cand-1",
            response(
                InterviewResponseStatus::RescheduleRequested,
                Some("conflict came up"),
            ),
        )
        .expect("revise");

    assert_eq!(
        view.candidate_response_status,
        InterviewResponseStatus::RescheduleRequested
    );
}

#[test]
fn only_the_interviews_candidate_may_respond() {
    let fx = fixture();
    let id = scheduled(&fx);

    for intruder in ["cand-2", "rec-1", "admin-1"] {
        assert!(
            matches!(
                fx.workflow.respond(
                    &id,
                    intruder,
                    response(InterviewResponseStatus::Declined, None),
                ),
                Err(WorkflowError::Unauthorized(_))
            ),
            "{intruder} should not be able to respond"
        );
    }
}

#[test]
fn complete_stamps_and_keeps_existing_notes() {
    let fx = fixture();
    let id = scheduled(&fx);

    let view = fx
        .workflow
        .complete(&id, CompleteInterviewRequest { notes: None }, "rec-1")
        .expect("complete");

    assert!(view.is_completed);
    assert_eq!(view.completed_at, Some(fx.clock.now()));
    // Blank or absent notes do not clobber what was set at scheduling time.
    assert_eq!(view.notes.as_deref(), Some("Bring portfolio"));

    let view = fx
        .workflow
        .complete(
            &id,
            CompleteInterviewRequest {
                notes: Some("   ".to_string()),
            },
            "rec-1",
        )
        .expect("complete with blank notes");
    assert_eq!(view.notes.as_deref(), Some("Bring portfolio"));
}

#[test]
fn complete_overwrites_notes_when_given() {
    let fx = fixture();
    let id = scheduled(&fx);

    let view = fx
        .workflow
        .complete(
            &id,
            CompleteInterviewRequest {
                notes: Some("Strong hire signal".to_string()),
            },
            "rec-1",
        )
        .expect("complete");

    assert_eq!(view.notes.as_deref(), Some("Strong hire signal"));
}

#[test]
fn complete_is_monotonic_and_restamps() {
    let fx = fixture();
    let id = scheduled(&fx);

    let first = fx
        .workflow
        .complete(&id, CompleteInterviewRequest { notes: None }, "rec-1")
        .expect("first");

    fx.clock.advance(Duration::hours(2));

    let second = fx
        .workflow
        .complete(&id, CompleteInterviewRequest { notes: None }, "rec-1")
        .expect("second");

    assert!(second.is_completed);
    assert!(second.completed_at > first.completed_at);
}

#[test]
fn complete_is_gated_on_recruiter_of_record() {
    let fx = fixture();
    let id = scheduled(&fx);

    assert!(matches!(
        fx.workflow
            .complete(&id, CompleteInterviewRequest { notes: None }, "rec-2"),
        Err(WorkflowError::Unauthorized(_))
    ));
    assert!(matches!(
        fx.workflow
            .complete(&id, CompleteInterviewRequest { notes: None }, "cand-1"),
        Err(WorkflowError::Unauthorized(_))
    ));

    // Admin override holds here as well.
    fx.workflow
        .complete(&id, CompleteInterviewRequest { notes: None }, "admin-1")
        .expect("admin completes");
}
