use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;

use hireflow::clock::SystemClock;
use hireflow::domain::{ApplicationStatus, InterviewResponseStatus};
use hireflow::error::AppError;
use hireflow::store::PageRequest;
use hireflow::workflows::applications::ApplicationRequest;
use hireflow::workflows::interviews::{
    CompleteInterviewRequest, InterviewResponseRequest, ScheduleInterviewRequest,
};
use hireflow::workflows::jobs::JobRequest;
use hireflow::workflows::messaging::SendMessageRequest;
use hireflow::workflows::WorkflowError;

use crate::infra::{build_services, seed_users, Stores};

fn print_json<T: Serialize>(label: &str, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("\n{label}\n{json}"),
        Err(err) => println!("\n{label}: unavailable ({err})"),
    }
}

/// Drive one hiring pipeline end to end through the real services and print
/// the snapshots a client would see at each step.
pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Recruitment workflow demo");

    let stores = Stores::default();
    seed_users(&stores.users).map_err(WorkflowError::from)?;
    let services = build_services(&stores, Arc::new(SystemClock));

    // Recruiter drafts and publishes a posting.
    let job = services.jobs.create(
        JobRequest {
            title: "Senior Backend Engineer".to_string(),
            description: "Own the hiring pipeline services.".to_string(),
            location: "Remote".to_string(),
            department: Some("Engineering".to_string()),
            employment_type: Some("Full-time".to_string()),
            salary_min: Some(110_000),
            salary_max: Some(150_000),
        },
        "rec-1",
    )?;
    let job = services.jobs.publish(&job.id, "rec-1")?;
    print_json("Published job", &job);

    // Candidate applies.
    let application = services.applications.create(
        ApplicationRequest {
            job_id: job.id.clone(),
            cover_letter: Some("Ten years of service plumbing.".to_string()),
            resume_url: None,
        },
        "cand-1",
    )?;
    print_json("Submitted application", &application);

    services
        .applications
        .update_status(&application.id, ApplicationStatus::Reviewing, "rec-1")?;

    // Recruiter schedules, candidate accepts, recruiter completes.
    let interview = services.interviews.schedule(
        ScheduleInterviewRequest {
            application_id: application.id.clone(),
            scheduled_at: Utc::now() + Duration::days(3),
            location: Some("Video call".to_string()),
            interview_type: Some("Technical".to_string()),
            notes: None,
        },
        "rec-1",
    )?;
    services.interviews.respond(
        &interview.id,
        "cand-1",
        InterviewResponseRequest {
            response: InterviewResponseStatus::Accepted,
            note: Some("Looking forward to it.".to_string()),
        },
    )?;
    let interview = services.interviews.complete(
        &interview.id,
        CompleteInterviewRequest {
            notes: Some("Strong systems background.".to_string()),
        },
        "rec-1",
    )?;
    print_json("Completed interview", &interview);

    // Pipeline advances to a hire.
    for status in [
        ApplicationStatus::Interviewed,
        ApplicationStatus::Offered,
        ApplicationStatus::Hired,
    ] {
        services
            .applications
            .update_status(&application.id, status, "rec-1")?;
    }

    let pipeline = services
        .applications
        .list_by_recruiter("rec-1", PageRequest::default())?;
    print_json("Recruiter pipeline", &pipeline);

    // A quick exchange between the two parties.
    services.messages.send(
        SendMessageRequest {
            receiver_email: "jordan@candidates.test".to_string(),
            content: "Congratulations, offer details to follow.".to_string(),
        },
        "rec-1",
    )?;
    services.messages.send(
        SendMessageRequest {
            receiver_email: "morgan@hireflow.test".to_string(),
            content: "Thank you! Accepting.".to_string(),
        },
        "cand-1",
    )?;
    let conversation = services
        .messages
        .chat_messages("rec-1", "jordan@candidates.test")?;
    print_json("Conversation", &conversation);

    let dashboard = services.analytics.dashboard(None)?;
    print_json("Dashboard", &dashboard);

    Ok(())
}
