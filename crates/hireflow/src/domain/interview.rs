use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Candidate-owned response sub-state. Rescheduling resets it to `Pending` and
/// discards the prior response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewResponseStatus {
    Pending,
    Accepted,
    Declined,
    RescheduleRequested,
}

impl InterviewResponseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewResponseStatus::Pending => "PENDING",
            InterviewResponseStatus::Accepted => "ACCEPTED",
            InterviewResponseStatus::Declined => "DECLINED",
            InterviewResponseStatus::RescheduleRequested => "RESCHEDULE_REQUESTED",
        }
    }
}

/// A recruiter-scheduled event tied to exactly one application. Candidate and
/// recruiter ids are denormalized so authorization never needs the two-hop
/// lookup through the application and job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: String,
    pub application_id: String,
    pub candidate_id: String,
    pub recruiter_id: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_type: Option<String>,
    pub is_completed: bool,
    pub candidate_response_status: InterviewResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_responded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_response_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
