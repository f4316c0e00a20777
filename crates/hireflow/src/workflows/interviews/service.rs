use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::Clock;
use crate::domain::{Interview, InterviewResponseStatus, User};
use crate::policy;
use crate::store::{ApplicationStore, InterviewStore, JobStore, UserStore};
use crate::workflows::WorkflowError;

static INTERVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_interview_id() -> String {
    let id = INTERVIEW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("int-{id:06}")
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleInterviewRequest {
    pub application_id: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub interview_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInterviewRequest {
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub interview_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompleteInterviewRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterviewResponseRequest {
    pub response: InterviewResponseStatus,
    #[serde(default)]
    pub note: Option<String>,
}

/// Interview enriched with candidate and recruiter display data.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewView {
    pub id: String,
    pub application_id: String,
    pub candidate_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_email: Option<String>,
    pub recruiter_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter_email: Option<String>,
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
}

/// Lifecycle manager for interviews. Scheduling/edit/completion fields belong
/// to the recruiter (with admin override); the response sub-state belongs
/// exclusively to the candidate.
pub struct InterviewWorkflow<I, A, J, U> {
    interviews: Arc<I>,
    applications: Arc<A>,
    jobs: Arc<J>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<I, A, J, U> InterviewWorkflow<I, A, J, U>
where
    I: InterviewStore + 'static,
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    U: UserStore + 'static,
{
    pub fn new(
        interviews: Arc<I>,
        applications: Arc<A>,
        jobs: Arc<J>,
        users: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            interviews,
            applications,
            jobs,
            users,
            clock,
        }
    }

    /// Schedule the one interview an application may have. The actor must be
    /// an admin or the owning job's recruiter, and becomes the interview's
    /// recruiter of record.
    pub fn schedule(
        &self,
        request: ScheduleInterviewRequest,
        acting_user_id: &str,
    ) -> Result<InterviewView, WorkflowError> {
        self.ensure_future(request.scheduled_at)?;

        let application = self
            .applications
            .get(&request.application_id)?
            .ok_or(WorkflowError::NotFound("application"))?;
        let job = self
            .jobs
            .get(&application.job_id)?
            .ok_or(WorkflowError::NotFound("job"))?;
        let actor = self.load_user(acting_user_id)?;

        if !policy::can_act(acting_user_id, actor.role, &job.recruiter_id) {
            return Err(WorkflowError::Unauthorized(
                "not authorized to schedule an interview for this application",
            ));
        }

        if self
            .interviews
            .find_by_application(&application.id)?
            .is_some()
        {
            return Err(WorkflowError::Conflict(
                "interview already scheduled for this application",
            ));
        }

        let now = self.clock.now();
        let interview = Interview {
            id: next_interview_id(),
            application_id: request.application_id,
            candidate_id: application.candidate_id,
            recruiter_id: acting_user_id.to_string(),
            scheduled_at: request.scheduled_at,
            completed_at: None,
            notes: request.notes,
            location: request.location,
            interview_type: request.interview_type,
            is_completed: false,
            candidate_response_status: InterviewResponseStatus::Pending,
            candidate_responded_at: None,
            candidate_response_note: None,
            created_at: now,
            updated_at: now,
        };

        let stored = self.interviews.save(interview)?;
        info!(
            interview_id = %stored.id,
            application_id = %stored.application_id,
            "interview scheduled"
        );
        self.view(stored)
    }

    /// Reschedule or edit. Any prior candidate response is discarded: a
    /// changed slot invalidates an earlier accept/decline.
    pub fn update(
        &self,
        id: &str,
        request: UpdateInterviewRequest,
        acting_user_id: &str,
    ) -> Result<InterviewView, WorkflowError> {
        self.ensure_future(request.scheduled_at)?;

        let mut interview = self.load(id)?;
        let actor = self.load_user(acting_user_id)?;
        if !policy::can_act(acting_user_id, actor.role, &interview.recruiter_id) {
            return Err(WorkflowError::Unauthorized(
                "not authorized to update this interview",
            ));
        }

        interview.scheduled_at = request.scheduled_at;
        interview.location = request.location;
        interview.interview_type = request.interview_type;
        interview.notes = request.notes;
        interview.candidate_response_status = InterviewResponseStatus::Pending;
        interview.candidate_responded_at = None;
        interview.candidate_response_note = None;
        interview.updated_at = self.clock.now();

        let stored = self.interviews.save(interview)?;
        info!(interview_id = %stored.id, "interview rescheduled");
        self.view(stored)
    }

    /// Mark completed. Monotonic: there is no path back to incomplete, and a
    /// repeat call only re-stamps `completed_at`. Empty or absent notes leave
    /// the existing notes untouched.
    pub fn complete(
        &self,
        id: &str,
        request: CompleteInterviewRequest,
        acting_user_id: &str,
    ) -> Result<InterviewView, WorkflowError> {
        let mut interview = self.load(id)?;
        let actor = self.load_user(acting_user_id)?;
        if !policy::can_act(acting_user_id, actor.role, &interview.recruiter_id) {
            return Err(WorkflowError::Unauthorized(
                "not authorized to complete this interview",
            ));
        }

        let now = self.clock.now();
        interview.is_completed = true;
        interview.completed_at = Some(now);
        if let Some(notes) = request.notes.filter(|notes| !notes.trim().is_empty()) {
            interview.notes = Some(notes);
        }
        interview.updated_at = now;

        let stored = self.interviews.save(interview)?;
        info!(interview_id = %stored.id, "interview completed");
        self.view(stored)
    }

    /// Record the candidate's response. Only the interview's candidate may
    /// respond; there is no admin override here.
    pub fn respond(
        &self,
        id: &str,
        candidate_id: &str,
        request: InterviewResponseRequest,
    ) -> Result<InterviewView, WorkflowError> {
        let mut interview = self.load(id)?;
        if !policy::is_owner(candidate_id, &interview.candidate_id) {
            return Err(WorkflowError::Unauthorized(
                "not authorized to respond to this interview",
            ));
        }

        let now = self.clock.now();
        interview.candidate_response_status = request.response;
        interview.candidate_response_note = request.note;
        interview.candidate_responded_at = Some(now);
        interview.updated_at = now;

        let stored = self.interviews.save(interview)?;
        info!(
            interview_id = %stored.id,
            response = stored.candidate_response_status.label(),
            "candidate responded"
        );
        self.view(stored)
    }

    pub fn get(&self, id: &str) -> Result<InterviewView, WorkflowError> {
        let interview = self.load(id)?;
        self.view(interview)
    }

    pub fn list_by_candidate(
        &self,
        candidate_id: &str,
    ) -> Result<Vec<InterviewView>, WorkflowError> {
        self.views(self.interviews.find_by_candidate(candidate_id)?)
    }

    pub fn list_by_recruiter(
        &self,
        recruiter_id: &str,
    ) -> Result<Vec<InterviewView>, WorkflowError> {
        self.views(self.interviews.find_by_recruiter(recruiter_id)?)
    }

    /// Interviews scheduled within the inclusive range.
    pub fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<InterviewView>, WorkflowError> {
        self.views(self.interviews.find_between(start, end)?)
    }

    fn ensure_future(&self, scheduled_at: DateTime<Utc>) -> Result<(), WorkflowError> {
        if scheduled_at <= self.clock.now() {
            return Err(WorkflowError::Validation(
                "scheduled_at must be in the future".to_string(),
            ));
        }
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Interview, WorkflowError> {
        self.interviews
            .get(id)?
            .ok_or(WorkflowError::NotFound("interview"))
    }

    fn load_user(&self, id: &str) -> Result<User, WorkflowError> {
        self.users.get(id)?.ok_or(WorkflowError::NotFound("user"))
    }

    fn view(&self, interview: Interview) -> Result<InterviewView, WorkflowError> {
        // Display lookups never fail the operation; unresolvable references
        // just leave the fields unset.
        let candidate = self.users.get(&interview.candidate_id)?;
        let recruiter = self.users.get(&interview.recruiter_id)?;

        Ok(InterviewView {
            id: interview.id,
            application_id: interview.application_id,
            candidate_id: interview.candidate_id,
            candidate_name: candidate.as_ref().map(|user| user.display_name()),
            candidate_email: candidate.map(|user| user.email),
            recruiter_id: interview.recruiter_id,
            recruiter_name: recruiter.as_ref().map(|user| user.display_name()),
            recruiter_email: recruiter.map(|user| user.email),
            scheduled_at: interview.scheduled_at,
            completed_at: interview.completed_at,
            notes: interview.notes,
            location: interview.location,
            interview_type: interview.interview_type,
            is_completed: interview.is_completed,
            candidate_response_status: interview.candidate_response_status,
            candidate_responded_at: interview.candidate_responded_at,
            candidate_response_note: interview.candidate_response_note,
            created_at: interview.created_at,
        })
    }

    fn views(&self, interviews: Vec<Interview>) -> Result<Vec<InterviewView>, WorkflowError> {
        let mut views = Vec::with_capacity(interviews.len());
        for interview in interviews {
            views.push(self.view(interview)?);
        }
        Ok(views)
    }
}
