//! Interview lifecycle: scheduling against an application, rescheduling (which
//! discards any prior candidate response), monotonic completion, and the
//! candidate-owned response sub-state machine.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::interview_router;
pub use service::{
    CompleteInterviewRequest, InterviewResponseRequest, InterviewView, InterviewWorkflow,
    ScheduleInterviewRequest, UpdateInterviewRequest,
};
