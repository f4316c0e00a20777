//! Entity types shared by the workflows.
//!
//! References between entities (`Application.job_id`, `Interview.application_id`,
//! recruiter/candidate ids) are plain document ids; the workflows are responsible
//! for resolving them before acting, never the stores.

mod application;
mod interview;
mod job;
mod message;
mod user;

pub use application::{Application, ApplicationStatus};
pub use interview::{Interview, InterviewResponseStatus};
pub use job::{Job, JobStatus};
pub use message::{chat_room_id, Message};
pub use user::{Role, User};
