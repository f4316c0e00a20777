//! Job posting lifecycle: draft, publish, close, delete, and the read-side
//! listings with recruiter/application-count enrichment.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::job_router;
pub use service::{JobRequest, JobView, JobWorkflow};
