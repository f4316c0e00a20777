//! Recruitment workflow engine.
//!
//! The crate models the lifecycle of three entities — jobs, applications, and
//! interviews — together with the authorization rules that tie them back to the
//! recruiter who owns the job, and a read-only analytics reduction over all of
//! them. Storage is abstracted behind per-entity store traits so the workflows
//! can be exercised against the bundled in-memory stores or any other backend.

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod policy;
pub mod store;
pub mod telemetry;
pub mod workflows;
