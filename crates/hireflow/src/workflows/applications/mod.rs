//! Application lifecycle: intake against published jobs with duplicate
//! rejection, recruiter-gated status updates, and the derived
//! applications-by-recruiter listing.

pub mod router;
pub mod service;


pub use router::application_router;
pub use service::{ApplicationRequest, ApplicationView, ApplicationWorkflow};
