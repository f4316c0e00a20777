//! Storage abstractions so the workflows can be exercised in isolation.
//!
//! Every query the lifecycle managers need is a method here; nothing enforces
//! referential integrity or uniqueness at this layer. The bundled [`memory`]
//! module implements all five traits over mutex-guarded maps.

pub mod memory;

use chrono::{DateTime, Utc};

use crate::domain::{
    Application, ApplicationStatus, Interview, Job, JobStatus, Message, Role, User,
};

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Zero-based paging: `page` indexes `size`-sized chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// A request large enough to return every record, for derived queries and
    /// analytics scans.
    pub fn unpaged() -> Self {
        Self {
            page: 0,
            size: usize::MAX,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 20 }
    }
}

/// A slice of results plus the total match count before paging.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub size: usize,
}

impl<T> Page<T> {
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len();
        let items = all
            .into_iter()
            .skip(request.page.saturating_mul(request.size))
            .take(request.size)
            .collect();
        Self {
            items,
            total,
            page: request.page,
            size: request.size,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}

/// Filters for the job search query. Absent filters are wildcards; title and
/// location match case-insensitive substrings, status matches exactly, and the
/// provided filters combine conjunctively.
#[derive(Debug, Clone, Default)]
pub struct JobSearch {
    pub title: Option<String>,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
}

pub trait JobStore: Send + Sync {
    fn get(&self, id: &str) -> Result<Option<Job>, StoreError>;
    fn save(&self, job: Job) -> Result<Job, StoreError>;
    fn delete(&self, id: &str) -> Result<(), StoreError>;
    fn find_by_status(&self, status: JobStatus, page: PageRequest)
        -> Result<Page<Job>, StoreError>;
    fn find_by_recruiter(
        &self,
        recruiter_id: &str,
        page: PageRequest,
    ) -> Result<Page<Job>, StoreError>;
    fn search(&self, filter: &JobSearch, page: PageRequest) -> Result<Page<Job>, StoreError>;
    fn count(&self) -> Result<usize, StoreError>;
}

pub trait ApplicationStore: Send + Sync {
    fn get(&self, id: &str) -> Result<Option<Application>, StoreError>;
    fn save(&self, application: Application) -> Result<Application, StoreError>;
    fn find_by_candidate(
        &self,
        candidate_id: &str,
        page: PageRequest,
    ) -> Result<Page<Application>, StoreError>;
    fn find_by_job(&self, job_id: &str, page: PageRequest)
        -> Result<Page<Application>, StoreError>;
    fn find_by_job_ids(
        &self,
        job_ids: &[String],
        page: PageRequest,
    ) -> Result<Page<Application>, StoreError>;
    fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>, StoreError>;
    fn find_by_job_and_candidate(
        &self,
        job_id: &str,
        candidate_id: &str,
    ) -> Result<Option<Application>, StoreError>;
    fn count(&self) -> Result<usize, StoreError>;
}

pub trait InterviewStore: Send + Sync {
    fn get(&self, id: &str) -> Result<Option<Interview>, StoreError>;
    fn save(&self, interview: Interview) -> Result<Interview, StoreError>;
    fn find_by_application(&self, application_id: &str) -> Result<Option<Interview>, StoreError>;
    fn find_by_candidate(&self, candidate_id: &str) -> Result<Vec<Interview>, StoreError>;
    fn find_by_recruiter(&self, recruiter_id: &str) -> Result<Vec<Interview>, StoreError>;
    /// Interviews whose `scheduled_at` falls within the inclusive range.
    fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Interview>, StoreError>;
    fn count(&self) -> Result<usize, StoreError>;
}

pub trait UserStore: Send + Sync {
    fn get(&self, id: &str) -> Result<Option<User>, StoreError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    fn count_by_role(&self, role: Role) -> Result<usize, StoreError>;
    fn count(&self) -> Result<usize, StoreError>;
}

pub trait MessageStore: Send + Sync {
    fn save(&self, message: Message) -> Result<Message, StoreError>;
    /// Messages for a chat room in ascending `created_at` order.
    fn find_by_chat_room(&self, chat_room_id: &str) -> Result<Vec<Message>, StoreError>;
    /// Unread messages in a room addressed to the given receiver.
    fn find_unread(
        &self,
        chat_room_id: &str,
        receiver_id: &str,
    ) -> Result<Vec<Message>, StoreError>;
    fn count_unread_by_receiver(&self, receiver_id: &str) -> Result<usize, StoreError>;
}
