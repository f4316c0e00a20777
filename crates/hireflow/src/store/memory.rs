//! Mutex-guarded in-memory stores backing the api binary and the test suites.
//!
//! Records are kept in `BTreeMap`s keyed by id; ids are issued sequentially by
//! the workflows, so iteration order matches insertion order and listings stay
//! deterministic.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::{
    Application, ApplicationStatus, Interview, Job, JobStatus, Message, Role, User,
};

use super::{
    ApplicationStore, InterviewStore, JobSearch, JobStore, MessageStore, Page, PageRequest,
    StoreError, UserStore,
};

fn lock<T>(records: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    records
        .lock()
        .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Default, Clone)]
pub struct InMemoryJobStore {
    records: Arc<Mutex<BTreeMap<String, Job>>>,
}

impl JobStore for InMemoryJobStore {
    fn get(&self, id: &str) -> Result<Option<Job>, StoreError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn save(&self, job: Job) -> Result<Job, StoreError> {
        lock(&self.records)?.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        lock(&self.records)?.remove(id);
        Ok(())
    }

    fn find_by_status(
        &self,
        status: JobStatus,
        page: PageRequest,
    ) -> Result<Page<Job>, StoreError> {
        let matches: Vec<Job> = lock(&self.records)?
            .values()
            .filter(|job| job.status == status)
            .cloned()
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    fn find_by_recruiter(
        &self,
        recruiter_id: &str,
        page: PageRequest,
    ) -> Result<Page<Job>, StoreError> {
        let matches: Vec<Job> = lock(&self.records)?
            .values()
            .filter(|job| job.recruiter_id == recruiter_id)
            .cloned()
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    fn search(&self, filter: &JobSearch, page: PageRequest) -> Result<Page<Job>, StoreError> {
        let matches: Vec<Job> = lock(&self.records)?
            .values()
            .filter(|job| {
                filter
                    .title
                    .as_deref()
                    .map_or(true, |title| contains_ci(&job.title, title))
                    && filter
                        .location
                        .as_deref()
                        .map_or(true, |location| contains_ci(&job.location, location))
                    && filter.status.map_or(true, |status| job.status == status)
            })
            .cloned()
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(lock(&self.records)?.len())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryApplicationStore {
    records: Arc<Mutex<BTreeMap<String, Application>>>,
}

impl ApplicationStore for InMemoryApplicationStore {
    fn get(&self, id: &str) -> Result<Option<Application>, StoreError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn save(&self, application: Application) -> Result<Application, StoreError> {
        lock(&self.records)?.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn find_by_candidate(
        &self,
        candidate_id: &str,
        page: PageRequest,
    ) -> Result<Page<Application>, StoreError> {
        let matches: Vec<Application> = lock(&self.records)?
            .values()
            .filter(|app| app.candidate_id == candidate_id)
            .cloned()
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    fn find_by_job(
        &self,
        job_id: &str,
        page: PageRequest,
    ) -> Result<Page<Application>, StoreError> {
        let matches: Vec<Application> = lock(&self.records)?
            .values()
            .filter(|app| app.job_id == job_id)
            .cloned()
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    fn find_by_job_ids(
        &self,
        job_ids: &[String],
        page: PageRequest,
    ) -> Result<Page<Application>, StoreError> {
        let matches: Vec<Application> = lock(&self.records)?
            .values()
            .filter(|app| job_ids.iter().any(|id| *id == app.job_id))
            .cloned()
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>, StoreError> {
        Ok(lock(&self.records)?
            .values()
            .filter(|app| app.status == status)
            .cloned()
            .collect())
    }

    fn find_by_job_and_candidate(
        &self,
        job_id: &str,
        candidate_id: &str,
    ) -> Result<Option<Application>, StoreError> {
        Ok(lock(&self.records)?
            .values()
            .find(|app| app.job_id == job_id && app.candidate_id == candidate_id)
            .cloned())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(lock(&self.records)?.len())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryInterviewStore {
    records: Arc<Mutex<BTreeMap<String, Interview>>>,
}

impl InterviewStore for InMemoryInterviewStore {
    fn get(&self, id: &str) -> Result<Option<Interview>, StoreError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn save(&self, interview: Interview) -> Result<Interview, StoreError> {
        lock(&self.records)?.insert(interview.id.clone(), interview.clone());
        Ok(interview)
    }

    fn find_by_application(&self, application_id: &str) -> Result<Option<Interview>, StoreError> {
        Ok(lock(&self.records)?
            .values()
            .find(|interview| interview.application_id == application_id)
            .cloned())
    }

    fn find_by_candidate(&self, candidate_id: &str) -> Result<Vec<Interview>, StoreError> {
        Ok(lock(&self.records)?
            .values()
            .filter(|interview| interview.candidate_id == candidate_id)
            .cloned()
            .collect())
    }

    fn find_by_recruiter(&self, recruiter_id: &str) -> Result<Vec<Interview>, StoreError> {
        Ok(lock(&self.records)?
            .values()
            .filter(|interview| interview.recruiter_id == recruiter_id)
            .cloned()
            .collect())
    }

    fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Interview>, StoreError> {
        Ok(lock(&self.records)?
            .values()
            .filter(|interview| interview.scheduled_at >= start && interview.scheduled_at <= end)
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(lock(&self.records)?.len())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    records: Arc<Mutex<BTreeMap<String, User>>>,
}

impl InMemoryUserStore {
    /// Seeding hook for the api binary and tests; user provisioning itself
    /// belongs to the auth subsystem.
    pub fn insert(&self, user: User) -> Result<User, StoreError> {
        lock(&self.records)?.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}

impl UserStore for InMemoryUserStore {
    fn get(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(lock(&self.records)?
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    fn count_by_role(&self, role: Role) -> Result<usize, StoreError> {
        Ok(lock(&self.records)?
            .values()
            .filter(|user| user.role == role)
            .count())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(lock(&self.records)?.len())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryMessageStore {
    records: Arc<Mutex<BTreeMap<String, Message>>>,
}

impl MessageStore for InMemoryMessageStore {
    fn save(&self, message: Message) -> Result<Message, StoreError> {
        lock(&self.records)?.insert(message.id.clone(), message.clone());
        Ok(message)
    }

    fn find_by_chat_room(&self, chat_room_id: &str) -> Result<Vec<Message>, StoreError> {
        let mut messages: Vec<Message> = lock(&self.records)?
            .values()
            .filter(|message| message.chat_room_id == chat_room_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    fn find_unread(
        &self,
        chat_room_id: &str,
        receiver_id: &str,
    ) -> Result<Vec<Message>, StoreError> {
        Ok(lock(&self.records)?
            .values()
            .filter(|message| {
                message.chat_room_id == chat_room_id
                    && message.receiver_id == receiver_id
                    && !message.is_read
            })
            .cloned()
            .collect())
    }

    fn count_unread_by_receiver(&self, receiver_id: &str) -> Result<usize, StoreError> {
        Ok(lock(&self.records)?
            .values()
            .filter(|message| message.receiver_id == receiver_id && !message.is_read)
            .count())
    }
}
