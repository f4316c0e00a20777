use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;

use hireflow::clock::Clock;
use hireflow::domain::{Role, User};
use hireflow::store::memory::{
    InMemoryApplicationStore, InMemoryInterviewStore, InMemoryJobStore, InMemoryMessageStore,
    InMemoryUserStore,
};
use hireflow::store::StoreError;
use hireflow::workflows::analytics::AnalyticsService;
use hireflow::workflows::applications::ApplicationWorkflow;
use hireflow::workflows::interviews::InterviewWorkflow;
use hireflow::workflows::jobs::JobWorkflow;
use hireflow::workflows::messaging::MessageWorkflow;

pub(crate) type JobService =
    JobWorkflow<InMemoryJobStore, InMemoryApplicationStore, InMemoryUserStore>;
pub(crate) type ApplicationService =
    ApplicationWorkflow<InMemoryApplicationStore, InMemoryJobStore, InMemoryUserStore>;
pub(crate) type InterviewService = InterviewWorkflow<
    InMemoryInterviewStore,
    InMemoryApplicationStore,
    InMemoryJobStore,
    InMemoryUserStore,
>;
pub(crate) type DashboardService = AnalyticsService<
    InMemoryJobStore,
    InMemoryApplicationStore,
    InMemoryInterviewStore,
    InMemoryUserStore,
>;
pub(crate) type MessageService = MessageWorkflow<InMemoryMessageStore, InMemoryUserStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The in-memory backing stores shared by every workflow.
#[derive(Default)]
pub(crate) struct Stores {
    pub(crate) jobs: Arc<InMemoryJobStore>,
    pub(crate) applications: Arc<InMemoryApplicationStore>,
    pub(crate) interviews: Arc<InMemoryInterviewStore>,
    pub(crate) users: Arc<InMemoryUserStore>,
    pub(crate) messages: Arc<InMemoryMessageStore>,
}

pub(crate) struct Services {
    pub(crate) jobs: Arc<JobService>,
    pub(crate) applications: Arc<ApplicationService>,
    pub(crate) interviews: Arc<InterviewService>,
    pub(crate) analytics: Arc<DashboardService>,
    pub(crate) messages: Arc<MessageService>,
}

pub(crate) fn build_services(stores: &Stores, clock: Arc<dyn Clock>) -> Services {
    Services {
        jobs: Arc::new(JobWorkflow::new(
            stores.jobs.clone(),
            stores.applications.clone(),
            stores.users.clone(),
            clock.clone(),
        )),
        applications: Arc::new(ApplicationWorkflow::new(
            stores.applications.clone(),
            stores.jobs.clone(),
            stores.users.clone(),
            clock.clone(),
        )),
        interviews: Arc::new(InterviewWorkflow::new(
            stores.interviews.clone(),
            stores.applications.clone(),
            stores.jobs.clone(),
            stores.users.clone(),
            clock.clone(),
        )),
        analytics: Arc::new(AnalyticsService::new(
            stores.jobs.clone(),
            stores.applications.clone(),
            stores.interviews.clone(),
            stores.users.clone(),
            clock.clone(),
        )),
        messages: Arc::new(MessageWorkflow::new(
            stores.messages.clone(),
            stores.users.clone(),
            clock,
        )),
    }
}

/// Account provisioning lives outside this service, so the process starts with
/// a fixed directory the workflows can resolve actors against.
pub(crate) fn seed_users(users: &InMemoryUserStore) -> Result<(), StoreError> {
    let directory = [
        ("admin-1", "avery@hireflow.test", "Avery", "Stone", Role::Admin),
        ("rec-1", "morgan@hireflow.test", "Morgan", "Reyes", Role::Recruiter),
        ("rec-2", "priya@hireflow.test", "Priya", "Natarajan", Role::Recruiter),
        ("cand-1", "jordan@candidates.test", "Jordan", "Li", Role::Candidate),
        ("cand-2", "sam@candidates.test", "Sam", "Okafor", Role::Candidate),
    ];

    let now = Utc::now();
    for (id, email, first_name, last_name, role) in directory {
        users.insert(User {
            id: id.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role,
            phone: None,
            resume_url: None,
            profile_picture_url: None,
            created_at: now,
            updated_at: now,
        })?;
    }

    Ok(())
}
