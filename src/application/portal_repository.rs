// Repository trait for portal API access
use crate::domain::analytics::Analytics;
use crate::domain::application::{ApplicationResult, ApplicationSubmission};
use crate::domain::candidate::Candidate;
use crate::domain::job::Job;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("{endpoint} returned status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    #[error("could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl PortalError {
    /// Server-provided explanation, when the API sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            PortalError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[async_trait]
pub trait PortalRepository: Send + Sync {
    /// Published job postings. A response without a `jobs` array is an empty listing.
    async fn list_jobs(&self) -> Result<Vec<Job>, PortalError>;

    /// Every candidate record, unfiltered. A response without a `candidates` array is empty.
    async fn list_candidates(&self) -> Result<Vec<Candidate>, PortalError>;

    /// Current analytics snapshot
    async fn analytics(&self) -> Result<Analytics, PortalError>;

    /// Upload a validated application and return the scored result
    async fn submit_application(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<ApplicationResult, PortalError>;
}

#[cfg(test)]
pub mod stub {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned outcome: the value, or the HTTP status the stub fails with.
    pub type Outcome<T> = Result<T, u16>;

    /// In-memory portal used by service tests. Counts every call it receives.
    pub struct StubRepository {
        pub jobs: Mutex<Outcome<Vec<Job>>>,
        pub candidates: Mutex<Outcome<Vec<Candidate>>>,
        pub analytics: Mutex<Outcome<Analytics>>,
        pub submission: Mutex<Outcome<ApplicationResult>>,
        pub submitted: Mutex<Vec<ApplicationSubmission>>,
        pub job_calls: AtomicUsize,
        pub candidate_calls: AtomicUsize,
        pub analytics_calls: AtomicUsize,
    }

    impl Default for StubRepository {
        fn default() -> Self {
            Self {
                jobs: Mutex::new(Ok(Vec::new())),
                candidates: Mutex::new(Ok(Vec::new())),
                analytics: Mutex::new(Ok(Analytics::default())),
                submission: Mutex::new(Err(500)),
                submitted: Mutex::new(Vec::new()),
                job_calls: AtomicUsize::new(0),
                candidate_calls: AtomicUsize::new(0),
                analytics_calls: AtomicUsize::new(0),
            }
        }
    }

    impl StubRepository {
        pub fn set_jobs(&self, outcome: Outcome<Vec<Job>>) {
            *self.jobs.lock().unwrap() = outcome;
        }

        pub fn set_candidates(&self, outcome: Outcome<Vec<Candidate>>) {
            *self.candidates.lock().unwrap() = outcome;
        }

        pub fn set_analytics(&self, outcome: Outcome<Analytics>) {
            *self.analytics.lock().unwrap() = outcome;
        }

        pub fn set_submission(&self, outcome: Outcome<ApplicationResult>) {
            *self.submission.lock().unwrap() = outcome;
        }

        pub fn submission_count(&self) -> usize {
            self.submitted.lock().unwrap().len()
        }

        fn answer<T: Clone>(endpoint: &str, outcome: &Mutex<Outcome<T>>) -> Result<T, PortalError> {
            outcome
                .lock()
                .unwrap()
                .clone()
                .map_err(|status| PortalError::Status {
                    endpoint: endpoint.to_string(),
                    status,
                    detail: Some("stubbed failure".to_string()),
                })
        }
    }

    #[async_trait]
    impl PortalRepository for StubRepository {
        async fn list_jobs(&self) -> Result<Vec<Job>, PortalError> {
            self.job_calls.fetch_add(1, Ordering::SeqCst);
            Self::answer("/api/jobs/", &self.jobs)
        }

        async fn list_candidates(&self) -> Result<Vec<Candidate>, PortalError> {
            self.candidate_calls.fetch_add(1, Ordering::SeqCst);
            Self::answer("/api/candidates/", &self.candidates)
        }

        async fn analytics(&self) -> Result<Analytics, PortalError> {
            self.analytics_calls.fetch_add(1, Ordering::SeqCst);
            Self::answer("/api/analytics/", &self.analytics)
        }

        async fn submit_application(
            &self,
            submission: &ApplicationSubmission,
        ) -> Result<ApplicationResult, PortalError> {
            self.submitted.lock().unwrap().push(submission.clone());
            Self::answer("/api/process-application/", &self.submission)
        }
    }
}
