// Dashboard service - Keeps the jobs, candidates and analytics slots in sync with the portal
use crate::application::portal_repository::{PortalError, PortalRepository};
use crate::application::view_controller::MountToken;
use crate::domain::candidate::retain_shortlisted;
use crate::domain::dashboard::{Dashboard, SlotKind};
use chrono::Utc;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn PortalRepository>,
    mount: MountToken,
    state: Arc<Mutex<Dashboard>>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn PortalRepository>, mount: MountToken) -> Self {
        Self {
            repository,
            mount,
            state: Arc::new(Mutex::new(Dashboard::new())),
        }
    }

    pub fn snapshot(&self) -> Dashboard {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetches all three slots concurrently. Each slot settles on its own;
    /// the loading gate only clears once every fetch has finished.
    pub async fn load(&self) {
        self.commit(|dashboard| dashboard.loading = true);

        futures::join!(self.sync_jobs(), self.sync_candidates(), self.sync_analytics());

        self.commit(|dashboard| {
            dashboard.loading = false;
            dashboard.refreshed_at = Some(Utc::now());
        });
    }

    /// Re-issues a single slot's fetch, leaving the other slots untouched.
    pub async fn retry(&self, slot: SlotKind) {
        tracing::debug!(%slot, "retrying dashboard slot");
        match slot {
            SlotKind::Jobs => self.sync_jobs().await,
            SlotKind::Candidates => self.sync_candidates().await,
            SlotKind::Analytics => self.sync_analytics().await,
        }
    }

    async fn sync_jobs(&self) {
        let outcome = self.repository.list_jobs().await;
        log_failure(SlotKind::Jobs, &outcome);
        self.commit(|dashboard| match outcome {
            Ok(jobs) => dashboard.jobs.succeed(jobs),
            Err(_) => dashboard.jobs.fail(SlotKind::Jobs.failure_message()),
        });
    }

    async fn sync_candidates(&self) {
        let outcome = self.repository.list_candidates().await.map(retain_shortlisted);
        log_failure(SlotKind::Candidates, &outcome);
        self.commit(|dashboard| match outcome {
            Ok(candidates) => dashboard.candidates.succeed(candidates),
            Err(_) => dashboard
                .candidates
                .fail(SlotKind::Candidates.failure_message()),
        });
    }

    async fn sync_analytics(&self) {
        let outcome = self.repository.analytics().await;
        log_failure(SlotKind::Analytics, &outcome);
        self.commit(|dashboard| match outcome {
            Ok(analytics) => dashboard.analytics.succeed(Some(analytics)),
            Err(_) => dashboard
                .analytics
                .fail(SlotKind::Analytics.failure_message()),
        });
    }

    /// Applies `update` unless the dashboard has been torn down meanwhile.
    fn commit(&self, update: impl FnOnce(&mut Dashboard)) -> bool {
        if !self.mount.is_mounted() {
            tracing::debug!("dashboard no longer mounted, dropping update");
            return false;
        }

        let mut dashboard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        update(&mut *dashboard);
        true
    }
}

fn log_failure<T>(slot: SlotKind, outcome: &Result<T, PortalError>) {
    if let Err(err) = outcome {
        tracing::warn!(%slot, error = %err, "dashboard fetch failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::portal_repository::stub::StubRepository;
    use crate::application::view_controller::ViewController;
    use crate::domain::analytics::Analytics;
    use crate::domain::candidate::Candidate;
    use crate::domain::job::Job;
    use crate::domain::view::View;
    use std::sync::atomic::Ordering;

    fn seeded_repository() -> Arc<StubRepository> {
        let repository = StubRepository::default();
        repository.set_jobs(Ok(vec![
            Job::new(1, "Branch Manager", "Retail Banking", "Lead a branch", "MBA"),
            Job::new(2, "Risk Analyst", "Risk", "Model credit risk", "Python, SQL"),
        ]));
        repository.set_candidates(Ok(vec![
            Candidate::new(1, "Abebe", true),
            Candidate::new(2, "Sara", false),
        ]));
        repository.set_analytics(Ok(Analytics::new(2, 1, 64.0)));
        Arc::new(repository)
    }

    #[tokio::test]
    async fn test_load_populates_every_slot_and_filters_candidates() {
        let repository = seeded_repository();
        let service = DashboardService::new(repository.clone(), MountToken::detached());
        assert!(service.snapshot().loading);

        service.load().await;
        let dashboard = service.snapshot();

        assert!(!dashboard.loading);
        assert!(dashboard.refreshed_at.is_some());
        assert_eq!(dashboard.jobs.data.len(), 2);
        assert_eq!(dashboard.candidates.data.len(), 1);
        assert_eq!(dashboard.candidates.data[0].id, 1);
        assert_eq!(dashboard.analytics.data, Some(Analytics::new(2, 1, 64.0)));
        for slot in SlotKind::ALL {
            assert_eq!(dashboard.slot_error(slot), None);
        }
    }

    #[tokio::test]
    async fn test_one_failing_slot_does_not_blank_the_others() {
        let repository = seeded_repository();
        repository.set_candidates(Err(500));
        let service = DashboardService::new(repository.clone(), MountToken::detached());

        service.load().await;
        let dashboard = service.snapshot();

        assert!(!dashboard.loading);
        assert_eq!(dashboard.jobs.data.len(), 2);
        assert!(dashboard.analytics.data.is_some());
        assert!(dashboard.candidates.data.is_empty());
        assert_eq!(
            dashboard.slot_error(SlotKind::Candidates),
            Some("Failed to load candidates")
        );
        assert_eq!(dashboard.slot_error(SlotKind::Jobs), None);
        assert_eq!(dashboard.slot_error(SlotKind::Analytics), None);
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_previously_loaded_data() {
        let repository = seeded_repository();
        let service = DashboardService::new(repository.clone(), MountToken::detached());
        service.load().await;

        repository.set_jobs(Err(503));
        service.load().await;
        let dashboard = service.snapshot();

        assert!(dashboard.jobs.data.is_empty());
        assert_eq!(
            dashboard.slot_error(SlotKind::Jobs),
            Some("Failed to load job listings")
        );
        assert_eq!(dashboard.analytics.data, Some(Analytics::new(2, 1, 64.0)));
        assert_eq!(dashboard.candidates.data.len(), 1);
    }

    #[tokio::test]
    async fn test_retry_reissues_only_the_requested_slot() {
        let repository = seeded_repository();
        repository.set_candidates(Err(500));
        repository.set_analytics(Err(502));
        let service = DashboardService::new(repository.clone(), MountToken::detached());
        service.load().await;

        repository.set_candidates(Ok(vec![Candidate::new(9, "Liya", true)]));
        service.retry(SlotKind::Candidates).await;
        let dashboard = service.snapshot();

        assert_eq!(repository.job_calls.load(Ordering::SeqCst), 1);
        assert_eq!(repository.candidate_calls.load(Ordering::SeqCst), 2);
        assert_eq!(repository.analytics_calls.load(Ordering::SeqCst), 1);
        assert_eq!(dashboard.slot_error(SlotKind::Candidates), None);
        assert_eq!(dashboard.candidates.data[0].id, 9);
        assert_eq!(
            dashboard.slot_error(SlotKind::Analytics),
            Some("Failed to load analytics")
        );
        assert_eq!(dashboard.jobs.data.len(), 2);
    }

    #[tokio::test]
    async fn test_results_after_teardown_are_dropped() {
        let repository = seeded_repository();
        let mut controller = ViewController::new();
        let service = DashboardService::new(repository.clone(), controller.mount());
        let before = service.snapshot();

        controller.navigate(View::Apply);
        service.load().await;

        assert_eq!(repository.job_calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.snapshot(), before);
    }
}
