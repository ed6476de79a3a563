// Application state for the interactive portal session
use crate::application::application_service::ApplicationService;
use crate::application::dashboard_service::DashboardService;
use crate::application::portal_repository::PortalRepository;
use crate::application::view_controller::ViewController;
use crate::domain::view::View;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The view instance currently on screen. Switching views drops the old
/// instance; anything it still has in flight is discarded on arrival.
#[derive(Clone)]
pub enum ActiveView {
    Dashboard(DashboardService),
    Apply(ApplicationService),
}

pub struct AppState {
    repository: Arc<dyn PortalRepository>,
    max_resume_bytes: usize,
    views: ViewController,
    active: ActiveView,
}

impl AppState {
    pub fn new(repository: Arc<dyn PortalRepository>, max_resume_bytes: usize) -> Self {
        let views = ViewController::new();
        let active = ActiveView::Dashboard(DashboardService::new(repository.clone(), views.mount()));

        Self {
            repository,
            max_resume_bytes,
            views,
            active,
        }
    }

    pub fn current_view(&self) -> View {
        self.views.current()
    }

    pub fn active(&self) -> &ActiveView {
        &self.active
    }

    /// Switches views and starts the new view's initial fetch. Returns `None`
    /// when `view` is already showing.
    pub fn navigate(&mut self, view: View) -> Option<JoinHandle<()>> {
        if !self.views.navigate(view) {
            return None;
        }

        let mount = self.views.mount();
        self.active = match view {
            View::Dashboard => ActiveView::Dashboard(DashboardService::new(self.repository.clone(), mount)),
            View::Apply => ActiveView::Apply(ApplicationService::new(
                self.repository.clone(),
                mount,
                self.max_resume_bytes,
            )),
        };

        Some(self.activate())
    }

    /// Runs the initial fetch of whichever view is active.
    pub fn activate(&self) -> JoinHandle<()> {
        match self.active.clone() {
            ActiveView::Dashboard(dashboard) => tokio::spawn(async move { dashboard.load().await }),
            ActiveView::Apply(form) => tokio::spawn(async move { form.load_job_options().await }),
        }
    }
}
