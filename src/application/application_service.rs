// Application service - Validates and submits a resume against a selected job
use crate::application::portal_repository::{PortalError, PortalRepository};
use crate::application::view_controller::MountToken;
use crate::domain::application::{
    ApplicationDraft, ApplicationResult, ResumeFile, ValidationError,
};
use crate::domain::job::Job;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const SUBMISSION_FAILED_MESSAGE: &str = "Application processing failed. Please try again.";
pub const JOB_OPTIONS_FAILED_MESSAGE: &str =
    "Failed to load job listings. Please ensure the backend is running.";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("an application is already being processed")]
    Busy,
    #[error("Application processing failed. Please try again.")]
    Portal(#[source] PortalError),
}

/// Everything the application view renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationForm {
    pub draft: ApplicationDraft,
    pub job_options: Vec<Job>,
    pub result: Option<ApplicationResult>,
    pub busy: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct ApplicationService {
    repository: Arc<dyn PortalRepository>,
    mount: MountToken,
    max_resume_bytes: usize,
    state: Arc<Mutex<ApplicationForm>>,
}

impl ApplicationService {
    pub fn new(
        repository: Arc<dyn PortalRepository>,
        mount: MountToken,
        max_resume_bytes: usize,
    ) -> Self {
        Self {
            repository,
            mount,
            max_resume_bytes,
            state: Arc::new(Mutex::new(ApplicationForm::default())),
        }
    }

    pub fn max_resume_bytes(&self) -> usize {
        self.max_resume_bytes
    }

    pub fn snapshot(&self) -> ApplicationForm {
        self.form().clone()
    }

    /// Populates the position picker. On failure the picker is left empty,
    /// which in turn blocks submission through the missing-field check.
    pub async fn load_job_options(&self) {
        let outcome = self.repository.list_jobs().await;
        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "failed to load job options");
        }

        self.commit(|form| match outcome {
            Ok(jobs) => form.job_options = jobs,
            Err(_) => {
                form.job_options.clear();
                form.error = Some(JOB_OPTIONS_FAILED_MESSAGE.to_string());
            }
        });
    }

    pub fn set_name(&self, name: &str) {
        self.form().draft.applicant_name = name.to_string();
    }

    pub fn set_email(&self, email: &str) {
        self.form().draft.applicant_email = email.to_string();
    }

    /// Picks a position from the loaded options. An id that is not on offer
    /// clears the selection and returns false.
    pub fn select_job(&self, job_id: &str) -> bool {
        let mut form = self.form();
        let job_id = job_id.trim();
        let offered = form
            .job_options
            .iter()
            .any(|job| job.id.to_string() == job_id);

        form.draft.selected_job_id = if offered {
            job_id.to_string()
        } else {
            String::new()
        };
        offered
    }

    /// Rejects files outside the allow-list as soon as they are picked.
    pub fn select_resume(&self, resume: ResumeFile) -> Result<(), ValidationError> {
        let mut form = self.form();
        if !resume.has_allowed_extension() {
            form.draft.resume = None;
            form.error = Some(ValidationError::UnsupportedFileType.to_string());
            return Err(ValidationError::UnsupportedFileType);
        }

        form.draft.resume = Some(resume);
        Ok(())
    }

    /// Validates the draft and, if it passes, sends exactly one upload.
    ///
    /// Field values are kept on both success and failure. A failed upload
    /// keeps the previous result and reports a generic message.
    pub async fn submit(&self) -> Result<ApplicationResult, SubmitError> {
        let submission = {
            let mut form = self.form();
            if form.busy {
                return Err(SubmitError::Busy);
            }

            match form.draft.validate(self.max_resume_bytes) {
                Ok(submission) => {
                    form.busy = true;
                    form.error = None;
                    submission
                }
                Err(err) => {
                    form.error = Some(err.to_string());
                    return Err(err.into());
                }
            }
        };

        tracing::info!(
            job_id = %submission.job_id,
            file = %submission.resume.file_name,
            bytes = submission.resume.len(),
            "submitting application"
        );

        let outcome = self.repository.submit_application(&submission).await;

        match &outcome {
            Ok(result) => tracing::info!(
                match_score = result.match_score,
                shortlisted = result.shortlisted,
                "application scored"
            ),
            Err(err) => tracing::warn!(
                error = %err,
                detail = err.detail().unwrap_or_default(),
                "application submission failed"
            ),
        }

        self.commit(|form| {
            form.busy = false;
            match &outcome {
                Ok(result) => form.result = Some(result.clone()),
                Err(_) => form.error = Some(SUBMISSION_FAILED_MESSAGE.to_string()),
            }
        });

        outcome.map_err(SubmitError::Portal)
    }

    fn form(&self) -> MutexGuard<'_, ApplicationForm> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, update: impl FnOnce(&mut ApplicationForm)) -> bool {
        if !self.mount.is_mounted() {
            tracing::debug!("application form no longer mounted, dropping update");
            return false;
        }

        update(&mut *self.form());
        true
    }
}
