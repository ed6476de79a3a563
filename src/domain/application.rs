// Application draft, validation rules and scored result
use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const ALLOWED_RESUME_EXTENSIONS: [&str; 4] = ["pdf", "txt", "doc", "docx"];

/// Largest resume the portal accepts by default (5 MiB).
pub const DEFAULT_MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

const BYTES_PER_KB: usize = 1024;
const BYTES_PER_MB: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields and upload a resume")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please upload PDF, TXT, DOC, or DOCX files only")]
    UnsupportedFileType,
    #[error("Resume must be {} or smaller", size_label(.limit_bytes))]
    ResumeTooLarge { limit_bytes: usize },
}

/// Human-readable upload limit: whole megabytes as `5MB`, fractions as
/// `1.5MB`, anything under a megabyte in `KB` or bytes.
pub fn size_label(bytes: &usize) -> String {
    let bytes = *bytes;
    if bytes >= BYTES_PER_MB {
        if bytes % BYTES_PER_MB == 0 {
            format!("{}MB", bytes / BYTES_PER_MB)
        } else {
            format!("{:.1}MB", bytes as f64 / BYTES_PER_MB as f64)
        }
    } else if bytes >= BYTES_PER_KB {
        format!("{}KB", bytes / BYTES_PER_KB)
    } else {
        format!("{bytes}B")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Lower-cased text after the last `.` of the file name.
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.file_name)
    }

    pub fn has_allowed_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ALLOWED_RESUME_EXTENSIONS.contains(&ext.as_str()))
    }

    pub fn content_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("pdf") => "application/pdf",
            Some("txt") => "text/plain",
            Some("doc") => "application/msword",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            _ => "application/octet-stream",
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

fn file_extension(file_name: &str) -> Option<String> {
    file_name
        .rfind('.')
        .map(|idx| file_name[idx + 1..].to_ascii_lowercase())
}

/// Loose address check: one `@`, something before it, and a dotted domain
/// with text on both sides of some `.`. Whitespace is never allowed.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(idx, c)| c == '.' && idx > 0 && idx + 1 < domain.len())
}

/// Fields collected by the application form. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationDraft {
    pub applicant_name: String,
    pub applicant_email: String,
    pub selected_job_id: String,
    pub resume: Option<ResumeFile>,
}

/// A draft that passed every client-side check, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationSubmission {
    pub job_id: String,
    pub name: String,
    pub email: String,
    pub resume: ResumeFile,
}

impl ApplicationDraft {
    /// Checks run in order; the first failure wins.
    pub fn validate(&self, max_resume_bytes: usize) -> Result<ApplicationSubmission, ValidationError> {
        let name = self.applicant_name.trim();
        let email = self.applicant_email.trim();
        let job_id = self.selected_job_id.trim();

        let resume = match &self.resume {
            Some(resume) if !resume.file_name.trim().is_empty() => resume,
            _ => return Err(ValidationError::MissingFields),
        };

        if name.is_empty() || email.is_empty() || job_id.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        if !resume.has_allowed_extension() {
            return Err(ValidationError::UnsupportedFileType);
        }

        if resume.len() > max_resume_bytes {
            return Err(ValidationError::ResumeTooLarge {
                limit_bytes: max_resume_bytes,
            });
        }

        Ok(ApplicationSubmission {
            job_id: job_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            resume: resume.clone(),
        })
    }
}

/// Scored outcome returned by the portal for a submitted application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationResult {
    #[serde(default)]
    pub candidate_id: Option<i64>,
    pub match_score: f64,
    #[serde(default)]
    pub shortlisted: bool,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

impl ApplicationResult {
    pub fn status_label(&self) -> &'static str {
        if self.shortlisted {
            "Shortlisted"
        } else {
            "Not Selected"
        }
    }

    pub fn next_steps(&self) -> &'static str {
        if self.shortlisted {
            "Interview Scheduled"
        } else {
            "Review Feedback"
        }
    }

    pub fn is_perfect_match(&self) -> bool {
        self.missing_skills.is_empty()
    }
}
