// Portal API repository over HTTP/JSON and multipart
use crate::application::portal_repository::{PortalError, PortalRepository};
use crate::domain::analytics::Analytics;
use crate::domain::application::{ApplicationResult, ApplicationSubmission};
use crate::domain::candidate::Candidate;
use crate::domain::job::Job;
use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

const JOBS_ENDPOINT: &str = "/api/jobs/";
const CANDIDATES_ENDPOINT: &str = "/api/candidates/";
const ANALYTICS_ENDPOINT: &str = "/api/analytics/";
const PROCESS_APPLICATION_ENDPOINT: &str = "/api/process-application/";

#[derive(Debug, Clone)]
pub struct HttpPortalRepository {
    client: reqwest::Client,
    base_url: String,
}

// Listing endpoints wrap their arrays; a missing or null array reads as empty.
#[derive(Debug, Default, Deserialize)]
struct JobsEnvelope {
    #[serde(default)]
    jobs: Option<Vec<Job>>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatesEnvelope {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpPortalRepository {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get(&self, endpoint: &str) -> Result<Bytes, PortalError> {
        let url = self.url(endpoint);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| transport(endpoint, err))?;

        read_body(endpoint, response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, PortalError> {
        let body = self.get(endpoint).await?;
        decode(endpoint, &body)
    }

    async fn get_listing<T: DeserializeOwned + Default>(
        &self,
        endpoint: &str,
    ) -> Result<T, PortalError> {
        let body = self.get(endpoint).await?;
        decode_listing(endpoint, &body)
    }
}

async fn read_body(endpoint: &str, response: reqwest::Response) -> Result<Bytes, PortalError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|err| transport(endpoint, err))?;

    if !status.is_success() {
        return Err(PortalError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }

    Ok(body)
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<T, PortalError> {
    serde_json::from_slice(body).map_err(|err| PortalError::Decode {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    })
}

/// A reachable listing endpoint whose body is not a JSON object yields the
/// empty envelope. Malformed entries inside the array are still decode errors.
fn decode_listing<T: DeserializeOwned + Default>(
    endpoint: &str,
    body: &[u8],
) -> Result<T, PortalError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => {
            serde_json::from_value(value).map_err(|err| PortalError::Decode {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            })
        }
        _ => {
            tracing::warn!(endpoint, "listing body is not a JSON object, reading as empty");
            Ok(T::default())
        }
    }
}

/// Prefers the API's `{"error": "..."}` message, else the raw body text.
fn error_detail(body: &[u8]) -> Option<String> {
    if let Ok(ErrorBody { error: Some(error) }) = serde_json::from_slice::<ErrorBody>(body) {
        return Some(error);
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn transport(endpoint: &str, err: reqwest::Error) -> PortalError {
    PortalError::Transport {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl PortalRepository for HttpPortalRepository {
    async fn list_jobs(&self) -> Result<Vec<Job>, PortalError> {
        let envelope: JobsEnvelope = self.get_listing(JOBS_ENDPOINT).await?;
        let jobs = envelope.jobs.unwrap_or_default();
        tracing::debug!(count = jobs.len(), "jobs loaded");
        Ok(jobs)
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, PortalError> {
        let envelope: CandidatesEnvelope = self.get_listing(CANDIDATES_ENDPOINT).await?;
        let candidates = envelope.candidates.unwrap_or_default();
        tracing::debug!(count = candidates.len(), "candidates loaded");
        Ok(candidates)
    }

    async fn analytics(&self) -> Result<Analytics, PortalError> {
        self.get_json(ANALYTICS_ENDPOINT).await
    }

    async fn submit_application(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<ApplicationResult, PortalError> {
        let endpoint = PROCESS_APPLICATION_ENDPOINT;
        let resume = &submission.resume;

        let part = Part::stream_with_length(resume.content.clone(), resume.len() as u64)
            .file_name(resume.file_name.clone())
            .mime_str(resume.content_type())
            .map_err(|err| transport(endpoint, err))?;

        let form = Form::new()
            .part("resume", part)
            .text("job_id", submission.job_id.clone())
            .text("name", submission.name.clone())
            .text("email", submission.email.clone());

        let url = self.url(endpoint);
        tracing::debug!(%url, "POST multipart");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| transport(endpoint, err))?;

        let body = read_body(endpoint, response).await?;
        decode(endpoint, &body)
    }
}
