// Recruitment analytics snapshot
use serde::{Deserialize, Serialize};

/// Aggregate figures computed by the portal API. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    #[serde(default)]
    pub total_candidates: Option<u64>,
    #[serde(default)]
    pub shortlisted: Option<u64>,
    #[serde(default)]
    pub avg_score: Option<f64>,
}

impl Analytics {
    #[cfg(test)]
    pub fn new(total_candidates: u64, shortlisted: u64, avg_score: f64) -> Self {
        Self {
            total_candidates: Some(total_candidates),
            shortlisted: Some(shortlisted),
            avg_score: Some(avg_score),
        }
    }
}

// A missing snapshot and a missing field both read as zero.
pub fn total_candidates(analytics: Option<&Analytics>) -> u64 {
    analytics.and_then(|a| a.total_candidates).unwrap_or(0)
}

pub fn shortlisted(analytics: Option<&Analytics>) -> u64 {
    analytics.and_then(|a| a.shortlisted).unwrap_or(0)
}

pub fn avg_score(analytics: Option<&Analytics>) -> f64 {
    analytics.and_then(|a| a.avg_score).unwrap_or(0.0)
}
