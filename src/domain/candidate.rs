// Candidate domain model
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "job__title", default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub match_score: Option<f64>,
    #[serde(default, deserialize_with = "skills_or_empty")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub shortlisted: bool,
}

impl Candidate {
    #[cfg(test)]
    pub fn new(id: i64, name: &str, shortlisted: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: String::new(),
            job_title: None,
            match_score: None,
            skills: Vec::new(),
            shortlisted,
        }
    }

    /// Up to `limit` skills, in server order.
    pub fn top_skills(&self, limit: usize) -> &[String] {
        &self.skills[..self.skills.len().min(limit)]
    }
}

/// Keeps only candidates flagged as shortlisted by the scoring service.
pub fn retain_shortlisted(candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.into_iter().filter(|c| c.shortlisted).collect()
}

// The scoring service stores skills as free-form JSON; anything that is not an
// array of strings is treated as "no skills".
fn skills_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let skills = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };
    Ok(skills)
}
