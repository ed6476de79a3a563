// Job posting domain model
use serde::{Deserialize, Serialize};

const OPTION_REQUIREMENTS_PREVIEW: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
}

impl Job {
    #[cfg(test)]
    pub fn new(id: i64, title: &str, department: &str, description: &str, requirements: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            department: department.to_string(),
            description: description.to_string(),
            requirements: requirements.to_string(),
        }
    }

    /// Label shown for this job in the application form's position picker.
    pub fn option_label(&self) -> String {
        let preview: String = self
            .requirements
            .chars()
            .take(OPTION_REQUIREMENTS_PREVIEW)
            .collect();
        format!("{} • {} • {}...", self.title, self.department, preview)
    }
}
