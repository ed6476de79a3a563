// Dashboard domain model
use super::analytics::{self, Analytics};
use super::candidate::Candidate;
use super::job::Job;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// One independently fetched piece of dashboard state.
///
/// `data` holds the last good value or the empty default; `error` records
/// whether the most recent fetch for this slot failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slot<T> {
    pub data: T,
    pub error: Option<String>,
}

impl<T: Default> Slot<T> {
    pub fn succeed(&mut self, data: T) {
        self.data = data;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.data = T::default();
        self.error = Some(message.into());
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Jobs,
    Candidates,
    Analytics,
}

impl SlotKind {
    pub const ALL: [SlotKind; 3] = [SlotKind::Jobs, SlotKind::Candidates, SlotKind::Analytics];

    pub fn failure_message(self) -> &'static str {
        match self {
            SlotKind::Jobs => "Failed to load job listings",
            SlotKind::Candidates => "Failed to load candidates",
            SlotKind::Analytics => "Failed to load analytics",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKind::Jobs => "jobs",
            SlotKind::Candidates => "candidates",
            SlotKind::Analytics => "analytics",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let name = value.trim().to_ascii_lowercase();
        SlotKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| {
                format!("unknown dashboard section '{name}' (expected jobs, candidates or analytics)")
            })
    }
}

/// Headline figure shown above the job and candidate lists.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTile {
    pub title: &'static str,
    pub value: String,
}

impl MetricTile {
    fn new(title: &'static str, value: String) -> Self {
        Self { title, value }
    }
}

const ERROR_VALUE: &str = "Error";

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub jobs: Slot<Vec<Job>>,
    pub candidates: Slot<Vec<Candidate>>,
    pub analytics: Slot<Option<Analytics>>,
    /// Aggregate gate: true until every slot of the current load has settled.
    pub loading: bool,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            jobs: Slot::default(),
            candidates: Slot::default(),
            analytics: Slot::default(),
            loading: true,
            refreshed_at: None,
        }
    }

    pub fn slot_error(&self, kind: SlotKind) -> Option<&str> {
        match kind {
            SlotKind::Jobs => self.jobs.error.as_deref(),
            SlotKind::Candidates => self.candidates.error.as_deref(),
            SlotKind::Analytics => self.analytics.error.as_deref(),
        }
    }

    pub fn metric_tiles(&self) -> Vec<MetricTile> {
        let stats = self.analytics.data.as_ref();
        let analytics_failed = self.analytics.is_failed();

        let guarded = |value: String| {
            if analytics_failed {
                ERROR_VALUE.to_string()
            } else {
                value
            }
        };

        vec![
            MetricTile::new(
                "Total Applications",
                guarded(analytics::total_candidates(stats).to_string()),
            ),
            MetricTile::new(
                "Shortlisted",
                guarded(analytics::shortlisted(stats).to_string()),
            ),
            MetricTile::new(
                "Avg Match Score",
                guarded(format!("{:.1}%", analytics::avg_score(stats))),
            ),
            MetricTile::new(
                "Active Jobs",
                if self.jobs.is_failed() {
                    ERROR_VALUE.to_string()
                } else {
                    self.jobs.data.len().to_string()
                },
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_failure_resets_data() {
        let mut slot = Slot::default();
        slot.succeed(vec![Job::new(1, "Teller", "Retail", "", "")]);
        assert!(!slot.is_failed());

        slot.fail(SlotKind::Jobs.failure_message());

        assert!(slot.data.is_empty());
        assert_eq!(slot.error.as_deref(), Some("Failed to load job listings"));

        slot.succeed(vec![Job::new(2, "Auditor", "Finance", "", "")]);
        assert_eq!(slot.error, None);
        assert_eq!(slot.data[0].id, 2);
    }

    #[test]
    fn test_metric_tiles_format_average() {
        let mut dashboard = Dashboard::new();
        dashboard.analytics.succeed(Some(Analytics::new(40, 9, 71.26)));
        dashboard.jobs.succeed(vec![Job::new(1, "Teller", "Retail", "", "")]);

        let tiles = dashboard.metric_tiles();

        assert_eq!(tiles[0].value, "40");
        assert_eq!(tiles[1].value, "9");
        assert_eq!(tiles[2].value, "71.3%");
        assert_eq!(tiles[3].value, "1");
    }

    #[test]
    fn test_metric_tiles_default_to_zero_without_snapshot() {
        let dashboard = Dashboard::new();

        let tiles = dashboard.metric_tiles();

        assert_eq!(tiles[0].value, "0");
        assert_eq!(tiles[2].value, "0.0%");
    }

    #[test]
    fn test_metric_tiles_flag_failed_slots_only() {
        let mut dashboard = Dashboard::new();
        dashboard.analytics.fail(SlotKind::Analytics.failure_message());
        dashboard.jobs.succeed(vec![Job::new(1, "Teller", "Retail", "", "")]);

        let values: Vec<String> = dashboard.metric_tiles().into_iter().map(|t| t.value).collect();

        assert_eq!(values, ["Error", "Error", "Error", "1"]);
    }

    #[test]
    fn test_slot_kind_parsing() {
        assert_eq!("Candidates".parse::<SlotKind>(), Ok(SlotKind::Candidates));
        assert!("payroll".parse::<SlotKind>().is_err());
    }
}
