// Plain-text rendering of portal views
use crate::application::application_service::ApplicationForm;
use crate::domain::application::{ApplicationResult, size_label};
use crate::domain::candidate::Candidate;
use crate::domain::dashboard::{Dashboard, SlotKind};
use crate::domain::job::Job;
use crate::domain::theme::Theme;
use crate::domain::view::View;

const CANDIDATE_SKILL_PREVIEW: usize = 3;

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn render_header(current: View, theme: Option<Theme>) -> String {
    let nav: Vec<String> = [View::Dashboard, View::Apply]
        .into_iter()
        .map(|view| {
            if view == current {
                format!("[{}]", view.title())
            } else {
                format!(" {} ", view.title())
            }
        })
        .collect();

    let mut header = format!("ABCD Bank HR | Recruitment Portal    {}", nav.join(" "));
    if let Some(theme) = theme {
        header.push_str(&format!("    theme: {theme}"));
    }
    header
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    if dashboard.loading {
        return "Loading dashboard...".to_string();
    }

    let mut lines = Vec::new();

    let tiles: Vec<String> = dashboard
        .metric_tiles()
        .into_iter()
        .map(|tile| format!("{}: {}", tile.title, tile.value))
        .collect();
    lines.push(tiles.join(" | "));
    lines.push(String::new());

    let positions = match dashboard.jobs.error {
        Some(_) => "Error".to_string(),
        None => format!("{} positions", dashboard.jobs.data.len()),
    };
    lines.push(format!("Active Job Postings ({positions})"));
    match dashboard.slot_error(SlotKind::Jobs) {
        Some(error) => lines.extend(retry_lines(error, SlotKind::Jobs)),
        None if dashboard.jobs.data.is_empty() => lines.push("  No jobs available.".to_string()),
        None => lines.extend(dashboard.jobs.data.iter().flat_map(job_lines)),
    }
    lines.push(String::new());

    lines.push("Shortlisted Candidates".to_string());
    match dashboard.slot_error(SlotKind::Candidates) {
        Some(error) => lines.extend(retry_lines(error, SlotKind::Candidates)),
        None if dashboard.candidates.data.is_empty() => {
            lines.push("  No candidates shortlisted yet".to_string());
            lines.push(
                "  Candidates will appear once they meet the 70% match threshold.".to_string(),
            );
        }
        None => lines.extend(dashboard.candidates.data.iter().map(candidate_line)),
    }

    if let Some(error) = dashboard.slot_error(SlotKind::Analytics) {
        lines.push(String::new());
        lines.extend(retry_lines(error, SlotKind::Analytics));
    }

    if let Some(refreshed_at) = dashboard.refreshed_at {
        lines.push(String::new());
        lines.push(format!(
            "Last refreshed {}",
            refreshed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    lines.join("\n")
}

fn retry_lines(error: &str, slot: SlotKind) -> Vec<String> {
    vec![
        format!("  ! {error}"),
        format!("    Retry with `retry {slot}`"),
    ]
}

fn job_lines(job: &Job) -> Vec<String> {
    vec![
        format!("  - #{} {} [{}]  Active", job.id, job.title, job.department),
        format!("      {}", job.description),
        format!("      Requirements: {}", job.requirements),
    ]
}

fn candidate_line(candidate: &Candidate) -> String {
    let score = candidate
        .match_score
        .map(|score| format!("{} Match", format_percent(score)))
        .unwrap_or_else(|| "N/A".to_string());

    let skills = if candidate.skills.is_empty() {
        "N/A".to_string()
    } else {
        candidate.top_skills(CANDIDATE_SKILL_PREVIEW).join(", ")
    };

    format!(
        "  - {} <{}>  Applied for: {}  {}  {}",
        candidate.name,
        candidate.email,
        candidate.job_title.as_deref().unwrap_or("N/A"),
        score,
        skills
    )
}

pub fn render_application(form: &ApplicationForm, max_resume_bytes: usize) -> String {
    let mut lines = vec![
        "Join ABCD Bank".to_string(),
        "Apply for open positions and start your banking career".to_string(),
        String::new(),
    ];

    if let Some(error) = &form.error {
        lines.push(format!("! {error}"));
        lines.push(String::new());
    }

    let draft = &form.draft;
    lines.push(format!("Full Name:      {}", or_placeholder(&draft.applicant_name, "Enter your full name")));
    lines.push(format!(
        "Email Address:  {}",
        or_placeholder(&draft.applicant_email, "your.email@example.com")
    ));

    let position = form
        .job_options
        .iter()
        .find(|job| job.id.to_string() == draft.selected_job_id)
        .map(Job::option_label)
        .unwrap_or_else(|| "Select a position to apply for".to_string());
    lines.push(format!("Position:       {position}"));

    let resume = draft
        .resume
        .as_ref()
        .map(|resume| resume.file_name.clone())
        .unwrap_or_else(|| {
            format!(
                "No resume selected (PDF, DOC, DOCX, or TXT, max {})",
                size_label(&max_resume_bytes)
            )
        });
    lines.push(format!("Resume:         {resume}"));
    lines.push(String::new());

    lines.push("Available Positions".to_string());
    if form.job_options.is_empty() {
        lines.push("  (none)".to_string());
    }
    for job in &form.job_options {
        lines.push(format!("  {}) {}", job.id, job.option_label()));
    }

    if form.busy {
        lines.push(String::new());
        lines.push("Processing Application...".to_string());
    }

    if let Some(result) = &form.result {
        lines.push(String::new());
        lines.push(render_result(result));
    }

    lines.join("\n")
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

pub fn render_result(result: &ApplicationResult) -> String {
    let mut lines = vec![
        "Application Results".to_string(),
        format!("  Match Score: {}", format_percent(result.match_score)),
        format!("  Status:      {}", result.status_label()),
        format!("  Next Steps:  {}", result.next_steps()),
        format!("  Strengths:   {}", result.strengths.join(", ")),
    ];

    if result.is_perfect_match() {
        lines.push("  Perfect Match!".to_string());
        lines.push("  Your profile matches all requirements!".to_string());
    } else {
        lines.push(format!(
            "  Recommended Skills: {}",
            result.missing_skills.join(", ")
        ));
    }

    lines.join("\n")
}
