use crate::application::application_service::ApplicationService;
use crate::application::dashboard_service::DashboardService;
use crate::application::portal_repository::PortalRepository;
use crate::application::theme_preference;
use crate::application::view_controller::MountToken;
use crate::domain::application::ResumeFile;
use crate::infrastructure::config::PortalConfig;
use crate::infrastructure::http_repository::HttpPortalRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::{render, shell};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "portal",
    about = "ABCD Bank recruitment portal: browse open positions and shortlisted candidates, or apply with a resume",
    version
)]
struct Cli {
    /// Override the configured portal API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive session with the dashboard and application views (default command)
    Shell,
    /// Load the dashboard once and print it
    Dashboard,
    /// Submit an application without entering the interactive session
    Apply(ApplyArgs),
    /// Show or toggle the display theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Args, Debug)]
struct ApplyArgs {
    /// Applicant's full name
    #[arg(long)]
    name: String,
    /// Applicant's email address
    #[arg(long)]
    email: String,
    /// Id of the job posting to apply for
    #[arg(long)]
    job_id: String,
    /// Resume file (pdf, txt, doc or docx)
    #[arg(long)]
    resume: PathBuf,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

pub async fn run(mut config: PortalConfig) -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url.trim_end_matches('/').to_string();
    }

    match cli.command.unwrap_or(Command::Shell) {
        Command::Theme { action } => run_theme(action.unwrap_or(ThemeAction::Show)),
        Command::Shell => {
            let mut state = AppState::new(repository(&config)?, config.upload.max_resume_bytes);
            shell::run(&mut state, theme_preference::global()).await
        }
        Command::Dashboard => run_dashboard(repository(&config)?).await,
        Command::Apply(args) => {
            run_apply(repository(&config)?, config.upload.max_resume_bytes, args).await
        }
    }
}

fn repository(config: &PortalConfig) -> anyhow::Result<Arc<dyn PortalRepository>> {
    tracing::debug!(base_url = %config.api.base_url, "using portal API");
    let repository = HttpPortalRepository::new(&config.api.base_url, config.api.timeout())?;
    Ok(Arc::new(repository))
}

async fn run_dashboard(repository: Arc<dyn PortalRepository>) -> anyhow::Result<()> {
    let dashboard = DashboardService::new(repository, MountToken::detached());
    dashboard.load().await;
    println!("{}", render::render_dashboard(&dashboard.snapshot()));
    Ok(())
}

async fn run_apply(
    repository: Arc<dyn PortalRepository>,
    max_resume_bytes: usize,
    args: ApplyArgs,
) -> anyhow::Result<()> {
    let form = ApplicationService::new(repository, MountToken::detached(), max_resume_bytes);
    form.load_job_options().await;

    form.set_name(&args.name);
    form.set_email(&args.email);
    if !form.select_job(&args.job_id) {
        tracing::warn!(job_id = %args.job_id, "job is not among the open positions");
    }
    form.select_resume(read_resume(&args.resume).await?)?;

    let result = form.submit().await?;
    println!("{}", render::render_result(&result));
    Ok(())
}

fn run_theme(action: ThemeAction) -> anyhow::Result<()> {
    let preference =
        theme_preference::global().context("theme preference has not been initialized")?;

    let theme = match action {
        ThemeAction::Show => preference.current(),
        ThemeAction::Toggle => preference.toggle()?,
    };
    println!("{theme}");
    Ok(())
}

/// Reads a resume from disk, naming it after the file's own name.
pub(crate) async fn read_resume(path: &Path) -> anyhow::Result<ResumeFile> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read resume: {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file: {}", path.display()))?;

    let resume = ResumeFile::new(file_name, content);
    if resume.is_empty() {
        tracing::warn!(file = %resume.file_name, "resume file is empty");
    }
    Ok(resume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_arguments() {
        let cli = Cli::try_parse_from([
            "portal",
            "--api-url",
            "http://portal.internal:8084/",
            "apply",
            "--name",
            "Yonas Kebede",
            "--email",
            "yonas@example.com",
            "--job-id",
            "5",
            "--resume",
            "cv.pdf",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://portal.internal:8084/"));
        match cli.command {
            Some(Command::Apply(args)) => {
                assert_eq!(args.job_id, "5");
                assert_eq!(args.resume, PathBuf::from("cv.pdf"));
            }
            other => panic!("expected apply command, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_to_shell() {
        let cli = Cli::try_parse_from(["portal"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[tokio::test]
    async fn test_read_resume_uses_file_name() {
        let dir = std::env::temp_dir().join(format!("portal-resume-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Hirut_CV.PDF");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let resume = read_resume(&path).await.unwrap();

        assert_eq!(resume.file_name, "Hirut_CV.PDF");
        assert!(resume.has_allowed_extension());
        assert!(read_resume(&dir.join("missing.pdf")).await.is_err());
    }
}
