// Interactive portal session
use crate::application::theme_preference::ThemePreference;
use crate::domain::dashboard::SlotKind;
use crate::domain::view::View;
use crate::presentation::app_state::{ActiveView, AppState};
use crate::presentation::cli::read_resume;
use crate::presentation::render;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  dashboard | apply          switch view
  show                       redraw the current view
  refresh                    reload every dashboard section
  retry <section>            reload one dashboard section (jobs, candidates, analytics)
  name <full name>           set applicant name
  email <address>            set applicant email
  job <id>                   choose a position
  resume <path>              attach a resume (pdf, txt, doc, docx)
  submit                     send the application
  theme                      toggle light/dark theme
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Navigate(View),
    Show,
    Refresh,
    Retry(SlotKind),
    Name(String),
    Email(String),
    Job(String),
    Resume(PathBuf),
    Submit,
    Theme,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, argument) = match line.split_once(char::is_whitespace) {
            Some((verb, argument)) => (verb, argument.trim()),
            None => (line, ""),
        };

        let required = |what: &str| {
            if argument.is_empty() {
                Err(format!("`{verb}` needs {what}"))
            } else {
                Ok(argument.to_string())
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "" | "show" => Ok(ShellCommand::Show),
            "dashboard" | "apply" => verb.parse().map(ShellCommand::Navigate),
            "refresh" => Ok(ShellCommand::Refresh),
            "retry" => argument.parse().map(ShellCommand::Retry),
            // Name and email may be cleared by passing nothing.
            "name" => Ok(ShellCommand::Name(argument.to_string())),
            "email" => Ok(ShellCommand::Email(argument.to_string())),
            "job" => required("a job id").map(ShellCommand::Job),
            "resume" => required("a file path").map(|path| ShellCommand::Resume(PathBuf::from(path))),
            "submit" => Ok(ShellCommand::Submit),
            "theme" => Ok(ShellCommand::Theme),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command '{other}', type `help` for a list")),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

pub async fn run(state: &mut AppState, theme: Option<&ThemePreference>) -> anyhow::Result<()> {
    state.activate().await?;
    print_view(state, theme);
    println!("\n{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        if let Flow::Quit = dispatch(state, theme, command).await? {
            break;
        }
    }

    Ok(())
}

async fn dispatch(
    state: &mut AppState,
    theme: Option<&ThemePreference>,
    command: ShellCommand,
) -> anyhow::Result<Flow> {
    let active = state.active().clone();
    match (command, active) {
        (ShellCommand::Quit, _) => return Ok(Flow::Quit),
        (ShellCommand::Help, _) => {
            println!("{HELP}");
            return Ok(Flow::Continue);
        }
        (ShellCommand::Show, _) => {}
        (ShellCommand::Navigate(view), _) => {
            if let Some(initial_load) = state.navigate(view) {
                initial_load.await?;
            }
        }
        (ShellCommand::Theme, _) => match theme {
            Some(preference) => match preference.toggle() {
                Ok(next) => println!("Theme set to {next}"),
                Err(err) => println!("Could not save theme: {err}"),
            },
            None => println!("Theme preference is unavailable"),
        },
        (ShellCommand::Refresh, ActiveView::Dashboard(dashboard)) => dashboard.load().await,
        (ShellCommand::Retry(slot), ActiveView::Dashboard(dashboard)) => dashboard.retry(slot).await,
        (ShellCommand::Name(name), ActiveView::Apply(form)) => form.set_name(&name),
        (ShellCommand::Email(email), ActiveView::Apply(form)) => form.set_email(&email),
        (ShellCommand::Job(job_id), ActiveView::Apply(form)) => {
            if !form.select_job(&job_id) {
                println!("Position {job_id} is not open for applications");
            }
        }
        (ShellCommand::Resume(path), ActiveView::Apply(form)) => match read_resume(&path).await {
            // Rejections are recorded on the form and shown below.
            Ok(resume) => {
                let _ = form.select_resume(resume);
            }
            Err(err) => println!("{err:#}"),
        },
        (ShellCommand::Submit, ActiveView::Apply(form)) => {
            println!("Processing Application...");
            // Outcome is rendered from the form state.
            let _ = form.submit().await;
        }
        (ShellCommand::Refresh | ShellCommand::Retry(_), ActiveView::Apply(_)) => {
            println!("Switch to the dashboard first (`dashboard`)");
            return Ok(Flow::Continue);
        }
        (_, ActiveView::Dashboard(_)) => {
            println!("Switch to the application form first (`apply`)");
            return Ok(Flow::Continue);
        }
    }

    print_view(state, theme);
    Ok(Flow::Continue)
}

fn print_view(state: &AppState, theme: Option<&ThemePreference>) {
    println!(
        "{}\n",
        render::render_header(state.current_view(), theme.map(ThemePreference::current))
    );
    match state.active() {
        ActiveView::Dashboard(dashboard) => println!("{}", render::render_dashboard(&dashboard.snapshot())),
        ActiveView::Apply(form) => println!(
            "{}",
            render::render_application(&form.snapshot(), form.max_resume_bytes())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("apply".parse(), Ok(ShellCommand::Navigate(View::Apply)));
        assert_eq!("".parse(), Ok(ShellCommand::Show));
        assert_eq!(
            "retry candidates".parse(),
            Ok(ShellCommand::Retry(SlotKind::Candidates))
        );
        assert_eq!(
            "name  Hirut  Alemu ".parse(),
            Ok(ShellCommand::Name("Hirut  Alemu".to_string()))
        );
        assert_eq!(
            "resume ~/cv/hirut.pdf".parse(),
            Ok(ShellCommand::Resume(PathBuf::from("~/cv/hirut.pdf")))
        );
        assert_eq!("EXIT".parse(), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!("retry payroll".parse::<ShellCommand>().is_err());
        assert!("job".parse::<ShellCommand>().is_err());
        assert!("launch".parse::<ShellCommand>().is_err());
    }
}
