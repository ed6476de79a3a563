// Main entry point - Configuration, logging and command dispatch
mod application;
mod domain;
mod infrastructure;
mod presentation;

use crate::application::theme_preference::{self, ThemePreference};
use crate::infrastructure::config::load_portal_config;
use crate::infrastructure::telemetry;
use crate::infrastructure::theme_store::TomlThemeStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_portal_config()?;

    // Initialize tracing
    telemetry::init(&config.log)?;

    // Restore the saved theme before anything renders
    let store = TomlThemeStore::new(config.theme.store_path.clone());
    theme_preference::install(ThemePreference::initialize(
        Box::new(store),
        config.theme.prefers_dark,
    ))?;

    presentation::cli::run(config).await
}
