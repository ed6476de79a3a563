use crate::domain::application::DEFAULT_MAX_RESUME_BYTES;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8084";

#[derive(Debug, Deserialize, Clone)]
pub struct PortalConfig {
    pub api: ApiSettings,
    pub theme: ThemeSettings,
    pub upload: UploadSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// No timeout unless configured; reqwest's defaults apply.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeSettings {
    pub store_path: PathBuf,
    #[serde(default)]
    pub prefers_dark: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    pub max_resume_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

/// Defaults, then `config/portal.*` if present, then `PORTAL__SECTION__KEY` variables.
pub fn load_portal_config() -> anyhow::Result<PortalConfig> {
    let builder = with_defaults(config::Config::builder())?
        .add_source(File::with_name("config/portal").required(false))
        .add_source(
            Environment::with_prefix("PORTAL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    build(builder)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    builder
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("theme.store_path", ".portal-theme.toml")?
        .set_default("theme.prefers_dark", false)?
        .set_default("upload.max_resume_bytes", DEFAULT_MAX_RESUME_BYTES as u64)?
        .set_default("log.level", "info")
}

fn build(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<PortalConfig> {
    let mut config: PortalConfig = builder.build()?.try_deserialize()?;
    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(content: &str) -> PortalConfig {
        let builder = with_defaults(config::Config::builder())
            .unwrap()
            .add_source(File::from_str(content, FileFormat::Toml));
        build(builder).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("");

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.theme.store_path, PathBuf::from(".portal-theme.toml"));
        assert!(!config.theme.prefers_dark);
        assert_eq!(config.upload.max_resume_bytes, DEFAULT_MAX_RESUME_BYTES);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_file_overrides() {
        let config = from_toml(
            r#"
            [api]
            base_url = "https://hr.abcdbank.example/"
            timeout_secs = 30

            [theme]
            prefers_dark = true
            "#,
        );

        assert_eq!(config.api.base_url, "https://hr.abcdbank.example");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(30)));
        assert!(config.theme.prefers_dark);
        assert_eq!(config.log.level, "info");
    }
}
