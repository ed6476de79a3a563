// TOML-backed theme store
use crate::application::theme_preference::{ThemeError, ThemeStore};
use crate::domain::theme::Theme;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    theme: String,
}

#[derive(Debug, Clone)]
pub struct TomlThemeStore {
    path: PathBuf,
}

impl TomlThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> ThemeError {
        ThemeError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ThemeStore for TomlThemeStore {
    fn load(&self) -> Result<Option<Theme>, ThemeError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };

        let file: ThemeFile =
            toml::from_str(&content).map_err(|err| ThemeError::Parse(err.to_string()))?;
        file.theme.parse().map(Some).map_err(ThemeError::Parse)
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        let file = ThemeFile {
            theme: theme.as_str().to_string(),
        };
        let content = toml::to_string(&file).map_err(|err| ThemeError::Encode(err.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        std::fs::write(&self.path, content).map_err(|err| self.io_error(err))
    }
}
