// Theme preference - Process-wide display theme with write-back on every change
use crate::domain::theme::Theme;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("failed to access theme store {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("theme store is corrupt: {0}")]
    Parse(String),
    #[error("failed to encode theme: {0}")]
    Encode(String),
    #[error("theme preference already initialized")]
    AlreadyInstalled,
}

/// Where the chosen theme survives between runs.
pub trait ThemeStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Theme>, ThemeError>;
    fn save(&self, theme: Theme) -> Result<(), ThemeError>;
}

pub struct ThemePreference {
    store: Box<dyn ThemeStore>,
    current: Mutex<Theme>,
}

impl ThemePreference {
    /// Reads the stored theme once. Falls back to the system preference when
    /// nothing is stored or the store cannot be read.
    pub fn initialize(store: Box<dyn ThemeStore>, prefers_dark: bool) -> Self {
        let theme = match store.load() {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::from_system(prefers_dark),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable theme store");
                Theme::from_system(prefers_dark)
            }
        };

        Self {
            store,
            current: Mutex::new(theme),
        }
    }

    pub fn current(&self) -> Theme {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, theme: Theme) -> Result<Theme, ThemeError> {
        self.update(|_| theme)
    }

    pub fn toggle(&self) -> Result<Theme, ThemeError> {
        self.update(Theme::toggled)
    }

    // Persists first; the in-memory value only changes once the write
    // succeeded. The guard spans read, save and write so concurrent changes
    // serialize.
    fn update(&self, change: impl FnOnce(Theme) -> Theme) -> Result<Theme, ThemeError> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let theme = change(*current);
        self.store.save(theme)?;
        *current = theme;
        tracing::debug!(%theme, "theme updated");
        Ok(theme)
    }
}

static PREFERENCE: OnceLock<ThemePreference> = OnceLock::new();

/// Installs the process-wide preference. Only the first call succeeds.
pub fn install(preference: ThemePreference) -> Result<&'static ThemePreference, ThemeError> {
    PREFERENCE
        .set(preference)
        .map_err(|_| ThemeError::AlreadyInstalled)?;
    PREFERENCE.get().ok_or(ThemeError::AlreadyInstalled)
}

pub fn global() -> Option<&'static ThemePreference> {
    PREFERENCE.get()
}
