use std::{fs, path::PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shared::domain::Theme;
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    #[serde(rename = "sv-theme")]
    theme: String,
}

/// Persists the light/dark preference as a single key in a TOML file.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Missing or unreadable preferences fall back to the dark theme.
    pub fn load(&self) -> Theme {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Theme::default();
        };
        let parsed = toml::from_str::<ThemeFile>(&raw)
            .map_err(anyhow::Error::from)
            .and_then(|file| Theme::parse(&file.theme).map_err(anyhow::Error::from));
        match parsed {
            Ok(theme) => theme,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ignoring stored theme preference");
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) -> anyhow::Result<()> {
        let raw = toml::to_string(&ThemeFile {
            theme: theme.as_str().to_string(),
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create theme directory '{}'", parent.display())
            })?;
        }
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write theme file '{}'", self.path.display()))
    }

    pub fn toggle(&self, current: Theme) -> anyhow::Result<Theme> {
        let next = current.toggled();
        self.save(next)?;
        Ok(next)
    }
}

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod tests;
