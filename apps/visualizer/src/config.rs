use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use shared::{
    domain::{Algorithm, MagnitudeRange},
    error::ConfigError,
};
use sort_engine::{controller::clamp_size, pacer::clamp_speed, ControllerConfig};
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "sortviz.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub size: usize,
    pub speed: u8,
    pub algorithm: String,
    pub magnitude_min: u32,
    pub magnitude_max: u32,
    pub time_unit_ms: u64,
    pub seed: Option<u64>,
    pub theme_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: 30,
            speed: 5,
            algorithm: Algorithm::Bubble.name().into(),
            magnitude_min: 10,
            magnitude_max: 309,
            time_unit_ms: 1,
            seed: None,
            theme_file: PathBuf::from("sortviz-theme.toml"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    size: Option<usize>,
    speed: Option<u8>,
    algorithm: Option<String>,
    magnitude_min: Option<u32>,
    magnitude_max: Option<u32>,
    time_unit_ms: Option<u64>,
    seed: Option<u64>,
    theme_file: Option<PathBuf>,
}

impl Settings {
    /// Clamps size and speed the way the interactive controls do and builds
    /// the controller configuration.
    pub fn validate(&self) -> Result<ControllerConfig, ConfigError> {
        Ok(ControllerConfig {
            size: clamp_size(self.size),
            speed: clamp_speed(self.speed),
            algorithm: Algorithm::from_name(&self.algorithm),
            range: MagnitudeRange::new(self.magnitude_min, self.magnitude_max)?,
            time_unit: Duration::from_millis(self.time_unit_ms),
        })
    }

    fn merge_file(&mut self, file: FileSettings) {
        if let Some(v) = file.size {
            self.size = v;
        }
        if let Some(v) = file.speed {
            self.speed = v;
        }
        if let Some(v) = file.algorithm {
            self.algorithm = v;
        }
        if let Some(v) = file.magnitude_min {
            self.magnitude_min = v;
        }
        if let Some(v) = file.magnitude_max {
            self.magnitude_max = v;
        }
        if let Some(v) = file.time_unit_ms {
            self.time_unit_ms = v;
        }
        if file.seed.is_some() {
            self.seed = file.seed;
        }
        if let Some(v) = file.theme_file {
            self.theme_file = v;
        }
    }

    /// Applies `APP__*` overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = parsed(&lookup, "APP__SIZE") {
            self.size = v;
        }
        if let Some(v) = parsed(&lookup, "APP__SPEED") {
            self.speed = v;
        }
        if let Some(v) = lookup("APP__ALGORITHM") {
            self.algorithm = v;
        }
        if let Some(v) = parsed(&lookup, "APP__TIME_UNIT_MS") {
            self.time_unit_ms = v;
        }
        if let Some(v) = parsed(&lookup, "APP__SEED") {
            self.seed = Some(v);
        }
        if let Some(v) = lookup("APP__THEME_FILE") {
            self.theme_file = PathBuf::from(v);
        }
    }
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

/// Defaults, then the config file, then `APP__*` environment variables.
/// An explicitly named file must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(path) {
        Ok(raw) => {
            let file: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            settings.merge_file(file);
        }
        Err(error) if !required && error.kind() == std::io::ErrorKind::NotFound => {}
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
