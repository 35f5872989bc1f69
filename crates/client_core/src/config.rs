use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const SETTINGS_FILE: &str = "cities.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

/// Settings from `cities.toml` in the working directory, then the environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(&default_settings_path(), |key| std::env::var(key).ok())
}

/// Later sources win: defaults, `settings_file`, `CITIES_BASE_URL`, `APP__BASE_URL`.
pub fn load_settings_from(
    settings_file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(v) = read_settings_file(settings_file)?.base_url {
        settings.base_url = v;
    }

    if let Some(v) = env("CITIES_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("APP__BASE_URL") {
        settings.base_url = v;
    }

    settings.base_url = normalize_base_url(&settings.base_url)?;
    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(FileSettings::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("invalid settings file '{}'", path.display()))
}

/// Trims the value, drops trailing slashes and checks it is an http(s) URL.
pub fn normalize_base_url(raw_base_url: &str) -> anyhow::Result<String> {
    let trimmed = raw_base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(Settings::default().base_url);
    }

    let parsed = Url::parse(trimmed).with_context(|| format!("invalid base url '{trimmed}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "unsupported base url scheme '{}' in '{trimmed}'",
            parsed.scheme()
        );
    }

    Ok(trimmed.to_string())
}

pub fn default_settings_path() -> PathBuf {
    PathBuf::from(SETTINGS_FILE)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
