use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

use crate::state::{GridShape, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, MAX_GRID_DIM};

pub const DEFAULT_ENDPOINT: &str = "http://www.raydelto.org/agenda.php";
pub const DEFAULT_CONFIG_FILE: &str = "contacts.toml";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// Zero disables the timeout.
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            grid_rows: DEFAULT_GRID_ROWS,
            grid_cols: DEFAULT_GRID_COLS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint: Option<String>,
    grid_rows: Option<usize>,
    grid_cols: Option<usize>,
    request_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn endpoint_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(self.endpoint.trim())
            .with_context(|| format!("invalid contacts endpoint '{}'", self.endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "contacts endpoint '{}' must use http or https",
                self.endpoint
            );
        }
        Ok(url)
    }

    pub fn grid(&self) -> GridShape {
        GridShape::new(self.grid_rows, self.grid_cols)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Rejects settings the directory cannot start with.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.endpoint_url()?;
        if self.grid_rows == 0 || self.grid_cols == 0 {
            bail!(
                "grid must have at least one row and one column (got {}x{})",
                self.grid_rows,
                self.grid_cols
            );
        }
        if self.grid_rows > MAX_GRID_DIM || self.grid_cols > MAX_GRID_DIM {
            bail!(
                "grid is limited to {MAX_GRID_DIM} rows and {MAX_GRID_DIM} columns (got {}x{})",
                self.grid_rows,
                self.grid_cols
            );
        }
        Ok(())
    }
}

/// Defaults, then the TOML file, then environment variables. An explicit
/// `path` must exist; the default `contacts.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(path, |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (file, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if let Some(file_cfg) = read_file_settings(&file, required)? {
        if let Some(v) = file_cfg.endpoint {
            settings.endpoint = v;
        }
        if let Some(v) = file_cfg.grid_rows {
            settings.grid_rows = v;
        }
        if let Some(v) = file_cfg.grid_cols {
            settings.grid_cols = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            settings.request_timeout_secs = v;
        }
    }

    if let Some(v) = env("CONTACTS_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = env("APP__ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = env("APP__GRID_ROWS") {
        settings.grid_rows = parse_env("APP__GRID_ROWS", &v)?;
    }
    if let Some(v) = env("APP__GRID_COLS") {
        settings.grid_cols = parse_env("APP__GRID_COLS", &v)?;
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = parse_env("APP__REQUEST_TIMEOUT_SECS", &v)?;
    }

    Ok(settings)
}

fn read_file_settings(path: &Path, required: bool) -> anyhow::Result<Option<FileSettings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound && !required => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };
    let parsed = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn parse_env<T>(name: &str, raw: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{name} must be a non-negative integer, got '{raw}'"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
