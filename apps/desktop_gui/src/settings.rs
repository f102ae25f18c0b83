use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::Parser;
use client_core::DEFAULT_ENDPOINT_URL;
use serde::Deserialize;
use url::Url;

pub const SETTINGS_FILE_NAME: &str = "tccr_workbench.toml";
const ENDPOINT_ENV_VARS: [&str; 2] = ["TCCR_ENDPOINT_URL", "APP__ENDPOINT_URL"];

#[derive(Parser, Debug, Default)]
#[command(about = "TCCR change hypothesis and Sense Circulation Map workbench")]
pub struct Args {
    /// Generation endpoint; overrides the settings file and environment.
    #[arg(long)]
    pub endpoint_url: Option<String>,
    /// Start from the filled-in school case instead of an empty form.
    #[arg(long)]
    pub example: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint_url: Option<String>,
}

pub fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let file = match settings_file_path() {
        Some(path) => Some((read_settings_file(&path)?, path)),
        None => None,
    };
    resolve_settings(
        file.as_ref().map(|(raw, path)| (raw.as_str(), path.as_path())),
        |name| std::env::var(name).ok(),
        args.endpoint_url.as_deref(),
    )
}

/// Layers the settings sources: defaults, settings file, environment, command line.
pub fn resolve_settings(
    file: Option<(&str, &Path)>,
    env: impl Fn(&str) -> Option<String>,
    cli_endpoint_url: Option<&str>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some((raw, path)) = file {
        let file_cfg: FileSettings = toml::from_str(raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
        if let Some(v) = file_cfg.endpoint_url {
            settings.endpoint_url = validate_endpoint_url(&v, &path.display().to_string())?;
        }
    }

    for name in ENDPOINT_ENV_VARS {
        if let Some(v) = env(name).filter(|v| !v.trim().is_empty()) {
            settings.endpoint_url = validate_endpoint_url(&v, name)?;
        }
    }

    if let Some(v) = cli_endpoint_url {
        settings.endpoint_url = validate_endpoint_url(v, "--endpoint-url")?;
    }

    Ok(settings)
}

fn validate_endpoint_url(raw: &str, source: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).with_context(|| format!("invalid endpoint url from {source}: '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!(
            "invalid endpoint url from {source}: scheme '{}' is not http or https",
            url.scheme()
        );
    }
    Ok(raw.to_string())
}

/// First existing settings file: working directory, then the per-user config directory.
fn settings_file_path() -> Option<PathBuf> {
    let local = PathBuf::from(SETTINGS_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("tccr_workbench").join(SETTINGS_FILE_NAME))
        .filter(|path| path.is_file())
}

fn read_settings_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))
}
