use crate::settings::{InputSettings, Settings, SettingsError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const ENV_PREFIX: &str = "FLICK";
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub geometry: Settings,
    #[serde(default)]
    pub input: InputSettings,
}

impl Config {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.geometry.validate()?;
        self.input.validate()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid settings: {0}")]
    Invalid(#[from] SettingsError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "flick", "flick").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    // FLICK_GEOMETRY__INITIAL_RADIUS=250 -> geometry.initial_radius
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    let config: Config = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Loads `path` (if present) overlaid with `FLICK_*` environment variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    finish(
        config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(environment()),
    )
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

/// Parses TOML text without consulting the environment.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let source = config::File::from_str(toml, config::FileFormat::Toml);
    finish(config::Config::builder().add_source(source))
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

/// Writes the bundled defaults to `path` unless a file is already there.
/// Returns whether a file was written.
pub fn write_default_config_to(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if write_default_config_to(&path)? {
        log::info!("Wrote default config to {}", path.display());
    }
    Ok(path)
}
