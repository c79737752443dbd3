use crate::language::Language;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelSettings {
    /// Velocity multiplier applied each coasting frame.
    pub decay: f64,
    /// Coasting stops once |velocity| falls to this many degrees per frame.
    pub threshold: f64,
    pub frame_interval_ms: u64,
    /// Rotation pivot in screen coordinates. The disc is drawn half off-screen
    /// to the left, so this is not the center of any visible element.
    pub pivot_x: f64,
    pub pivot_y: f64,
    /// Pointer-down farther than this from the pivot misses the disc.
    pub radius: f64,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            decay: 0.92,
            threshold: 0.05,
            frame_interval_ms: 16,
            pivot_x: 0.0,
            pivot_y: 360.0,
            radius: 360.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub language: Language,
    pub session_path: Option<PathBuf>,
    pub wheel: WheelSettings,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("org", "cupping", "cupping").ok_or(ConfigError::ConfigDirNotFound)
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// File first, then `CUPPING_*` variables (`CUPPING_WHEEL__DECAY=0.9`).
pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("CUPPING")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

impl Config {
    /// Where the working session lives: the configured path, else
    /// `session.json` in the platform data dir.
    pub fn session_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.session_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("session.json")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(s: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config_matches_defaults() {
        assert_eq!(from_toml(DEFAULT_CONFIG), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = from_toml(
            r#"
            language = "EN"

            [wheel]
            decay = 0.85
            "#,
        );
        assert_eq!(config.language, Language::En);
        assert_eq!(config.wheel.decay, 0.85);
        assert_eq!(config.wheel.threshold, 0.05);
        assert_eq!(config.session_path, None);
    }

    #[test]
    fn test_explicit_session_path() {
        let config = from_toml(r#"session_path = "/tmp/tasting.json""#);
        assert_eq!(
            config.session_path().unwrap(),
            PathBuf::from("/tmp/tasting.json")
        );
    }

    #[test]
    fn test_bad_language_rejected() {
        let result = config::Config::builder()
            .add_source(config::File::from_str(
                r#"language = "klingon""#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<Config>();
        assert!(result.is_err());
    }
}
