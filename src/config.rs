//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dquest/dquest.toml`
//! 3. Environment variables: `DQUEST_*` prefix
//! 4. Command line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::services::PlayOptions;
use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Unified configuration for dquest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Case file to play (default: the built-in mansion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_file: Option<PathBuf>,
    /// List known suspects before the accusation
    pub list_suspects: bool,
    /// List available moves at every prompt
    pub show_moves: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            case_file: None,
            list_suspects: true,
            show_moves: true,
        }
    }
}

/// Get the XDG config directory for dquest.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dquest").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dquest.toml"))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings from defaults, the global config file and `DQUEST_*` env vars.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_file` as the global config (missing file is fine).
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("list_suspects", defaults.list_suspects)
            .map_err(config_err)?
            .set_default("show_moves", defaults.show_moves)
            .map_err(config_err)?;

        if let Some(path) = config_file {
            debug!("config file: {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("DQUEST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.expand_paths();
        Ok(settings)
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the case file path.
    fn expand_paths(&mut self) {
        if let Some(path) = &self.case_file {
            self.case_file = Some(PathBuf::from(expand_env_vars(
                path.to_string_lossy().as_ref(),
            )));
        }
    }

    pub fn play_options(&self) -> PlayOptions {
        PlayOptions {
            list_suspects: self.list_suspects,
            show_moves: self.show_moves,
        }
    }

    /// Render as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.case_file, None);
        assert!(settings.list_suspects);
        assert!(settings.show_moves);
    }

    #[test]
    fn test_play_options_follow_settings() {
        let settings = Settings {
            case_file: None,
            list_suspects: false,
            show_moves: true,
        };
        assert_eq!(
            settings.play_options(),
            PlayOptions {
                list_suspects: false,
                show_moves: true
            }
        );
    }

    #[test]
    fn test_to_toml_omits_missing_case_file() {
        let rendered = Settings::default().to_toml().unwrap();
        assert!(rendered.contains("list_suspects = true"));
        assert!(!rendered.contains("case_file"));
    }
}
