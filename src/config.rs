//! Bot configuration loading
//!
//! Configuration is read from `buddy-bot.toml` (or an explicit `.toml` /
//! `.json` path) and handed to the engine as plain values.

use crate::autoclose::AutoCloseConfig;
use crate::error::ConfigError;
use crate::update::DEFAULT_BRANCH_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "buddy-bot.toml";

/// Bot configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuddyConfig {
    /// Branch prefix (default "buddy")
    #[serde(alias = "branchPrefix", skip_serializing_if = "Option::is_none")]
    pub branch_prefix: Option<String>,
    /// Close pull requests proposed from dynamic versions (default true)
    #[serde(alias = "respectLatest", skip_serializing_if = "Option::is_none")]
    pub respect_latest: Option<bool>,
    /// Glob patterns of paths that must not be updated
    #[serde(alias = "ignorePaths", skip_serializing_if = "Option::is_none")]
    pub ignore_paths: Option<Vec<String>>,
}

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(ConfigFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

impl BuddyConfig {
    /// Loads a config file, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format =
            ConfigFormat::from_path(path).ok_or_else(|| ConfigError::unsupported_format(path))?;
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        Self::parse(&content, format, path)
    }

    /// Parses TOML config content
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, ConfigFormat::Toml, Path::new(DEFAULT_CONFIG_FILE))
    }

    fn parse(content: &str, format: ConfigFormat, path: &Path) -> Result<Self, ConfigError> {
        let config: BuddyConfig = match format {
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| ConfigError::toml_parse_error(path, e.to_string()))?
            }
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::json_parse_error(path, e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Finds the configuration to use
    ///
    /// An explicit path must exist. Without one, `buddy-bot.toml` in `dir`
    /// is used when present; `Ok(None)` means no configuration at all.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Option<Self>, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }

        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            log::debug!("using config file {}", candidate.display());
            Self::load(&candidate).map(Some)
        } else {
            log::debug!("no {} in {}, using defaults", DEFAULT_CONFIG_FILE, dir.display());
            Ok(None)
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.branch_prefix {
            if prefix.split('/').all(|segment| segment.trim().is_empty()) {
                return Err(ConfigError::invalid_branch_prefix(
                    prefix.as_str(),
                    "prefix must contain at least one non-empty segment",
                ));
            }
        }
        Ok(())
    }

    /// Effective branch prefix
    pub fn branch_prefix(&self) -> &str {
        self.branch_prefix.as_deref().unwrap_or(DEFAULT_BRANCH_PREFIX)
    }

    /// Auto-close policy; unset fields stay unset
    pub fn auto_close(&self) -> AutoCloseConfig {
        AutoCloseConfig {
            respect_latest: self.respect_latest,
            ignore_paths: self.ignore_paths.clone(),
        }
    }
}
