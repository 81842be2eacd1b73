use crate::domain::{SemanticVersion, DEFAULT_VERSION};
use crate::error::{ChangelogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "gitchangelog.toml";

/// Represents the complete configuration for git-changelog.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_path() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_title() -> String {
    "# Changelog".to_string()
}

fn default_description() -> String {
    "All notable changes to this project will be documented in this file.".to_string()
}

/// Location of the changelog and the header written into a fresh one.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_path")]
    pub path: PathBuf,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_description")]
    pub description: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            path: default_path(),
            title: default_title(),
            description: default_description(),
        }
    }
}

impl ChangelogConfig {
    /// Header block for a changelog that does not exist yet
    pub fn header(&self) -> String {
        format!("{}\n\n{}\n\n", self.title, self.description)
    }
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

/// Versioning defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    /// Version assumed when the changelog has no `## [x.y.z]` heading
    #[serde(default = "default_version")]
    pub default_version: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            default_version: default_version(),
        }
    }
}

fn default_staged() -> bool {
    true
}

/// Controls runtime behavior without affecting classification.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Collect staged changes only; `false` reads the working tree instead
    #[serde(default = "default_staged")]
    pub staged: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            staged: default_staged(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `gitchangelog.toml` in current directory
/// 3. `.gitchangelog.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    SemanticVersion::parse(&config.version.default_version).map_err(|_| {
        ChangelogError::config(format!(
            "version.default_version '{}' is not a semantic version",
            config.version.default_version
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_classic_header() {
        let config = Config::default();
        assert_eq!(config.changelog.path, PathBuf::from("CHANGELOG.md"));
        assert_eq!(
            config.changelog.header(),
            "# Changelog\n\nAll notable changes to this project will be documented in this file.\n\n"
        );
        assert_eq!(config.version.default_version, "0.1.0");
        assert!(config.behavior.staged);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[changelog]\npath = \"docs/CHANGES.md\"\n").unwrap();
        assert_eq!(config.changelog.path, PathBuf::from("docs/CHANGES.md"));
        assert_eq!(config.changelog.title, "# Changelog");
        assert!(config.behavior.staged);
    }

    #[test]
    fn test_invalid_default_version_rejected() {
        let mut config = Config::default();
        config.version.default_version = "v1".to_string();
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ChangelogError::Config(_)));
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }
}
