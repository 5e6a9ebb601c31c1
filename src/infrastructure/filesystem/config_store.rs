use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;
use validator::Validate;

use crate::common::error::RepotreeError;
use crate::common::result::{RepotreeResult, ResultExt};
use crate::domain::entities::config::Config;
use crate::domain::entities::repository::ORIGIN_REMOTE;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "REPOTREE_CONFIG";

/// Directory under the home directory holding the default configuration.
pub const CONFIG_DIR: &str = ".repotree";

pub const CONFIG_FILE: &str = "config.yaml";

/// Reads and validates the YAML configuration tree.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// `--config` value, else `REPOTREE_CONFIG`, else `$HOME/.repotree/config.yaml`.
    pub fn resolve_path(&self, explicit: Option<&Path>) -> RepotreeResult<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        if let Ok(path) = env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        dirs_next::home_dir()
            .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
            .ok_or_else(|| RepotreeError::config_error("Cannot resolve home directory", None))
    }

    /// Loads the configuration at the resolved location.
    pub async fn load(&self, explicit: Option<&Path>) -> RepotreeResult<Config> {
        let path = self.resolve_path(explicit)?;
        debug!("Using config file: {}", path.display());

        if !path.is_file() {
            return Err(RepotreeError::config_error(
                format!("Configuration file not found at path: {}", path.display()),
                Some(path),
            ));
        }

        let contents = tokio::fs::read_to_string(&path)
            .await
            .with_config_error("Configuration file read failed", &path)?;

        self.parse(&contents, &path)
    }

    /// Parses and validates YAML read from `path`.
    pub fn parse(&self, contents: &str, path: &Path) -> RepotreeResult<Config> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config =
            serde_yaml::from_str(contents).with_config_error("YAML parsing failed", path)?;

        config
            .validate()
            .with_config_error("Configuration validation failed", path)?;
        check_semantics(&config).map_err(|message| {
            RepotreeError::config_error(message, Some(path.to_path_buf()))
        })?;

        Ok(config)
    }
}

/// Uniqueness rules the derive-based validation cannot express.
fn check_semantics(config: &Config) -> Result<(), String> {
    let mut workspaces = HashSet::new();
    for workspace in &config.workspaces {
        if !workspaces.insert(workspace.name.as_str()) {
            return Err(format!("Duplicate workspace name: {}", workspace.name));
        }

        for group in &workspace.groups {
            let mut repositories = HashSet::new();
            for repository in &group.repositories {
                if !repositories.insert(repository.name.as_str()) {
                    return Err(format!(
                        "Duplicate repository name {} in group {}",
                        repository.name, group.name
                    ));
                }

                let origins = repository
                    .remotes
                    .iter()
                    .filter(|remote| remote.name == ORIGIN_REMOTE)
                    .count();
                if origins > 1 {
                    return Err(format!(
                        "Repository {} declares more than one origin remote",
                        repository.name
                    ));
                }
            }
        }
    }
    Ok(())
}
