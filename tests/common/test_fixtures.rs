//! Test fixtures for creating test data
//!
//! A temporary directory holding a small configuration tree, with helpers to
//! create the checkout directories and write the YAML file.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use repotree::application::services::path_resolver::PathResolver;
use repotree::domain::entities::{
    config::{Config, ScriptDefinition},
    repository::{GitRemote, Package, Repository, Script},
    workspace::{Group, Workspace},
};

/// Repository directories of [`TreeFixture::config`], relative to the root.
pub const CHECKOUTS: [&str; 4] = ["backend/api", "backend/worker", "backend/billing", "frontend/web"];

/// Test fixture owning a temporary workspace root
pub struct TreeFixture {
    temp: TempDir,
}

impl TreeFixture {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Two groups, four repositories, rooted at `$REPOTREE_ROOT`.
    pub fn config(&self) -> Config {
        Config::new(vec![Workspace::new("main", "$REPOTREE_ROOT/").with_group(
            Group::new("backend")
                .with_repository(
                    Repository::new("api")
                        .with_tags(&["java", "service"])
                        .with_remote(GitRemote::new("origin", "git@example.com:team/api.git"))
                        .with_script(Script::new("mvn").with_default(true)),
                )
                .with_repository(
                    Repository::new("worker")
                        .with_tags(&["java"])
                        .with_remote(GitRemote::new("origin", "git@example.com:team/worker.git"))
                        .with_remote(GitRemote::new("upstream", "git@example.com:oss/worker.git")),
                )
                .with_repository(Repository::new("billing").with_tags(&["java", "service"])),
        )
        .with_group(
            Group::new("frontend").with_repository(
                Repository::new("web")
                    .with_package(Package::new("app", "app"))
                    .with_package(Package::new("admin", "tools/admin/")),
            ),
        )])
        .with_script_definition(ScriptDefinition::new("mvn", "clean install"))
    }

    pub fn create_checkouts(&self) {
        for dir in CHECKOUTS {
            std::fs::create_dir_all(self.root().join(dir)).expect("Failed to create checkout");
        }
    }

    /// Writes `config` as YAML and returns its path.
    pub fn write_config(&self, config: &Config) -> PathBuf {
        let path = self.root().join("config.yaml");
        let yaml = serde_yaml::to_string(config).expect("Failed to serialize config");
        std::fs::write(&path, yaml).expect("Failed to write config");
        path
    }

    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.root().display().to_string(), "/home/tester")
    }
}
