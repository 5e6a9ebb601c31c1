use serde::{Deserialize, Serialize};
use validator::Validate;

/// Remote name that version-control translators treat specially.
pub const ORIGIN_REMOTE: &str = "origin";

/// A named Git remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GitRemote {
    /// Remote name (e.g. origin)
    #[validate(length(min = 1))]
    pub name: String,
    /// Remote URL
    #[serde(default)]
    pub url: String,
}

impl GitRemote {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A logical command a repository supports, run once per declared path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    #[validate(length(min = 1))]
    pub name: String,

    /// Selected when no command is given on the command line
    #[serde(default)]
    pub default: bool,

    /// Paths relative to the repository; empty means the repository root
    #[serde(default)]
    pub paths: Vec<String>,
}

impl Script {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn with_paths(mut self, paths: Vec<String>) -> Self {
        self.paths = paths;
        self
    }
}

/// A package-manager sub-package living below the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Package {
    #[validate(length(min = 1))]
    pub name: String,

    #[serde(default)]
    pub path: String,
}

impl Package {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// One managed source checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Unique within its group
    #[validate(length(min = 1))]
    pub name: String,

    /// Explicit path, absolute or relative to the group path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Resolve to the group path instead of appending the repository name
    #[serde(default)]
    pub name_ignored_in_path: bool,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub remotes: Vec<GitRemote>,

    #[serde(default)]
    #[validate(nested)]
    pub scripts: Vec<Script>,

    #[serde(default)]
    #[validate(nested)]
    pub packages: Vec<Package>,
}

impl Repository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_name_ignored_in_path(mut self, ignored: bool) -> Self {
        self.name_ignored_in_path = ignored;
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_remote(mut self, remote: GitRemote) -> Self {
        self.remotes.push(remote);
        self
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.scripts.push(script);
        self
    }

    pub fn with_package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    /// First remote whose name matches exactly
    pub fn get_remote(&self, name: &str) -> Option<&GitRemote> {
        self.remotes.iter().find(|r| r.name == name)
    }

    /// True when every tag in `required` is declared on this repository.
    pub fn has_all_tags(&self, required: &[String]) -> bool {
        required.iter().all(|tag| self.tags.contains(tag))
    }

    pub fn find_script(&self, name: &str) -> Option<&Script> {
        self.scripts.iter().find(|s| s.name == name)
    }

    /// The default-flagged script, falling back to the first declared one.
    pub fn default_script(&self) -> Option<&Script> {
        self.scripts
            .iter()
            .find(|s| s.default)
            .or_else(|| self.scripts.first())
    }

    /// The explicit path override, ignoring empty strings.
    pub fn custom_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.trim().is_empty())
    }
}
