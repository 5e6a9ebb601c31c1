//! Filesystem locations of groups and repositories.
//!
//! Resolution is purely string based: nothing here touches the disk. The
//! placeholder values are captured once, at construction, so the whole run
//! resolves against the same root and home directory.

use std::env;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::common::error::RepotreeError;
use crate::common::result::RepotreeResult;
use crate::domain::entities::{
    repository::Repository,
    workspace::{Group, Workspace},
};

/// Placeholder replaced with the run's root directory.
pub const ROOT_MARKER: &str = "$REPOTREE_ROOT";

/// Placeholder replaced with the user's home directory.
pub const HOME_MARKER: &str = "$HOME";

/// Environment variable providing the value for [`ROOT_MARKER`].
pub const ROOT_ENV: &str = "REPOTREE_ROOT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: String,
    home: String,
}

impl PathResolver {
    pub fn new(root: impl Into<String>, home: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            home: home.into(),
        }
    }

    /// Root from `REPOTREE_ROOT` (current directory when unset), home from the OS.
    pub fn from_environment() -> RepotreeResult<Self> {
        let root = match env::var(ROOT_ENV) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => env::current_dir()?.display().to_string(),
        };
        let home = dirs_next::home_dir()
            .ok_or_else(|| RepotreeError::config_error("Cannot resolve home directory", None))?;

        Ok(Self::new(root, home.display().to_string()))
    }

    /// Workspace root with placeholders substituted and trailing separators trimmed.
    pub fn workspace_root(&self, workspace: &Workspace) -> String {
        let mut root = workspace
            .path
            .replace(ROOT_MARKER, &self.root)
            .replace(HOME_MARKER, &self.home);

        if root == "~" {
            root = self.home.clone();
        } else if let Some(rest) = root.strip_prefix("~/") {
            root = format!("{}{}{}", trim_trailing_separators(&self.home), MAIN_SEPARATOR, rest);
        }

        trim_trailing_separators(&root)
    }

    pub fn group_path(&self, workspace: &Workspace, group: &Group) -> PathBuf {
        let root = self.workspace_root(workspace);

        PathBuf::from(resolve_child(
            &root,
            group.custom_path(),
            &group.name,
            group.name_ignored_in_path,
        ))
    }

    pub fn repository_path(
        &self,
        workspace: &Workspace,
        group: &Group,
        repository: &Repository,
    ) -> PathBuf {
        let group_path = self.group_path(workspace, group);

        PathBuf::from(resolve_child(
            &group_path.display().to_string(),
            repository.custom_path(),
            &repository.name,
            repository.name_ignored_in_path,
        ))
    }
}

/// URL of the first remote named `remote_name`, or an empty string.
pub fn remote_url<'a>(repository: &'a Repository, remote_name: &str) -> &'a str {
    repository
        .get_remote(remote_name)
        .map(|remote| remote.url.as_str())
        .unwrap_or("")
}

/// Shared rule for both levels: absolute override, relative override, name, or bare parent.
fn resolve_child(parent: &str, custom: Option<&str>, name: &str, name_ignored: bool) -> String {
    match custom {
        Some(custom) if Path::new(custom).is_absolute() => trim_trailing_separators(custom),
        Some(custom) => join(parent, custom),
        None if name_ignored => trim_trailing_separators(parent),
        None => join(parent, name),
    }
}

fn join(parent: &str, child: &str) -> String {
    let parent = trim_trailing_separators(parent);
    let child = trim_trailing_separators(child);

    if child.is_empty() {
        return parent;
    }
    if parent.is_empty() {
        return child;
    }
    if parent.ends_with(is_separator) {
        // filesystem root such as "/"
        return format!("{parent}{child}");
    }
    format!("{parent}{MAIN_SEPARATOR}{child}")
}

/// Strips trailing separators, keeping a lone root separator intact.
pub(crate) fn trim_trailing_separators(path: &str) -> String {
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() && !path.is_empty() && path.starts_with(is_separator) {
        return MAIN_SEPARATOR.to_string();
    }
    // keep "C:\" style roots
    if trimmed.ends_with(':') && trimmed.len() < path.len() {
        return format!("{trimmed}{MAIN_SEPARATOR}");
    }
    trimmed.to_string()
}

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}
