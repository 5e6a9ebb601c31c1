use super::repository::Repository;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Named collection of repositories sharing a parent path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[validate(length(min = 1))]
    pub name: String,

    /// Explicit path, absolute or relative to the workspace root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Resolve to the workspace root instead of appending the group name
    #[serde(default)]
    pub name_ignored_in_path: bool,

    #[serde(default)]
    #[validate(nested)]
    pub repositories: Vec<Repository>,
}

impl Group {
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

    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repositories.push(repository);
        self
    }

    /// The explicit path override, ignoring empty strings.
    pub fn custom_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// Top-level named root folder.
///
/// `path` may embed the `$REPOTREE_ROOT` and `$HOME` placeholders, which the
/// path resolver substitutes before any concatenation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Workspace {
    #[validate(length(min = 1))]
    pub name: String,

    #[serde(default)]
    pub path: String,

    #[serde(default)]
    #[validate(nested)]
    pub groups: Vec<Group>,
}

impl Workspace {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            groups: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_builder() {
        let workspace = Workspace::new("main", "/src").with_group(
            Group::new("backend")
                .with_repository(Repository::new("api"))
                .with_repository(Repository::new("worker")),
        );

        assert_eq!(workspace.groups.len(), 1);
        assert_eq!(workspace.groups[0].repositories.len(), 2);
        assert_eq!(workspace.groups[0].repositories[1].name, "worker");
    }

    #[test]
    fn test_group_custom_path() {
        assert_eq!(Group::new("g").custom_path(), None);
        assert_eq!(Group::new("g").with_path("").custom_path(), None);
        assert_eq!(Group::new("g").with_path("/abs").custom_path(), Some("/abs"));
    }

    #[test]
    fn test_deserialize_group() {
        let yaml = r#"
name: tools
path: ../shared
nameIgnoredInPath: false
repositories:
  - name: lint
"#;
        let group: Group = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(group.path.as_deref(), Some("../shared"));
        assert_eq!(group.repositories[0].name, "lint");
    }
}
