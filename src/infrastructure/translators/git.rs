use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::RepositoryTarget;
use crate::application::services::path_resolver::remote_url;
use crate::common::result::{RepotreeResult, ResultExt};
use crate::domain::entities::repository::ORIGIN_REMOTE;
use crate::domain::value_objects::execution::Execution;

const GIT: &str = "git";
const CLONE: &str = "clone";
const REMOTE: &str = "remote";
const CHECK: &str = "check";

/// Version-control translator with clone bootstrapping and remote reconciliation.
#[derive(Debug, Clone, Default)]
pub struct GitTranslator;

impl GitTranslator {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(
        &self,
        args: &[String],
        target: &RepositoryTarget<'_>,
    ) -> RepotreeResult<Vec<Execution>> {
        if contains(args, REMOTE) && contains(args, CHECK) {
            return Ok(self.remote_check(target));
        }

        if contains(args, CLONE) {
            return self.clone_checkout(args, target).map(|execution| vec![execution]);
        }

        Ok(vec![Execution::new(GIT, target.repository_path(), args.to_vec())])
    }

    /// `remote set-url` for origin, `remote remove` then `remote add` for every other remote.
    fn remote_check(&self, target: &RepositoryTarget<'_>) -> Vec<Execution> {
        let path = target.repository_path();
        let mut executions = Vec::new();

        for remote in &target.repository.remotes {
            if remote.name == ORIGIN_REMOTE {
                executions.push(Execution::new(
                    GIT,
                    &path,
                    vec![
                        REMOTE.to_string(),
                        "set-url".to_string(),
                        remote.name.clone(),
                        remote.url.clone(),
                    ],
                ));
            } else {
                executions.push(Execution::new(
                    GIT,
                    &path,
                    vec![REMOTE.to_string(), "remove".to_string(), remote.name.clone()],
                ));
                executions.push(Execution::new(
                    GIT,
                    &path,
                    vec![
                        REMOTE.to_string(),
                        "add".to_string(),
                        remote.name.clone(),
                        remote.url.clone(),
                    ],
                ));
            }
        }

        executions
    }

    fn clone_checkout(
        &self,
        args: &[String],
        target: &RepositoryTarget<'_>,
    ) -> RepotreeResult<Execution> {
        let repository = target.repository;
        let origin = remote_url(repository, ORIGIN_REMOTE);
        if origin.is_empty() {
            warn!("Repository {} has no origin remote", repository.name);
        }

        let mut clone_args = args.to_vec();
        clone_args.push(origin.to_string());
        clone_args.push(repository.name.clone());

        let working_dir = clone_directory(target);
        let repository_path = target.repository_path();

        if repository_path.join(".git").exists() {
            info!(
                "Repository {} already cloned in path {}, skipped.",
                repository.name,
                repository_path.display()
            );
            return Ok(Execution::new(GIT, working_dir, clone_args).with_skip(true));
        }

        if !working_dir.exists() {
            std::fs::create_dir_all(&working_dir).with_translation_error(
                format!("cannot create directory {}", working_dir.display()),
                repository.name.clone(),
            )?;
        }

        Ok(Execution::new(GIT, working_dir, clone_args))
    }
}

/// Directory `git clone <url> <name>` runs in so the checkout lands on the repository path.
fn clone_directory(target: &RepositoryTarget<'_>) -> PathBuf {
    let group_path = target.group_path();

    let Some(custom) = target.repository.custom_path() else {
        return group_path;
    };

    let custom = Path::new(custom.trim_end_matches(|c: char| c == '/' || c == '\\'));
    let parent = if custom.file_name().and_then(|n| n.to_str()) == Some(target.repository_name()) {
        custom.parent().unwrap_or_else(|| Path::new(""))
    } else {
        custom
    };

    if parent.is_absolute() {
        parent.to_path_buf()
    } else if parent.as_os_str().is_empty() {
        group_path
    } else {
        group_path.join(parent)
    }
}

fn contains(args: &[String], verb: &str) -> bool {
    args.iter().any(|arg| arg == verb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::path_resolver::PathResolver;
    use crate::domain::entities::{
        repository::{GitRemote, Repository},
        workspace::{Group, Workspace},
    };
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn parse(
        workspace: &Workspace,
        group: &Group,
        repository: &Repository,
        raw: &[&str],
    ) -> RepotreeResult<Vec<Execution>> {
        let resolver = PathResolver::new("/unused", "/home/dev");
        let target = RepositoryTarget::new(workspace, group, repository, &resolver);
        GitTranslator::new().parse(&args(raw), &target)
    }

    #[test]
    fn test_plain_command_runs_in_repository() {
        let workspace = Workspace::new("ws", "/src");
        let group = Group::new("core");
        let repo = Repository::new("api");

        let executions = parse(&workspace, &group, &repo, &["pull", "--rebase"]).unwrap();
        assert_eq!(
            executions,
            vec![Execution::new("git", "/src/core/api", args(&["pull", "--rebase"]))]
        );
    }

    #[test]
    fn test_clone_appends_origin_and_name() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().display().to_string();
        let workspace = Workspace::new("ws", root.as_str());
        let group = Group::new("core");
        let repo = Repository::new("api")
            .with_remote(GitRemote::new("upstream", "git@example.com:up/api.git"))
            .with_remote(GitRemote::new("origin", "git@example.com:me/api.git"));

        let executions = parse(&workspace, &group, &repo, &["clone"]).unwrap();

        assert_eq!(executions.len(), 1);
        assert_eq!(
            executions[0].args,
            args(&["clone", "git@example.com:me/api.git", "api"])
        );
        assert_eq!(executions[0].path, temp.path().join("core"));
        assert!(!executions[0].skip);
        assert!(temp.path().join("core").is_dir());
    }

    #[test]
    fn test_clone_without_origin_uses_empty_url() {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::new("ws", temp.path().display().to_string());
        let group = Group::new("core");
        let repo = Repository::new("api");

        let executions = parse(&workspace, &group, &repo, &["clone", "--depth", "1"]).unwrap();
        assert_eq!(executions[0].args, args(&["clone", "--depth", "1", "", "api"]));
    }

    #[test]
    fn test_clone_skips_existing_checkout() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("core/api/.git")).unwrap();
        let workspace = Workspace::new("ws", temp.path().display().to_string());
        let group = Group::new("core");
        let repo = Repository::new("api").with_remote(GitRemote::new("origin", "u"));

        let executions = parse(&workspace, &group, &repo, &["clone"]).unwrap();
        assert!(executions[0].skip);
    }

    #[test]
    fn test_clone_custom_path_strips_name_suffix() {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::new("ws", temp.path().display().to_string());
        let group = Group::new("core");
        let repo = Repository::new("api").with_path("services/api/");

        let executions = parse(&workspace, &group, &repo, &["clone"]).unwrap();
        assert_eq!(executions[0].path, temp.path().join("core").join("services"));
        assert!(temp.path().join("core/services").is_dir());
    }

    #[test]
    fn test_clone_absolute_custom_path() {
        let temp = TempDir::new().unwrap();
        let custom = temp.path().join("elsewhere").join("api");
        let workspace = Workspace::new("ws", "/src");
        let group = Group::new("core");
        let repo = Repository::new("api").with_path(custom.display().to_string());

        let executions = parse(&workspace, &group, &repo, &["clone"]).unwrap();
        assert_eq!(executions[0].path, temp.path().join("elsewhere"));
    }

    #[test]
    fn test_remote_check_reconciles_every_remote() {
        let workspace = Workspace::new("ws", "/src");
        let group = Group::new("core");
        let repo = Repository::new("api")
            .with_remote(GitRemote::new("origin", "git@example.com:me/api.git"))
            .with_remote(GitRemote::new("upstream", "git@example.com:up/api.git"));

        let executions = parse(&workspace, &group, &repo, &["remote", "check"]).unwrap();

        let got: Vec<_> = executions.iter().map(|e| e.args.clone()).collect();
        assert_eq!(
            got,
            vec![
                args(&["remote", "set-url", "origin", "git@example.com:me/api.git"]),
                args(&["remote", "remove", "upstream"]),
                args(&["remote", "add", "upstream", "git@example.com:up/api.git"]),
            ]
        );
        assert!(executions
            .iter()
            .all(|e| e.path == PathBuf::from("/src/core/api") && e.command == "git"));
    }

    #[test]
    fn test_remote_check_origin_match_is_case_sensitive() {
        let workspace = Workspace::new("ws", "/src");
        let group = Group::new("core");
        let repo = Repository::new("api").with_remote(GitRemote::new("Origin", "u"));

        let executions = parse(&workspace, &group, &repo, &["remote", "check"]).unwrap();
        assert_eq!(executions.len(), 2);
        assert_eq!(executions[0].args, args(&["remote", "remove", "Origin"]));
    }
}
