//! Command translators
//!
//! Each wrapped tool turns one logical invocation plus one selected
//! repository into the concrete executions the process executor runs.
//! The set of tools is closed: adding one means adding a variant here and a
//! [`ToolKind`] value, nothing in the dispatcher changes.

pub mod exec;
pub mod git;
pub mod maven;
pub mod npm;

pub use exec::ExecTranslator;
pub use git::GitTranslator;
pub use maven::MavenTranslator;
pub use npm::NpmTranslator;

use std::path::PathBuf;

use crate::application::services::argument_parser::RunFlags;
use crate::application::services::path_resolver::PathResolver;
use crate::common::result::RepotreeResult;
use crate::domain::entities::{
    config::Config,
    repository::Repository,
    workspace::{Group, Workspace},
};
use crate::domain::value_objects::{execution::Execution, tool_kind::ToolKind};

/// One selected repository together with its place in the tree.
#[derive(Debug, Clone, Copy)]
pub struct RepositoryTarget<'a> {
    pub workspace: &'a Workspace,
    pub group: &'a Group,
    pub repository: &'a Repository,
    pub resolver: &'a PathResolver,
}

impl<'a> RepositoryTarget<'a> {
    pub fn new(
        workspace: &'a Workspace,
        group: &'a Group,
        repository: &'a Repository,
        resolver: &'a PathResolver,
    ) -> Self {
        Self {
            workspace,
            group,
            repository,
            resolver,
        }
    }

    pub fn group_path(&self) -> PathBuf {
        self.resolver.group_path(self.workspace, self.group)
    }

    pub fn repository_path(&self) -> PathBuf {
        self.resolver
            .repository_path(self.workspace, self.group, self.repository)
    }

    pub fn repository_name(&self) -> &'a str {
        &self.repository.name
    }
}

/// The per-tool translation capability.
#[derive(Debug, Clone)]
pub enum Translator {
    Exec(ExecTranslator),
    Git(GitTranslator),
    Maven(MavenTranslator),
    Npm(NpmTranslator),
}

impl Translator {
    /// Builds the translator for `kind` from the run's options and configuration.
    pub fn for_tool(kind: ToolKind, flags: &RunFlags, config: &Config) -> Self {
        match kind {
            ToolKind::Exec => Translator::Exec(ExecTranslator::new(
                config.script_definitions.clone(),
                flags.non_strict,
            )),
            ToolKind::Git => Translator::Git(GitTranslator::new()),
            ToolKind::Maven => Translator::Maven(MavenTranslator::new()),
            ToolKind::Npm => Translator::Npm(NpmTranslator::new(flags.package.clone())),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Translator::Exec(_) => ToolKind::Exec,
            Translator::Git(_) => ToolKind::Git,
            Translator::Maven(_) => ToolKind::Maven,
            Translator::Npm(_) => ToolKind::Npm,
        }
    }

    /// Rejects the invocation before any repository is visited.
    pub fn check_args(&self, args: &[String]) -> RepotreeResult<()> {
        match self {
            Translator::Exec(t) => t.check_args(args),
            Translator::Git(_) | Translator::Maven(_) | Translator::Npm(_) => Ok(()),
        }
    }

    /// Executions for one repository. Every execution owns a fresh argument list.
    pub fn parse(
        &self,
        args: &[String],
        target: &RepositoryTarget<'_>,
    ) -> RepotreeResult<Vec<Execution>> {
        match self {
            Translator::Exec(t) => t.parse(args, target),
            Translator::Git(t) => t.parse(args, target),
            Translator::Maven(t) => t.parse(args, target),
            Translator::Npm(t) => t.parse(args, target),
        }
    }
}

/// Joins a declared relative sub-path onto `base`; blank sub-paths mean `base` itself.
pub(crate) fn sub_path(base: &std::path::Path, relative: &str) -> PathBuf {
    let relative = relative.trim().trim_matches(|c: char| c == '/' || c == '\\');
    if relative.is_empty() {
        base.to_path_buf()
    } else {
        base.join(relative)
    }
}
