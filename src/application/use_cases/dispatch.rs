use std::io::{self, Write};

use tracing::{error, info};

use crate::application::services::argument_parser::RunFlags;
use crate::application::services::path_resolver::PathResolver;
use crate::common::result::RepotreeResult;
use crate::domain::entities::{
    config::Config,
    repository::Repository,
    workspace::{Group, Workspace},
};
use crate::infrastructure::process::{ProcessExecutor, RunReport};
use crate::infrastructure::translators::{RepositoryTarget, Translator};

/// Selection and failure policy for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Only this workspace (all when unset)
    pub workspace: Option<String>,

    /// Only this group (all when unset)
    pub group: Option<String>,

    /// Only these repositories (all when empty)
    pub repositories: Vec<String>,

    /// Repositories must carry every one of these tags
    pub tags: Vec<String>,

    /// Always excluded
    pub skip: Vec<String>,

    /// Resume cursor, matched case-insensitively
    pub from: Option<String>,

    pub continue_on_error: bool,

    pub dry_run: bool,
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_run_flags(flags: &RunFlags) -> Self {
        Self {
            workspace: flags.workspace.clone(),
            group: flags.group.clone(),
            repositories: flags.repositories.clone(),
            tags: flags.tags.clone(),
            skip: flags.skip.clone(),
            from: flags.from.clone(),
            continue_on_error: flags.continue_on_error,
            dry_run: flags.dry_run,
        }
    }

    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_repositories(mut self, repositories: Vec<String>) -> Self {
        self.repositories = repositories;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_skip(mut self, skip: Vec<String>) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Names of the repositories that passed every filter, in visiting order
    pub repositories: Vec<String>,
    pub executions: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl DispatchSummary {
    fn record(&mut self, report: RunReport) {
        self.executions += report.advanced;
        self.skipped += report.skipped;
        self.failed += report.failed;
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Walks workspaces, groups and repositories, translating and running each selected repository.
pub struct DispatchUseCase {
    config: DispatchConfig,
    translator: Translator,
    resolver: PathResolver,
    executor: ProcessExecutor,
}

impl DispatchUseCase {
    pub fn new(config: DispatchConfig, translator: Translator, resolver: PathResolver) -> Self {
        let executor = ProcessExecutor::new(config.continue_on_error, config.dry_run);
        Self {
            config,
            translator,
            resolver,
            executor,
        }
    }

    pub async fn execute(&self, tree: &Config, args: &[String]) -> RepotreeResult<DispatchSummary> {
        self.translator.check_args(args)?;

        let mut summary = DispatchSummary::default();

        for workspace in &tree.workspaces {
            if !matches_filter(self.config.workspace.as_deref(), &workspace.name) {
                continue;
            }
            self.execute_in_groups(workspace, args, &mut summary).await?;
        }

        Ok(summary)
    }

    async fn execute_in_groups(
        &self,
        workspace: &Workspace,
        args: &[String],
        summary: &mut DispatchSummary,
    ) -> RepotreeResult<()> {
        for group in &workspace.groups {
            if !matches_filter(self.config.group.as_deref(), &group.name) {
                continue;
            }
            self.execute_in_repositories(workspace, group, args, summary)
                .await?;
        }
        Ok(())
    }

    async fn execute_in_repositories(
        &self,
        workspace: &Workspace,
        group: &Group,
        args: &[String],
        summary: &mut DispatchSummary,
    ) -> RepotreeResult<()> {
        let mut cursor = ResumeCursor::new(self.config.from.as_deref());

        for repository in &group.repositories {
            if !cursor.admit(&repository.name) || !self.is_selected(repository) {
                continue;
            }

            if !summary.repositories.is_empty() {
                // a closed stdout must not end the walk
                let _ = writeln!(io::stdout());
            }
            summary.repositories.push(repository.name.clone());

            let target = RepositoryTarget::new(workspace, group, repository, &self.resolver);
            match self.execute_in_repository(&target, args).await {
                Ok(report) => summary.record(report),
                Err(e) if self.config.continue_on_error => {
                    error!("{}", e);
                    summary.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    async fn execute_in_repository(
        &self,
        target: &RepositoryTarget<'_>,
        args: &[String],
    ) -> RepotreeResult<RunReport> {
        let executions = self.translator.parse(args, target)?;
        if executions.is_empty() {
            info!("Nothing to run in repository {}", target.repository_name());
        }
        self.executor.run(&executions).await
    }

    /// Skip-list, then tags, then the include list.
    fn is_selected(&self, repository: &Repository) -> bool {
        if self.config.skip.iter().any(|name| *name == repository.name) {
            return false;
        }
        if !repository.has_all_tags(&self.config.tags) {
            return false;
        }
        self.config.repositories.is_empty()
            || self
                .config
                .repositories
                .iter()
                .any(|name| *name == repository.name)
    }
}

fn matches_filter(filter: Option<&str>, name: &str) -> bool {
    filter.map_or(true, |wanted| wanted == name)
}

/// Suppresses repositories until the named one is reached, then stays open.
#[derive(Debug, Clone)]
struct ResumeCursor {
    /// Lowercased target name
    from: Option<String>,
    reached: bool,
}

impl ResumeCursor {
    fn new(from: Option<&str>) -> Self {
        Self {
            from: from.map(str::to_lowercase),
            reached: from.is_none(),
        }
    }

    fn admit(&mut self, name: &str) -> bool {
        if !self.reached {
            self.reached = self
                .from
                .as_deref()
                .is_some_and(|from| from == name.to_lowercase());
        }
        self.reached
    }
}
