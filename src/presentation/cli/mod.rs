use std::env;
use std::io::{self, Write};
use std::process::exit;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use crate::application::services::argument_parser::{
    locate_command, parse_flags_and_args, FlagSet, RunFlags,
};
use crate::application::services::path_resolver::PathResolver;
use crate::application::use_cases::dispatch::{DispatchConfig, DispatchSummary, DispatchUseCase};
use crate::common::result::RepotreeResult;
use crate::domain::value_objects::tool_kind::ToolKind;
use crate::infrastructure::filesystem::ConfigStore;
use crate::infrastructure::translators::Translator;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("BUILD_DATE"),
    ", ",
    env!("BUILD_TARGET"),
    ")"
);

/// repotree - Run one command across a tree of repositories
#[derive(Parser, Debug)]
#[command(name = "repotree")]
#[command(about = "Run one command across a tree of workspaces, groups and repositories")]
#[command(version = VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute any command
    #[command(disable_help_flag = true)]
    Exec {
        /// Command, its arguments and dispatcher options
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Execute git command
    #[command(disable_help_flag = true)]
    Git {
        /// Git arguments and dispatcher options
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Execute maven command
    #[command(name = "mvn", disable_help_flag = true)]
    Mvn {
        /// Maven arguments and dispatcher options
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Execute npm command
    #[command(disable_help_flag = true)]
    Npm {
        /// npm arguments and dispatcher options
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Commands {
    pub fn into_parts(self) -> (ToolKind, Vec<String>) {
        match self {
            Commands::Exec { args } => (ToolKind::Exec, args),
            Commands::Git { args } => (ToolKind::Git, args),
            Commands::Mvn { args } => (ToolKind::Maven, args),
            Commands::Npm { args } => (ToolKind::Npm, args),
        }
    }
}

/// Moves the subcommand token in front of any dispatcher options preceding it.
///
/// `argv[0]` is the program name and stays where it is.
pub fn reorder_arguments(mut argv: Vec<String>) -> Vec<String> {
    let command_index = argv.split_first().and_then(|(_, rest)| {
        locate_command(&FlagSet::all_tools(), rest)
            .filter(|&index| index > 0 && rest[index].parse::<ToolKind>().is_ok())
    });

    if let Some(index) = command_index {
        let tool = argv.remove(index + 1);
        argv.insert(1, tool);
    }
    argv
}

fn root_command() -> clap::Command {
    Cli::command().after_help(FlagSet::global().usage())
}

/// Help for one tool's subcommand, including the dispatcher option table.
pub fn subcommand_help(kind: ToolKind) -> String {
    let name = kind.subcommand_name();
    let mut root = root_command();
    let Some(sub) = root.find_subcommand_mut(name) else {
        return FlagSet::for_tool(kind).usage();
    };

    let mut sub = sub
        .clone()
        .bin_name(format!("repotree {name}"))
        .override_usage(format!("repotree {name} [OPTIONS] [ARGS]..."))
        .after_help(FlagSet::for_tool(kind).usage());
    sub.render_help().to_string()
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        let argv = env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        Self::from_args(argv)
    }

    /// Parses `argv`, exiting with clap's usage error on failure.
    pub fn from_args(argv: Vec<String>) -> Self {
        let matches = root_command().get_matches_from(reorder_arguments(argv));
        let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
        Self { cli }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let (kind, raw_args) = self.cli.command.into_parts();

        match Self::handle_command(kind, &raw_args).await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                if e.wants_usage() {
                    eprintln!();
                    eprintln!("{}", subcommand_help(kind));
                }
                exit(e.exit_code());
            }
        }
    }

    async fn handle_command(kind: ToolKind, raw_args: &[String]) -> RepotreeResult<()> {
        let mut flag_set = FlagSet::for_tool(kind);
        let args = parse_flags_and_args(&mut flag_set, raw_args)?;
        let flags = RunFlags::from_flag_set(&flag_set);

        if flags.help {
            let _ = writeln!(io::stdout(), "{}", subcommand_help(kind));
            return Ok(());
        }

        let tree = ConfigStore::new().load(flags.config.as_deref()).await?;
        let resolver = PathResolver::from_environment()?;
        let translator = Translator::for_tool(kind, &flags, &tree);

        let dispatch_config = DispatchConfig::from_run_flags(&flags);
        let summary = DispatchUseCase::new(dispatch_config, translator, resolver)
            .execute(&tree, &args)
            .await?;

        Self::print_summary(&summary);
        Ok(())
    }

    fn print_summary(summary: &DispatchSummary) {
        if summary.repositories.is_empty() {
            info!("No repository selected");
            return;
        }

        let _ = writeln!(io::stdout());
        let status = if summary.is_success() {
            "done".green().bold()
        } else {
            "done with failures".yellow().bold()
        };
        info!(
            "{}: {} repositories, {} executions ({} skipped, {} failed)",
            status,
            summary.repositories.len(),
            summary.executions,
            summary.skipped,
            summary.failed
        );
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn argv(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reorder_moves_tool_first() {
        assert_eq!(
            reorder_arguments(argv(&[
                "repotree", "-W", "main", "--dry-run", "git", "pull", "-G", "core"
            ])),
            argv(&["repotree", "git", "-W", "main", "--dry-run", "pull", "-G", "core"])
        );
    }

    #[test]
    fn test_reorder_keeps_leading_tool_and_unknown_tokens() {
        let already = argv(&["repotree", "npm", "ci"]);
        assert_eq!(reorder_arguments(already.clone()), already);

        let unknown = argv(&["repotree", "-W", "main", "svn", "up"]);
        assert_eq!(reorder_arguments(unknown.clone()), unknown);
    }

    #[test]
    fn test_parse_subcommand_with_flags_on_both_sides() {
        let app = CliApp::from_args(argv(&[
            "repotree", "-C", "mvn", "clean", "install", "--from", "api", "-DskipTests",
        ]));
        let (kind, args) = app.cli.command.into_parts();
        assert_eq!(kind, ToolKind::Maven);
        assert_eq!(
            args,
            argv(&["-C", "clean", "install", "--from", "api", "-DskipTests"])
        );
    }

    #[test]
    fn test_subcommand_help_lists_tool_options() {
        let help = subcommand_help(ToolKind::Npm);
        assert!(help.contains("repotree npm"));
        assert!(help.contains("--workspace"));
        assert!(help.contains("--pkg"));
        assert!(!help.contains("--non-strict"));
    }

    #[test]
    fn test_version_carries_build_metadata() {
        assert!(VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(VERSION.contains(env!("GIT_HASH")));
        assert!(VERSION.contains(env!("BUILD_TARGET")));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        root_command().debug_assert();
    }
}
