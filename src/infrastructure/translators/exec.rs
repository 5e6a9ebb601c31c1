use tracing::info;

use super::{sub_path, RepositoryTarget};
use crate::common::error::RepotreeError;
use crate::common::result::RepotreeResult;
use crate::domain::entities::{config::ScriptDefinition, repository::Script};
use crate::domain::value_objects::execution::Execution;

/// Generic-exec translator: runs a declared script, or any command in non-strict mode.
#[derive(Debug, Clone, Default)]
pub struct ExecTranslator {
    script_definitions: Vec<ScriptDefinition>,
    non_strict: bool,
}

impl ExecTranslator {
    pub fn new(script_definitions: Vec<ScriptDefinition>, non_strict: bool) -> Self {
        Self {
            script_definitions,
            non_strict,
        }
    }

    fn definition(&self, name: &str) -> Option<&ScriptDefinition> {
        self.script_definitions.iter().find(|d| d.name == name)
    }

    pub fn check_args(&self, args: &[String]) -> RepotreeResult<()> {
        let Some(command) = command_args(args).first() else {
            return Ok(());
        };

        if self.non_strict || self.definition(command).is_some() {
            return Ok(());
        }

        Err(RepotreeError::validation_error(
            "command",
            format!("'{command}' is not a defined script, use --non-strict to run it anyway"),
            Some(command.clone()),
        ))
    }

    pub fn parse(
        &self,
        args: &[String],
        target: &RepositoryTarget<'_>,
    ) -> RepotreeResult<Vec<Execution>> {
        let repository = target.repository;

        let Some((command, rest)) = command_args(args).split_first() else {
            // nothing requested and nothing declared: the repository is silently left out
            let Some(script) = repository.default_script() else {
                return Ok(Vec::new());
            };
            let default_args = self
                .definition(&script.name)
                .map(ScriptDefinition::split_default_args)
                .unwrap_or_default();
            return Ok(script_executions(script, &default_args, target));
        };

        if let Some(script) = repository.find_script(command) {
            return Ok(script_executions(script, rest, target));
        }

        if self.non_strict {
            return Ok(vec![Execution::new(
                command.clone(),
                target.repository_path(),
                rest.to_vec(),
            )]);
        }

        info!(
            "Command {} is not defined in repository {}, skipped.",
            command,
            target.repository_name()
        );
        Ok(Vec::new())
    }
}

/// Arguments with a leading `--` dropped, so the first token names the command.
fn command_args(args: &[String]) -> &[String] {
    match args.split_first() {
        Some((first, rest)) if first == "--" => rest,
        _ => args,
    }
}

/// One execution per declared path, or one at the repository root when there are none.
fn script_executions(
    script: &Script,
    args: &[String],
    target: &RepositoryTarget<'_>,
) -> Vec<Execution> {
    let root = target.repository_path();

    if script.paths.is_empty() {
        return vec![Execution::new(script.name.clone(), &root, args.to_vec())];
    }

    script
        .paths
        .iter()
        .map(|path| Execution::new(script.name.clone(), sub_path(&root, path), args.to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::path_resolver::PathResolver;
    use crate::domain::entities::{
        repository::Repository,
        workspace::{Group, Workspace},
    };
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    struct Fixture {
        workspace: Workspace,
        group: Group,
        resolver: PathResolver,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                workspace: Workspace::new("ws", "/src"),
                group: Group::new("core"),
                resolver: PathResolver::new("/root", "/home/dev"),
            }
        }

        fn target<'a>(&'a self, repository: &'a Repository) -> RepositoryTarget<'a> {
            RepositoryTarget::new(&self.workspace, &self.group, repository, &self.resolver)
        }
    }

    fn definitions() -> Vec<ScriptDefinition> {
        vec![
            ScriptDefinition::new("npm", "install"),
            ScriptDefinition::new("mvn", "  clean\tinstall   -DskipTests "),
        ]
    }

    #[test]
    fn test_default_script_with_default_args() {
        let fixture = Fixture::new();
        let repo = Repository::new("api")
            .with_script(Script::new("npm").with_default(false))
            .with_script(Script::new("mvn").with_default(true));

        let executions = ExecTranslator::new(definitions(), false)
            .parse(&[], &fixture.target(&repo))
            .unwrap();

        assert_eq!(executions.len(), 1);
        assert_eq!(executions[0].command, "mvn");
        assert_eq!(executions[0].args, args(&["clean", "install", "-DskipTests"]));
        assert_eq!(executions[0].path, PathBuf::from("/src/core/api"));
    }

    #[test]
    fn test_first_script_when_none_flagged_default() {
        let fixture = Fixture::new();
        let repo = Repository::new("web")
            .with_script(Script::new("npm"))
            .with_script(Script::new("mvn"));

        let executions = ExecTranslator::new(definitions(), false)
            .parse(&[], &fixture.target(&repo))
            .unwrap();

        assert_eq!(executions[0].command, "npm");
        assert_eq!(executions[0].args, args(&["install"]));
    }

    #[test]
    fn test_no_token_and_no_scripts_yields_nothing() {
        let fixture = Fixture::new();
        let repo = Repository::new("bare");

        for non_strict in [false, true] {
            let executions = ExecTranslator::new(definitions(), non_strict)
                .parse(&[], &fixture.target(&repo))
                .unwrap();
            assert!(executions.is_empty());
        }
    }

    #[test]
    fn test_script_fans_out_per_path() {
        let fixture = Fixture::new();
        let repo = Repository::new("mono").with_script(
            Script::new("npm").with_paths(vec!["frontend/".to_string(), "/admin".to_string()]),
        );

        let executions = ExecTranslator::new(definitions(), false)
            .parse(&args(&["npm", "test"]), &fixture.target(&repo))
            .unwrap();

        let paths: Vec<_> = executions.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/src/core/mono/frontend"),
                PathBuf::from("/src/core/mono/admin"),
            ]
        );
        assert!(executions.iter().all(|e| e.args == args(&["test"])));
    }

    #[test]
    fn test_undeclared_script_strict_and_non_strict() {
        let fixture = Fixture::new();
        let repo = Repository::new("api").with_script(Script::new("mvn"));
        let requested = args(&["npm", "ci"]);

        let strict = ExecTranslator::new(definitions(), false)
            .parse(&requested, &fixture.target(&repo))
            .unwrap();
        assert!(strict.is_empty());

        let relaxed = ExecTranslator::new(definitions(), true)
            .parse(&requested, &fixture.target(&repo))
            .unwrap();
        assert_eq!(
            relaxed,
            vec![Execution::new("npm", "/src/core/api", args(&["ci"]))]
        );
    }

    #[test]
    fn test_check_args() {
        let strict = ExecTranslator::new(definitions(), false);
        assert!(strict.check_args(&[]).is_ok());
        assert!(strict.check_args(&args(&["mvn", "verify"])).is_ok());

        let err = strict.check_args(&args(&["make", "all"])).unwrap_err();
        assert!(matches!(err, RepotreeError::ValidationError { .. }));
        assert!(err.wants_usage());

        assert!(ExecTranslator::new(definitions(), true)
            .check_args(&args(&["make"]))
            .is_ok());
    }

    #[test]
    fn test_leading_separator_is_not_the_command() {
        let fixture = Fixture::new();
        let repo = Repository::new("api");
        let requested = args(&["--", "grep", "-W", "a"]);

        let relaxed = ExecTranslator::new(definitions(), true);
        assert_eq!(
            relaxed.parse(&requested, &fixture.target(&repo)).unwrap(),
            vec![Execution::new("grep", "/src/core/api", args(&["-W", "a"]))]
        );

        let strict = ExecTranslator::new(definitions(), false);
        assert!(strict.check_args(&args(&["--", "mvn"])).is_ok());
        assert!(strict.check_args(&args(&["--", "grep"])).is_err());
    }
}
