//! Separates dispatcher options from the arguments of the wrapped tool.
//!
//! Only a closed set of option tokens is recognised. Everything else,
//! including options the dispatcher has never heard of, passes through to
//! the translator untouched and in its original order.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::common::error::RepotreeError;
use crate::common::result::{OptionExt, RepotreeResult};
use crate::domain::value_objects::tool_kind::ToolKind;

pub const FLAG_WORKSPACE: &str = "workspace";
pub const FLAG_GROUP: &str = "group";
pub const FLAG_REPOSITORIES: &str = "repositories";
pub const FLAG_TAGS: &str = "tags";
pub const FLAG_SKIP: &str = "skip";
pub const FLAG_FROM: &str = "from";
pub const FLAG_CONTINUE: &str = "continue";
pub const FLAG_DRY_RUN: &str = "dry-run";
pub const FLAG_CONFIG: &str = "config";
pub const FLAG_HELP: &str = "help";
pub const FLAG_NON_STRICT: &str = "non-strict";
pub const FLAG_PACKAGE: &str = "pkg";

/// Token after which nothing is recognised.
const END_OF_OPTIONS: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Consumes the following token
    Value,
    /// Boolean toggle
    Switch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: &'static str,
    pub short: Option<char>,
    pub kind: FlagKind,
    pub help: &'static str,
}

impl FlagSpec {
    const fn value(name: &'static str, short: Option<char>, help: &'static str) -> Self {
        Self {
            name,
            short,
            kind: FlagKind::Value,
            help,
        }
    }

    const fn switch(name: &'static str, short: Option<char>, help: &'static str) -> Self {
        Self {
            name,
            short,
            kind: FlagKind::Switch,
            help,
        }
    }

    fn matches(&self, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return long == self.name;
        }
        match (self.short, token.strip_prefix('-')) {
            (Some(short), Some(rest)) => {
                let mut chars = rest.chars();
                chars.next() == Some(short) && chars.next().is_none()
            }
            _ => false,
        }
    }
}

const GLOBAL_FLAGS: [FlagSpec; 10] = [
    FlagSpec::value(FLAG_WORKSPACE, Some('W'), "Execute command in workspace"),
    FlagSpec::value(FLAG_GROUP, Some('G'), "Execute command in group"),
    FlagSpec::value(
        FLAG_REPOSITORIES,
        Some('R'),
        "Execute command in comma-delimited list of repositories",
    ),
    FlagSpec::value(
        FLAG_TAGS,
        Some('T'),
        "Execute command in repositories carrying all comma-delimited tags",
    ),
    FlagSpec::value(
        FLAG_SKIP,
        Some('S'),
        "Skip execution in comma-delimited list of repositories",
    ),
    FlagSpec::value(FLAG_FROM, Some('F'), "Execute command from repository to end"),
    FlagSpec::switch(FLAG_CONTINUE, Some('C'), "Skip failed command and continue"),
    FlagSpec::switch(FLAG_DRY_RUN, None, "Only print the command and execution path"),
    FlagSpec::value(FLAG_CONFIG, None, "Config file (default is $HOME/.repotree/config.yaml)"),
    FlagSpec::switch(FLAG_HELP, Some('h'), "Print usage"),
];

const NON_STRICT_FLAG: FlagSpec =
    FlagSpec::switch(FLAG_NON_STRICT, None, "Try to execute undefined command");

const PACKAGE_FLAG: FlagSpec =
    FlagSpec::value(FLAG_PACKAGE, None, "Execute command in the named package only");

/// A closed set of recognised options together with the values parsed for them.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    specs: Vec<FlagSpec>,
    values: BTreeMap<&'static str, String>,
}

impl FlagSet {
    /// Options shared by every tool.
    pub fn global() -> Self {
        Self {
            specs: GLOBAL_FLAGS.to_vec(),
            values: BTreeMap::new(),
        }
    }

    /// Global options plus the extensions of `kind`.
    pub fn for_tool(kind: ToolKind) -> Self {
        let mut set = Self::global();
        match kind {
            ToolKind::Exec => set.specs.push(NON_STRICT_FLAG),
            ToolKind::Npm => set.specs.push(PACKAGE_FLAG),
            ToolKind::Git | ToolKind::Maven => {}
        }
        set
    }

    /// Every option any tool knows, used to find the subcommand token.
    pub fn all_tools() -> Self {
        let mut set = Self::global();
        set.specs.push(NON_STRICT_FLAG);
        set.specs.push(PACKAGE_FLAG);
        set
    }

    pub fn specs(&self) -> &[FlagSpec] {
        &self.specs
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn switch(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| v == "true")
    }

    /// Comma-delimited value split into trimmed, non-empty items.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.value(name)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn lookup(&self, token: &str) -> Option<&FlagSpec> {
        self.specs.iter().find(|spec| spec.matches(token))
    }

    /// Splits `--name=value` and returns the spec with the inline value, if any.
    fn recognise<'t>(&self, token: &'t str) -> Option<(FlagSpec, Option<&'t str>)> {
        if let Some(spec) = self.lookup(token) {
            return Some((spec.clone(), None));
        }
        let (name, inline) = token.strip_prefix("--")?.split_once('=')?;
        self.specs
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| (spec.clone(), Some(inline)))
    }

    /// Option table appended to subcommand help.
    pub fn usage(&self) -> String {
        let rows: Vec<(String, &str)> = self
            .specs
            .iter()
            .map(|spec| {
                let short = spec
                    .short
                    .map(|c| format!("-{c}, "))
                    .unwrap_or_else(|| "    ".to_string());
                let value = match spec.kind {
                    FlagKind::Value => " <value>",
                    FlagKind::Switch => "",
                };
                (format!("{short}--{}{value}", spec.name), spec.help)
            })
            .collect();

        let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
        let mut out = String::from("Options:\n");
        for (left, help) in rows {
            out.push_str(&format!("  {left:<width$}   {help}\n"));
        }
        out.push_str("\nOptions can be in front of, behind, or on both sides of the command.\n");
        out.push_str("Any other option is passed through to the wrapped command.\n");
        out
    }
}

/// Scans `raw_args` once, left to right, recording recognised options in `flag_set`.
///
/// Returns the residual arguments in their original order. A value option
/// with nothing after it is an argument error; the scan stops there.
pub fn parse_flags_and_args(
    flag_set: &mut FlagSet,
    raw_args: &[String],
) -> RepotreeResult<Vec<String>> {
    let mut residual = Vec::with_capacity(raw_args.len());
    let mut tokens = raw_args.iter();

    while let Some(token) = tokens.next() {
        if token == END_OF_OPTIONS {
            residual.push(token.clone());
            residual.extend(tokens.by_ref().cloned());
            break;
        }

        let Some((spec, inline)) = flag_set.recognise(token) else {
            residual.push(token.clone());
            continue;
        };

        let value = match (spec.kind, inline) {
            (FlagKind::Value, Some(inline)) => inline.to_string(),
            (FlagKind::Value, None) => tokens
                .next()
                .cloned()
                .ok_or_argument_error(token.as_str(), "flag needs an argument")?,
            (FlagKind::Switch, None) => "true".to_string(),
            (FlagKind::Switch, Some(inline)) => inline
                .parse::<bool>()
                .map_err(|_| {
                    RepotreeError::argument_error(
                        format!("--{}", spec.name),
                        format!("invalid boolean value '{inline}'"),
                    )
                })?
                .to_string(),
        };

        flag_set.values.insert(spec.name, value);
    }

    Ok(residual)
}

/// Index of the first token that is neither a recognised option nor its value.
pub fn locate_command(flag_set: &FlagSet, raw_args: &[String]) -> Option<usize> {
    let mut index = 0;
    while index < raw_args.len() {
        let token = &raw_args[index];
        if token == END_OF_OPTIONS {
            return None;
        }
        match flag_set.recognise(token) {
            Some((spec, None)) if spec.kind == FlagKind::Value => index += 2,
            Some(_) => index += 1,
            None => return Some(index),
        }
    }
    None
}

/// Typed view over a parsed [`FlagSet`], read once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFlags {
    pub workspace: Option<String>,
    pub group: Option<String>,
    pub repositories: Vec<String>,
    pub tags: Vec<String>,
    pub skip: Vec<String>,
    pub from: Option<String>,
    pub continue_on_error: bool,
    pub dry_run: bool,
    pub config: Option<PathBuf>,
    pub help: bool,
    pub non_strict: bool,
    pub package: Option<String>,
}

impl RunFlags {
    pub fn from_flag_set(flag_set: &FlagSet) -> Self {
        let non_empty = |name: &str| {
            flag_set
                .value(name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            workspace: non_empty(FLAG_WORKSPACE),
            group: non_empty(FLAG_GROUP),
            repositories: flag_set.list(FLAG_REPOSITORIES),
            tags: flag_set.list(FLAG_TAGS),
            skip: flag_set.list(FLAG_SKIP),
            from: non_empty(FLAG_FROM),
            continue_on_error: flag_set.switch(FLAG_CONTINUE),
            dry_run: flag_set.switch(FLAG_DRY_RUN),
            config: non_empty(FLAG_CONFIG).map(PathBuf::from),
            help: flag_set.switch(FLAG_HELP),
            non_strict: flag_set.switch(FLAG_NON_STRICT),
            package: non_empty(FLAG_PACKAGE),
        }
    }
}
