use super::workspace::Workspace;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Tree-wide defaults for a script name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScriptDefinition {
    #[validate(length(min = 1))]
    pub name: String,

    /// Whitespace-separated arguments used when the script runs by default
    #[serde(default)]
    pub default_args: String,
}

impl ScriptDefinition {
    pub fn new(name: impl Into<String>, default_args: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_args: default_args.into(),
        }
    }

    /// Default arguments split on whitespace, empty tokens dropped.
    pub fn split_default_args(&self) -> Vec<String> {
        self.default_args
            .split_whitespace()
            .map(|arg| arg.trim().to_string())
            .filter(|arg| !arg.is_empty())
            .collect()
    }
}

/// The loaded configuration tree. Read-only for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    #[validate(nested)]
    pub script_definitions: Vec<ScriptDefinition>,

    #[serde(default)]
    #[validate(nested)]
    pub workspaces: Vec<Workspace>,
}

impl Config {
    pub fn new(workspaces: Vec<Workspace>) -> Self {
        Self {
            script_definitions: Vec::new(),
            workspaces,
        }
    }

    pub fn with_script_definition(mut self, definition: ScriptDefinition) -> Self {
        self.script_definitions.push(definition);
        self
    }
}
