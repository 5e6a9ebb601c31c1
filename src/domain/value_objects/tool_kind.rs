use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of wrapped tools the dispatcher knows how to translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Arbitrary executable or declared script
    Exec,
    /// Git version control
    Git,
    /// Apache Maven build tool
    Maven,
    /// npm package manager
    Npm,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolKindError {
    #[error("Unsupported tool: {0}")]
    UnsupportedTool(String),
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subcommand_name())
    }
}

impl FromStr for ToolKind {
    type Err = ToolKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exec" => Ok(ToolKind::Exec),
            "git" => Ok(ToolKind::Git),
            "mvn" => Ok(ToolKind::Maven),
            "npm" => Ok(ToolKind::Npm),
            _ => Err(ToolKindError::UnsupportedTool(s.to_string())),
        }
    }
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [ToolKind::Exec, ToolKind::Git, ToolKind::Maven, ToolKind::Npm];

    /// Name of the subcommand that selects this tool
    pub fn subcommand_name(&self) -> &'static str {
        match self {
            ToolKind::Exec => "exec",
            ToolKind::Git => "git",
            ToolKind::Maven => "mvn",
            ToolKind::Npm => "npm",
        }
    }
}
