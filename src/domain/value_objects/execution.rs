use std::path::{Path, PathBuf};

/// One concrete subprocess invocation produced by a translator.
///
/// Each execution owns its argument list; translators never share a backing
/// buffer between the executions they return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub command: String,
    pub path: PathBuf,
    pub args: Vec<String>,
    /// Reported but never spawned
    pub skip: bool,
}

impl Execution {
    pub fn new(command: impl Into<String>, path: impl AsRef<Path>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            path: path.as_ref().to_path_buf(),
            args,
            skip: false,
        }
    }

    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Command and arguments joined for display.
    pub fn command_line(&self) -> String {
        let mut line = self.command.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.is_empty() || arg.contains(' ') {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}
