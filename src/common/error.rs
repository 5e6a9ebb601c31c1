use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepotreeError {
    #[error("Argument error: {flag} - {message}")]
    ArgumentError { flag: String, message: String },

    #[error("Validation error: {field} - {message}")]
    ValidationError {
        field: String,
        message: String,
        value: Option<String>,
    },

    #[error("Translation failed for repository '{repository}': {message}")]
    TranslationError {
        message: String,
        repository: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Execution #{index} failed: {message} ({command})")]
    ExecutionError {
        message: String,
        command: String,
        index: usize,
        exit_code: Option<i32>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl RepotreeError {
    pub fn argument_error(flag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ArgumentError {
            flag: flag.into(),
            message: message.into(),
        }
    }

    pub fn validation_error(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
            value,
        }
    }

    pub fn translation_error_with_source(
        message: impl Into<String>,
        repository: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::TranslationError {
            message: message.into(),
            repository: repository.into(),
            source: Some(source),
        }
    }

    pub fn execution_error(
        message: impl Into<String>,
        command: impl Into<String>,
        index: usize,
        exit_code: Option<i32>,
    ) -> Self {
        Self::ExecutionError {
            message: message.into(),
            command: command.into(),
            index,
            exit_code,
            source: None,
        }
    }

    pub fn execution_error_with_source(
        message: impl Into<String>,
        command: impl Into<String>,
        index: usize,
        source: std::io::Error,
    ) -> Self {
        Self::ExecutionError {
            message: message.into(),
            command: command.into(),
            index,
            exit_code: None,
            source: Some(source),
        }
    }

    pub fn config_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: Some(Box::new(source)),
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    /// Argument and validation errors are reported together with the command usage.
    pub fn wants_usage(&self) -> bool {
        matches!(
            self,
            Self::ArgumentError { .. } | Self::ValidationError { .. }
        )
    }

    /// Process exit status for this error when it ends the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ArgumentError { .. } => 2,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for RepotreeError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_error_creation() {
        let error = RepotreeError::argument_error("--workspace", "flag needs an argument");
        assert!(matches!(error, RepotreeError::ArgumentError { .. }));
        assert_eq!(
            error.to_string(),
            "Argument error: --workspace - flag needs an argument"
        );
        assert_eq!(error.exit_code(), 2);
        assert!(error.wants_usage());
    }

    #[test]
    fn test_validation_error() {
        let error = RepotreeError::validation_error("script", "undefined", Some("foo".to_string()));
        assert_eq!(error.to_string(), "Validation error: script - undefined");
        assert_eq!(error.exit_code(), 1);
        assert!(error.wants_usage());
    }

    #[test]
    fn test_execution_error_keeps_index() {
        let error = RepotreeError::execution_error("exited with code 3", "make all", 2, Some(3));
        if let RepotreeError::ExecutionError {
            index, exit_code, ..
        } = &error
        {
            assert_eq!(*index, 2);
            assert_eq!(*exit_code, Some(3));
        } else {
            panic!("Expected ExecutionError");
        }
        assert!(!error.wants_usage());
        assert_eq!(error.to_string(), "Execution #2 failed: exited with code 3 (make all)");
    }

    #[test]
    fn test_config_error_with_path() {
        let path = PathBuf::from("/test/config.yaml");
        let error = RepotreeError::config_error("duplicate workspace", Some(path.clone()));
        if let RepotreeError::ConfigError { path: Some(p), .. } = error {
            assert_eq!(p, path);
        } else {
            panic!("Expected ConfigError with path");
        }
    }

    #[test]
    fn test_error_conversion_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: RepotreeError = io_error.into();
        assert!(matches!(error, RepotreeError::FileSystemError { .. }));
    }
}
