/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Command translators (exec, git, mvn, npm)
/// - Process execution with tagged output
/// - File system operations (configuration file)
pub mod filesystem;
pub mod process;
pub mod translators;

// Re-export commonly used types
pub use filesystem::ConfigStore;
pub use process::{ProcessExecutor, RunReport};
pub use translators::{RepositoryTarget, Translator};
