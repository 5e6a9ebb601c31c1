pub mod config;
pub mod repository;
pub mod workspace;

pub use config::{Config, ScriptDefinition};
pub use repository::{GitRemote, Package, Repository, Script};
pub use workspace::{Group, Workspace};
