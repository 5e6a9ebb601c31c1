//! # repotree - Multi-repository command dispatcher
//!
//! `repotree` runs one logical command (git, maven, npm, or any executable)
//! across a statically configured tree of workspaces, groups and
//! repositories, so many source checkouts can be operated on as one.
//!
//! ## Quick Start
//!
//! 1. Describe your tree in `$HOME/.repotree/config.yaml`:
//!
//! ```yaml
//! scriptDefinitions:
//!   - name: mvn
//!     defaultArgs: clean install
//! workspaces:
//!   - name: main
//!     path: $HOME/src
//!     groups:
//!       - name: backend
//!         repositories:
//!           - name: api
//!             tags: [java]
//!             remotes:
//!               - name: origin
//!                 url: git@example.com:team/api.git
//!             scripts:
//!               - name: mvn
//!                 default: true
//! ```
//!
//! 2. Clone everything, then run a command in each repository:
//!
//! ```bash
//! repotree git clone
//! repotree -G backend git pull --rebase
//! repotree mvn -T java --continue verify
//! ```
//!
//! Dispatcher options may appear before, after, or on both sides of the
//! subcommand. Any option the dispatcher does not own is passed through to
//! the wrapped command.
//!
//! ## Architecture
//!
//! - [`domain`]: configuration tree, tool kinds and executions
//! - [`application`]: path resolution, argument disambiguation and the dispatch walk
//! - [`infrastructure`]: command translators, the process executor and the config store
//! - [`presentation`]: CLI interface
//! - [`common`]: error handling and logging
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use repotree::application::services::path_resolver::PathResolver;
//! use repotree::application::use_cases::dispatch::{DispatchConfig, DispatchUseCase};
//! use repotree::infrastructure::filesystem::ConfigStore;
//! use repotree::infrastructure::translators::{GitTranslator, Translator};
//!
//! # async fn example() -> repotree::Result<()> {
//! let tree = ConfigStore::new().load(None).await?;
//! let config = DispatchConfig::new().with_group("backend").with_dry_run(true);
//! let use_case = DispatchUseCase::new(
//!     config,
//!     Translator::Git(GitTranslator::new()),
//!     PathResolver::from_environment()?,
//! );
//!
//! let summary = use_case.execute(&tree, &["status".to_string()]).await?;
//! println!("Visited {} repositories", summary.repositories.len());
//! # Ok(())
//! # }
//! ```

// Documentation attributes
#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::RepotreeError;
pub use crate::common::result::RepotreeResult as Result;
