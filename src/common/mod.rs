/// Shared utilities: the crate error, result helpers and console logging.
pub mod error;
pub mod logging;
pub mod result;

pub use error::RepotreeError;
pub use result::RepotreeResult;
