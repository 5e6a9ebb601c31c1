/// Subprocess execution with banner-tagged output.
pub mod executor;
pub mod prefix_writer;

pub use executor::{ProcessExecutor, RunReport};
pub use prefix_writer::PrefixWriter;
