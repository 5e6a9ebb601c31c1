pub mod argument_parser;
pub mod path_resolver;

pub use argument_parser::{parse_flags_and_args, FlagSet, RunFlags};
pub use path_resolver::PathResolver;
