pub mod execution;
pub mod tool_kind;

pub use execution::Execution;
pub use tool_kind::ToolKind;
