mod builtins;
mod default_executor;
mod executor;
mod path_resolver;

pub use builtins::{BuiltinCommand, BuiltinManager};
pub use default_executor::DefaultExecutor;
pub use executor::{ExecError, ExecResult, ExecStatus, Executor};
pub use path_resolver::PathResolver;
