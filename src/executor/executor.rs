use std::path::PathBuf;
use std::{fmt, io};

use crate::parser::ParsedCommand;
use crate::session::ShellSession;

pub type ExecResult = Result<ExecStatus, ExecError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    /// The command finished; the loop continues.
    Code(i32),
    /// The `exit` builtin fired; the loop terminates with this status.
    Exit(i32),
}

#[derive(Debug)]
pub enum ExecError {
    CommandNotFound(String),
    Redirect(PathBuf, io::Error),
    Io(io::Error),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::CommandNotFound(name) => write!(f, "{}: not found", name),
            ExecError::Redirect(path, e) => {
                write!(f, "cannot redirect to {}: {}", path.display(), e)
            }
            ExecError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Redirect(_, e) | ExecError::Io(e) => Some(e),
            ExecError::CommandNotFound(_) => None,
        }
    }
}

impl From<io::Error> for ExecError {
    fn from(e: io::Error) -> Self {
        ExecError::Io(e)
    }
}

pub trait Executor {
    fn exec(&mut self, command: &ParsedCommand, session: &mut ShellSession) -> ExecResult;
}
