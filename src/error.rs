use std::fmt;

use crate::executor::ExecError;
use crate::lexer::LexError;
use crate::parser::ParseError;

/// Everything one loop iteration can fail with. Display passes the inner
/// message through untouched so per-kind wording (for example
/// "`<name>: not found`") reaches the user verbatim.
#[derive(Debug)]
pub enum ShellError {
    Lex(LexError),
    Parse(ParseError),
    Exec(ExecError),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Lex(e) => write!(f, "{}", e),
            ShellError::Parse(e) => write!(f, "{}", e),
            ShellError::Exec(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Lex(e) => Some(e),
            ShellError::Parse(e) => Some(e),
            ShellError::Exec(e) => Some(e),
        }
    }
}

impl From<LexError> for ShellError {
    fn from(e: LexError) -> Self {
        ShellError::Lex(e)
    }
}

impl From<ParseError> for ShellError {
    fn from(e: ParseError) -> Self {
        ShellError::Parse(e)
    }
}

impl From<ExecError> for ShellError {
    fn from(e: ExecError) -> Self {
        ShellError::Exec(e)
    }
}
