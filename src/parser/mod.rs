pub mod default;

mod command;

use std::fmt;

pub use command::{ParsedCommand, RedirectMode, RedirectStream, Redirection, RedirectionSet};
pub use default::DefaultParser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    EmptyInput,
    DanglingRedirect(String),
    PipelinesUnsupported,
    UnknownOperator(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyInput => write!(f, "expected a command"),
            ParseError::DanglingRedirect(op) => {
                write!(f, "syntax error: redirection '{}' has no target", op)
            }
            ParseError::PipelinesUnsupported => write!(f, "pipelines are not supported"),
            ParseError::UnknownOperator(op) => write!(f, "unknown operator '{}'", op),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use std::path::PathBuf;

    fn lex_and_parse(src: &str) -> ParsedCommand {
        let tokens = Lexer::new(src).tokenize().expect("tokenize failed");
        DefaultParser::new(&tokens).parse().unwrap()
    }

    fn lex_and_parse_err(src: &str) -> ParseError {
        let tokens = Lexer::new(src).tokenize().expect("tokenize failed");
        DefaultParser::new(&tokens).parse().unwrap_err()
    }

    fn redirection(
        stream: RedirectStream,
        mode: RedirectMode,
        target: &str,
    ) -> Redirection {
        Redirection {
            stream,
            mode,
            target: PathBuf::from(target),
        }
    }

    #[test]
    fn test_simple_command() {
        let cmd = lex_and_parse("echo hello world");
        assert_eq!(cmd.name, "echo");
        assert_eq!(cmd.args, vec!["hello", "world"]);
        assert!(cmd.redirections.is_empty());
    }

    #[test]
    fn test_redirect_target_is_not_an_argument() {
        let cmd = lex_and_parse("echo hi > out.txt");
        assert_eq!(cmd.name, "echo");
        assert_eq!(cmd.args, vec!["hi"]);
        assert_eq!(
            cmd.redirections.stdout(),
            Some(&redirection(
                RedirectStream::Stdout,
                RedirectMode::Truncate,
                "out.txt"
            ))
        );
        assert_eq!(cmd.redirections.stderr(), None);
    }

    #[test]
    fn test_operator_mapping() {
        let cases = [
            (">", RedirectStream::Stdout, RedirectMode::Truncate),
            ("1>", RedirectStream::Stdout, RedirectMode::Truncate),
            ("2>", RedirectStream::Stderr, RedirectMode::Truncate),
            (">>", RedirectStream::Stdout, RedirectMode::Append),
            ("1>>", RedirectStream::Stdout, RedirectMode::Append),
            ("2>>", RedirectStream::Stderr, RedirectMode::Append),
        ];
        for (op, stream, mode) in cases {
            let cmd = lex_and_parse(&format!("cmd {} f", op));
            let got = match stream {
                RedirectStream::Stdout => cmd.redirections.stdout(),
                RedirectStream::Stderr => cmd.redirections.stderr(),
            };
            assert_eq!(got, Some(&redirection(stream, mode, "f")), "operator {}", op);
        }
    }

    #[test]
    fn test_later_redirect_wins_per_stream() {
        let cmd = lex_and_parse("cmd > a >> b");
        assert_eq!(
            cmd.redirections.stdout(),
            Some(&redirection(
                RedirectStream::Stdout,
                RedirectMode::Append,
                "b"
            ))
        );
    }

    #[test]
    fn test_arguments_may_follow_the_redirection() {
        let cmd = lex_and_parse("cmd a > f b");
        assert_eq!(cmd.args, vec!["a", "b"]);
        assert_eq!(
            cmd.redirections.stdout(),
            Some(&redirection(
                RedirectStream::Stdout,
                RedirectMode::Truncate,
                "f"
            ))
        );
    }

    #[test]
    fn test_two_pending_redirects_pair_in_order() {
        let cmd = lex_and_parse("cmd 1> 2> a b");
        assert_eq!(
            cmd.redirections.stdout(),
            Some(&redirection(
                RedirectStream::Stdout,
                RedirectMode::Truncate,
                "a"
            ))
        );
        assert_eq!(
            cmd.redirections.stderr(),
            Some(&redirection(
                RedirectStream::Stderr,
                RedirectMode::Truncate,
                "b"
            ))
        );
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_redirect_before_the_command_name() {
        let cmd = lex_and_parse("> f echo hi");
        assert_eq!(cmd.name, "echo");
        assert_eq!(cmd.args, vec!["hi"]);
        assert_eq!(
            cmd.redirections.stdout(),
            Some(&redirection(
                RedirectStream::Stdout,
                RedirectMode::Truncate,
                "f"
            ))
        );
    }

    #[test]
    fn test_dangling_redirect_is_an_error() {
        assert_eq!(
            lex_and_parse_err("cmd >"),
            ParseError::DanglingRedirect(">".to_string())
        );
        assert_eq!(
            lex_and_parse_err("cmd 2>> "),
            ParseError::DanglingRedirect("2>>".to_string())
        );
    }

    #[test]
    fn test_pipe_is_rejected_explicitly() {
        assert_eq!(lex_and_parse_err("a | b"), ParseError::PipelinesUnsupported);
    }

    #[test]
    fn test_empty_token_sequence() {
        assert_eq!(lex_and_parse_err(""), ParseError::EmptyInput);
    }
}
