use std::collections::VecDeque;
use std::path::PathBuf;

use super::command::{ParsedCommand, RedirectMode, RedirectStream, Redirection, RedirectionSet};
use super::ParseError;
use crate::lexer::{Token, TokenKind};

pub struct DefaultParser<'a> {
    tokens: &'a [Token],
}

impl<'a> DefaultParser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }

    /// Single forward scan. The first word is the command name; each
    /// redirect operator claims the next following word as its target
    /// (first operator first when several are waiting); every other word
    /// is an argument, in input order.
    pub fn parse(&self) -> Result<ParsedCommand, ParseError> {
        let mut name: Option<String> = None;
        let mut args = Vec::new();
        let mut redirections = RedirectionSet::default();
        let mut pending: VecDeque<(RedirectStream, RedirectMode, &str)> = VecDeque::new();

        for token in self.tokens {
            match token.kind {
                TokenKind::Word | TokenKind::QuotedFragment => {
                    if let Some((stream, mode, _)) = pending.pop_front() {
                        redirections.insert(Redirection {
                            stream,
                            mode,
                            target: PathBuf::from(&token.value),
                        });
                    } else if name.is_none() {
                        name = Some(token.value.clone());
                    } else {
                        args.push(token.value.clone());
                    }
                }
                TokenKind::Redirect => {
                    let (stream, mode) = redirect_op(&token.value)?;
                    pending.push_back((stream, mode, token.value.as_str()));
                }
                TokenKind::Pipe => return Err(ParseError::PipelinesUnsupported),
            }
        }

        if let Some((_, _, op)) = pending.pop_front() {
            return Err(ParseError::DanglingRedirect(op.to_string()));
        }
        let name = name.ok_or(ParseError::EmptyInput)?;
        Ok(ParsedCommand {
            name,
            args,
            redirections,
        })
    }
}

fn redirect_op(op: &str) -> Result<(RedirectStream, RedirectMode), ParseError> {
    match op {
        ">" | "1>" => Ok((RedirectStream::Stdout, RedirectMode::Truncate)),
        "2>" => Ok((RedirectStream::Stderr, RedirectMode::Truncate)),
        ">>" | "1>>" => Ok((RedirectStream::Stdout, RedirectMode::Append)),
        "2>>" => Ok((RedirectStream::Stderr, RedirectMode::Append)),
        _ => Err(ParseError::UnknownOperator(op.to_string())),
    }
}
