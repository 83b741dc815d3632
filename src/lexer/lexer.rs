use std::fmt;

use super::token::{Token, TokenKind};

// Longest candidates first. Trying `>` before `>>` would split `>>` into two
// one-character redirect tokens.
const REDIRECT_OPS: [&str; 6] = ["1>>", "2>>", ">>", "1>", "2>", ">"];

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LexError {
    UnterminatedQuote(char, usize),
    TrailingEscape(usize),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedQuote(c, pos) => {
                write!(f, "unterminated quote '{}' starting at position {}", c, pos)
            }
            LexError::TrailingEscape(pos) => {
                write!(f, "trailing '\\' at position {} escapes nothing", pos)
            }
        }
    }
}

impl std::error::Error for LexError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InSingleQuote,
    InDoubleQuote,
    EscapeOutsideQuotes,
    EscapeInsideQuotes,
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut buf = String::new();
        let mut state = State::Normal;
        let mut token_start = 0;
        let mut quote_start = 0;

        while self.pos < self.chars.len() {
            let ch = self.chars[self.pos];
            match state {
                State::Normal => {
                    // Operators are matched positionally, before the copy of
                    // ordinary characters below.
                    if let Some(op) = self.peek_redirect_op() {
                        flush_word(&mut tokens, &mut buf, token_start, self.pos);
                        tokens.push(Token {
                            kind: TokenKind::Redirect,
                            value: op.to_string(),
                            span: (self.pos, self.pos + op.len()),
                        });
                        self.pos += op.len();
                        continue;
                    }
                    match ch {
                        ' ' | '\t' => {
                            flush_word(&mut tokens, &mut buf, token_start, self.pos);
                        }
                        '|' => {
                            flush_word(&mut tokens, &mut buf, token_start, self.pos);
                            tokens.push(Token {
                                kind: TokenKind::Pipe,
                                value: "|".to_string(),
                                span: (self.pos, self.pos + 1),
                            });
                        }
                        '\'' => {
                            if buf.is_empty() {
                                token_start = self.pos;
                            }
                            quote_start = self.pos;
                            state = State::InSingleQuote;
                        }
                        '"' => {
                            if buf.is_empty() {
                                token_start = self.pos;
                            }
                            quote_start = self.pos;
                            state = State::InDoubleQuote;
                        }
                        '\\' => {
                            if buf.is_empty() {
                                token_start = self.pos;
                            }
                            state = State::EscapeOutsideQuotes;
                        }
                        _ => {
                            if buf.is_empty() {
                                token_start = self.pos;
                            }
                            buf.push(ch);
                        }
                    }
                    self.pos += 1;
                }
                State::InSingleQuote => {
                    // No escaping of any kind between single quotes.
                    if ch == '\'' {
                        state = State::Normal;
                    } else {
                        buf.push(ch);
                    }
                    self.pos += 1;
                }
                State::InDoubleQuote => {
                    match ch {
                        '"' => state = State::Normal,
                        '\\' => state = State::EscapeInsideQuotes,
                        _ => buf.push(ch),
                    }
                    self.pos += 1;
                }
                State::EscapeOutsideQuotes => {
                    // Unconditional: the escaped character is copied even if
                    // it is a separator or an operator character.
                    buf.push(ch);
                    state = State::Normal;
                    self.pos += 1;
                }
                State::EscapeInsideQuotes => {
                    // Between double quotes only these four are escapable;
                    // for anything else the backslash itself is kept.
                    if matches!(ch, '"' | '$' | '\\' | '`') {
                        buf.push(ch);
                    } else {
                        buf.push('\\');
                        buf.push(ch);
                    }
                    state = State::InDoubleQuote;
                    self.pos += 1;
                }
            }
        }

        match state {
            State::Normal => {
                flush_word(&mut tokens, &mut buf, token_start, self.pos);
                Ok(tokens)
            }
            State::InSingleQuote => Err(LexError::UnterminatedQuote('\'', quote_start)),
            State::InDoubleQuote | State::EscapeInsideQuotes => {
                Err(LexError::UnterminatedQuote('"', quote_start))
            }
            State::EscapeOutsideQuotes => Err(LexError::TrailingEscape(self.pos - 1)),
        }
    }

    fn peek_redirect_op(&self) -> Option<&'static str> {
        REDIRECT_OPS.iter().copied().find(|op| self.lookahead_eq(op))
    }

    fn lookahead_eq(&self, literal: &str) -> bool {
        literal
            .chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.pos + i) == Some(&c))
    }
}

fn flush_word(tokens: &mut Vec<Token>, buf: &mut String, start: usize, end: usize) {
    if !buf.is_empty() {
        tokens.push(Token {
            kind: TokenKind::Word,
            value: std::mem::take(buf),
            span: (start, end),
        });
    }
}
