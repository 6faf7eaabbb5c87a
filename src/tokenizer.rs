//! Tokenizer for type expressions (`list<map<string, int>>`, `record<int a>`, ...).

use crate::error::{ManifestError, Position, Result};
use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `[A-Za-z_-][A-Za-z0-9_-]*`; `-` is accepted so pin keywords tokenize whole.
    Identifier,
    OpenAngle,
    CloseAngle,
    Comma,
    OpenParen,
    CloseParen,
    /// Any other character; the token text is that character.
    Error,
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    /// Literal text for error messages.
    pub fn describe(&self) -> &str {
        match self.kind {
            TokenKind::EndOfInput => "end of input",
            _ => &self.text,
        }
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-'
}

fn is_ident(c: char) -> bool {
    c.is_ascii_digit() || is_ident_start(c)
}

/// Streams tokens out of a string. After the input is exhausted every `read` returns
/// `EndOfInput`.
pub struct Tokenizer<'a> {
    chars: Chars<'a>,
    /// At most one pushed-back character and the position it was read at.
    unread: Option<(char, Position)>,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            chars: input.chars(),
            unread: None,
            line: 1,
            column: 1,
        }
    }

    fn next_char(&mut self) -> Option<(char, Position)> {
        if let Some(pending) = self.unread.take() {
            return Some(pending);
        }
        let c = self.chars.next()?;
        let position = Position::new(self.line, self.column);
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some((c, position))
    }

    fn push_back(&mut self, c: char, position: Position) {
        debug_assert!(self.unread.is_none(), "only one character of push-back");
        self.unread = Some((c, position));
    }

    fn here(&self) -> Position {
        match self.unread {
            Some((_, position)) => position,
            None => Position::new(self.line, self.column),
        }
    }

    pub fn read(&mut self) -> Token {
        loop {
            let Some((c, position)) = self.next_char() else {
                return Token {
                    kind: TokenKind::EndOfInput,
                    text: String::new(),
                    position: self.here(),
                };
            };
            let kind = match c {
                '<' => TokenKind::OpenAngle,
                '>' => TokenKind::CloseAngle,
                ',' => TokenKind::Comma,
                '(' => TokenKind::OpenParen,
                ')' => TokenKind::CloseParen,
                c if is_space(c) => continue,
                c if is_ident_start(c) => {
                    let mut text = String::from(c);
                    while let Some((next, at)) = self.next_char() {
                        if !is_ident(next) {
                            self.push_back(next, at);
                            break;
                        }
                        text.push(next);
                    }
                    return Token {
                        kind: TokenKind::Identifier,
                        text,
                        position,
                    };
                }
                _ => TokenKind::Error,
            };
            return Token {
                kind,
                text: c.to_string(),
                position,
            };
        }
    }

    /// Read one token and fail unless it is one of `kinds`.
    pub fn expect(&mut self, kinds: &[TokenKind]) -> Result<Token> {
        let token = self.read();
        if kinds.contains(&token.kind) {
            Ok(token)
        } else {
            Err(unexpected(&token))
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, `EndOfInput`.
    fn next(&mut self) -> Option<Token> {
        let token = self.read();
        (token.kind != TokenKind::EndOfInput).then_some(token)
    }
}

pub(crate) fn unexpected(token: &Token) -> ManifestError {
    ManifestError::at(
        format!("Unexpected token: {}", token.describe()),
        token.position,
    )
}
