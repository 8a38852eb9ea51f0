use std::fmt::Display;

use miette::SourceSpan;

use crate::error::{EvalError, named_source};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'de> {
    pub kind: TokenKind,
    pub literal: &'de str,
    /// Byte offset of `literal` in the whole input.
    pub offset: usize,
}

impl Token<'_> {
    pub fn span(&self) -> SourceSpan {
        SourceSpan::from(self.offset..self.offset + self.literal.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    DoubleStar,
    LeftParen,
    RightParen,
    EndOfInput,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.literal;
        match self.kind {
            TokenKind::Number => write!(f, "NUMBER {lit}"),
            TokenKind::Plus => write!(f, "PLUS {lit}"),
            TokenKind::Minus => write!(f, "MINUS {lit}"),
            TokenKind::Star => write!(f, "STAR {lit}"),
            TokenKind::Slash => write!(f, "SLASH {lit}"),
            TokenKind::DoubleStar => write!(f, "DOUBLE_STAR {lit}"),
            TokenKind::LeftParen => write!(f, "LEFT_PAREN {lit}"),
            TokenKind::RightParen => write!(f, "RIGHT_PAREN {lit}"),
            TokenKind::EndOfInput => write!(f, "EOF"),
        }
    }
}

pub struct Lexer<'de> {
    filename: Option<&'de str>,
    whole: &'de str,
    rest: &'de str,
    pub byte: usize,
    peeked: Option<Token<'de>>,
    done: bool,
}

impl<'de> Lexer<'de> {
    pub fn new(filename: Option<&'de str>, input: &'de str) -> Self {
        Lexer {
            filename,
            whole: input,
            rest: input,
            byte: 0,
            peeked: None,
            done: false,
        }
    }

    pub fn filename(&self) -> Option<&'de str> {
        self.filename
    }

    pub fn whole(&self) -> &'de str {
        self.whole
    }

    /// Looks at the next token without consuming it. A lexing failure is
    /// returned once and not kept.
    pub fn peek(&mut self) -> Result<Token<'de>, EvalError> {
        if let Some(token) = self.peeked {
            return Ok(token);
        }
        let token = self.scan()?;
        self.peeked = Some(token);
        Ok(token)
    }

    /// Returns the next token. Once the input is exhausted every call yields
    /// `EndOfInput`.
    pub fn next_token(&mut self) -> Result<Token<'de>, EvalError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan(),
        }
    }

    fn scan(&mut self) -> Result<Token<'de>, EvalError> {
        let trimmed = self
            .rest
            .trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r'));
        self.byte += self.rest.len() - trimmed.len();
        self.rest = trimmed;

        let offset = self.byte;
        let Some(c) = self.rest.chars().next() else {
            return Ok(Token {
                kind: TokenKind::EndOfInput,
                literal: "",
                offset,
            });
        };
        let cur = self.rest;

        let len = match c {
            '*' if cur[1..].starts_with('*') => 2,
            '0'..='9' | '.' => cur
                .find(|c: char| !matches!(c, '0'..='9' | '.'))
                .unwrap_or(cur.len()),
            _ => c.len_utf8(),
        };
        self.rest = &cur[len..];
        self.byte += len;
        let literal = &cur[..len];

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' if len == 2 => TokenKind::DoubleStar,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '0'..='9' | '.' => TokenKind::Number,
            c => {
                return Err(EvalError::UnrecognizedCharacter {
                    src: named_source(self.filename, self.whole),
                    bad_bit: SourceSpan::from(offset..self.byte),
                    character: c,
                });
            }
        };

        log::trace!("lexed {kind:?} {literal:?} at {offset}");
        Ok(Token {
            kind,
            literal,
            offset,
        })
    }
}

impl<'de> Iterator for Lexer<'de> {
    type Item = Result<Token<'de>, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(Token {
                kind: TokenKind::EndOfInput,
                ..
            }) => {
                self.done = true;
                None
            }
            other => Some(other),
        }
    }
}
