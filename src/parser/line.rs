use std::fmt;

use super::token::Token;

/// One lexed source line. The leading indentation is kept as a count and is
/// not part of the statement tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    number: usize,
    indent: usize,
    tokens: Vec<Token>,
}

impl Line {
    pub fn new(number: usize, indent: usize, tokens: Vec<Token>) -> Self {
        Self {
            number,
            indent,
            tokens,
        }
    }

    /// 1-based position in the source.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// Statement tokens after the leading one.
    pub fn rest(&self) -> &[Token] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    /// The part of the statement that goes through the expression pipeline:
    /// everything after a leading keyword, or the whole line otherwise.
    pub fn expression(&self) -> &[Token] {
        match self.first() {
            Some(Token::KeyWord(_)) => self.rest(),
            _ => self.tokens(),
        }
    }

    /// The line with its indentation spelled out as `Whitespace` tokens.
    pub fn expanded(&self) -> Vec<Token> {
        std::iter::repeat(Token::Whitespace)
            .take(self.indent)
            .chain(self.tokens.iter().cloned())
            .collect()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4} |", self.number)?;

        for token in self.expanded() {
            write!(f, " {token}")?;
        }

        Ok(())
    }
}
