use std::fmt;

use super::lexer::INDENT_WIDTH;
use super::token::Token;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LexError {
    InvalidCharacter(char),
    InvalidIndentation,
    InvalidNumber,
}

impl LexError {
    pub fn render(&self) -> String {
        match self {
            LexError::InvalidCharacter(c) => format!("Invalid character {c:?}"),
            LexError::InvalidIndentation => format!(
                "Invalid indentation. Indent with tabs or with multiples of {INDENT_WIDTH} spaces, not both"
            ),
            LexError::InvalidNumber => {
                format!("Invalid number. largest supported integer is {}", i64::MAX)
            }
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ParseErrorKind {
    Lex(LexError),
    MismatchedOperators,
    UnknownToken(Token),
    StackUnderflow,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize) -> Self {
        Self { kind, line }
    }

    pub fn lex(err: LexError, line: usize) -> Self {
        Self::new(ParseErrorKind::Lex(err), line)
    }

    pub fn render(&self) -> String {
        let msg = match &self.kind {
            ParseErrorKind::Lex(err) => err.render(),
            ParseErrorKind::MismatchedOperators => {
                String::from("Too many operators or unbalanced parentheses in expression")
            }
            ParseErrorKind::UnknownToken(token) => {
                format!("Unexpected token '{token}' inside an expression")
            }
            ParseErrorKind::StackUnderflow => {
                String::from("Closing parenthesis without a matching opening parenthesis")
            }
        };

        format!("line {}: {}", self.line, msg)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for ParseError {}
