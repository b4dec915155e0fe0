mod error;
mod lexer;
mod line;
mod postfix;
mod token;

pub use error::{LexError, ParseError, ParseErrorKind};
pub use lexer::{Lexer, INDENT_WIDTH};
pub use line::Line;
pub use postfix::to_postfix;
pub use token::{BinaryOp, CondOp, KeyWord, Paren, Token, UnaryOp};

/// Lexes every line of `input`. The first bad line aborts the whole load.
pub fn parse_program(input: &str) -> Result<Vec<Line>, ParseError> {
    input
        .split('\n')
        .enumerate()
        .map(|(i, line)| Lexer::new(line, i + 1).lex_line())
        .collect()
}
