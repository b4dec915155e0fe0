use crate::parser::{parse_program, Line, ParseError};

/// The lexed line table. Never changes once loaded.
#[derive(Debug, Clone, Default)]
pub struct Program {
    lines: Vec<Line>,
}

impl Program {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn load(source: &str) -> Result<Self, ParseError> {
        parse_program(source).map(Self::new)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// First non-empty line at or after `index`.
    pub fn next_statement(&self, index: usize) -> Option<&Line> {
        self.lines.get(index..)?.iter().find(|line| !line.is_empty())
    }
}
