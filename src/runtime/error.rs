use std::fmt;

use crate::parser::{ParseError, Token};

/// There is no condition-type error: every residual is an `Int` or a `Bool`,
/// and both are valid `while` conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    UninitializedVariable(String),
    TypeMismatch {
        op: String,
        expected: &'static str,
        found: &'static str,
    },
    OperatorUnknown(Token),
    DivisionByZero,
    NegativeExponent(i64),
    Overflow(String),
    StackUnderflow(String),
    InvalidAssignmentTarget(Token),
    InvalidResidualToken(Token),
    WrongConditionCount(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlError {
    IndentationError { expected: usize, found: usize },
    InvalidLineStart(Token),
    UnexpectedLineEnding,
    BlockUnderflow,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    Eval(EvalError),
    Control(ControlError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub line: usize,
}

impl RuntimeError {
    pub fn eval(err: EvalError, line: usize) -> Self {
        Self {
            kind: RuntimeErrorKind::Eval(err),
            line,
        }
    }

    pub fn control(err: ControlError, line: usize) -> Self {
        Self {
            kind: RuntimeErrorKind::Control(err),
            line,
        }
    }

    pub fn render(&self) -> String {
        let msg = match &self.kind {
            RuntimeErrorKind::Eval(err) => err.render(),
            RuntimeErrorKind::Control(err) => err.render(),
        };

        format!("line {}: {}", self.line, msg)
    }
}

impl EvalError {
    pub fn render(&self) -> String {
        match self {
            EvalError::UninitializedVariable(name) => {
                format!("Variable {name:?} cannot be read before it is assigned")
            }
            EvalError::TypeMismatch { op, expected, found } => {
                format!("Operator '{op}' expects an {expected} operand, found {found}")
            }
            EvalError::OperatorUnknown(token) => format!("Unknown operator '{token}'"),
            EvalError::DivisionByZero => String::from("Division by zero"),
            EvalError::NegativeExponent(exp) => {
                format!("Negative exponent {exp}. '^' only supports exponents >= 0")
            }
            EvalError::Overflow(op) => format!("Integer overflow while applying '{op}'"),
            EvalError::StackUnderflow(op) => format!("Missing operand for '{op}'"),
            EvalError::InvalidAssignmentTarget(token) => {
                format!("Cannot assign to '{token}', only to a variable name")
            }
            EvalError::InvalidResidualToken(token) => {
                format!("Expression left '{token}' instead of a value")
            }
            EvalError::WrongConditionCount(0) => {
                String::from("No condition found for while loop, needs one")
            }
            EvalError::WrongConditionCount(n) => {
                format!("{n} conditions found for while loop, only needs one")
            }
        }
    }
}

impl ControlError {
    pub fn render(&self) -> String {
        match self {
            ControlError::IndentationError { expected, found } => format!(
                "Unexpected indentation. Expected {expected} level(s), found {found}"
            ),
            ControlError::InvalidLineStart(token) => {
                format!("A statement cannot start with '{token}'")
            }
            ControlError::UnexpectedLineEnding => {
                String::from("Expected an indented block after 'while'")
            }
            ControlError::BlockUnderflow => {
                String::from("Dedent without an enclosing while block")
            }
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for RuntimeError {}

#[derive(Debug, Clone, PartialEq)]
pub enum InterpreterError {
    RuntimeError(RuntimeError),
    ParseError(ParseError),
    Output { line: usize, message: String },
}

impl InterpreterError {
    pub fn render(&self) -> String {
        match self {
            InterpreterError::RuntimeError(err) => err.render(),
            InterpreterError::ParseError(err) => err.render(),
            InterpreterError::Output { line, message } => {
                format!("line {line}: Failed to write output: {message}")
            }
        }
    }

    pub fn line(&self) -> usize {
        match self {
            InterpreterError::RuntimeError(err) => err.line,
            InterpreterError::ParseError(err) => err.line,
            InterpreterError::Output { line, .. } => *line,
        }
    }
}

impl From<RuntimeError> for InterpreterError {
    fn from(err: RuntimeError) -> Self {
        InterpreterError::RuntimeError(err)
    }
}

impl From<ParseError> for InterpreterError {
    fn from(err: ParseError) -> Self {
        InterpreterError::ParseError(err)
    }
}

impl fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for InterpreterError {}
