use std::fmt;

use crate::parser::ParseError;
use crate::runtime::InterpreterError;

#[derive(Debug)]
pub enum DriverError {
    Interpreter(InterpreterError),
    Io { path: String, message: String },
}

impl DriverError {
    pub fn io(path: &str, err: std::io::Error) -> Self {
        DriverError::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            DriverError::Interpreter(err) => err.render(),
            DriverError::Io { path, message } => format!("{path}: {message}"),
        }
    }
}

impl From<InterpreterError> for DriverError {
    fn from(err: InterpreterError) -> Self {
        DriverError::Interpreter(err)
    }
}

impl From<ParseError> for DriverError {
    fn from(err: ParseError) -> Self {
        DriverError::Interpreter(err.into())
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for DriverError {}
