pub mod driver;
pub mod parser;
pub mod runtime;
pub mod stack;

pub use driver::{Config, DriverError};
pub use parser::{parse_program, Line, Token};
pub use runtime::{Environment, Program, Runtime, Value};
