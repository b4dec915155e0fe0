use super::environment::Environment;
use super::error::{ControlError, EvalError, InterpreterError, RuntimeError};
use super::eval::evaluate;
use super::program::Program;
use super::value::Value;
use crate::parser::{to_postfix, KeyWord, Line, Token};
use crate::stack::Stack;

/// An open `while` loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Index of the `while` line, where execution resumes once the body ends.
    pub condition_line: usize,
    pub body_indent: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitCode {
    Yield,
    Print(String),
    Exit,
}

/// Mutable execution state threaded through every step: the line cursor,
/// the active indentation level, the open loops and the variables.
#[derive(Debug, Default)]
pub struct ExecContext {
    cursor: usize,
    indent: usize,
    blocks: Stack<Block>,
    env: Environment,
}

impl ExecContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    pub fn innermost(&self) -> Option<&Block> {
        self.blocks.peek().ok()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Rewinds to the first line while keeping every variable binding.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.indent = 0;
        self.blocks.clear();
    }

    pub fn is_running(&self, program: &Program) -> bool {
        self.cursor < program.len() || !self.blocks.is_empty()
    }

    /// Executes one transition of the line machine.
    pub fn step(&mut self, program: &Program) -> Result<ExitCode, InterpreterError> {
        let Some(line) = program.line(self.cursor) else {
            if self.blocks.is_empty() {
                return Ok(ExitCode::Exit);
            }

            // the file ended inside a loop body
            return self.exit_block(program, program.len());
        };

        if line.is_empty() {
            self.cursor += 1;
            return Ok(ExitCode::Yield);
        }

        if line.indent() < self.indent {
            return self.exit_block(program, line.number());
        }

        if line.indent() > self.indent {
            let err = ControlError::IndentationError {
                expected: self.indent,
                found: line.indent(),
            };

            return Err(RuntimeError::control(err, line.number()).into());
        }

        match line.first() {
            Some(Token::Ident(_)) => {
                self.compute(line)?;
                self.cursor += 1;

                Ok(ExitCode::Yield)
            }
            Some(Token::KeyWord(KeyWord::Print)) => {
                let text = self
                    .compute(line)?
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                self.cursor += 1;

                Ok(ExitCode::Print(text))
            }
            Some(Token::KeyWord(KeyWord::While)) => self.exec_while(program, line),
            Some(token) => {
                let err = ControlError::InvalidLineStart(token.clone());

                Err(RuntimeError::control(err, line.number()).into())
            }
            None => {
                self.cursor += 1;
                Ok(ExitCode::Yield)
            }
        }
    }

    fn compute(&mut self, line: &Line) -> Result<Vec<Value>, InterpreterError> {
        let postfix = to_postfix(line.expression(), line.number())?;

        Ok(evaluate(&postfix, &mut self.env, line.number())?)
    }

    fn exec_while(&mut self, program: &Program, line: &Line) -> Result<ExitCode, InterpreterError> {
        let has_body = program
            .next_statement(self.cursor + 1)
            .is_some_and(|next| next.indent() > line.indent());

        if !has_body {
            let err = ControlError::UnexpectedLineEnding;

            return Err(RuntimeError::control(err, line.number()).into());
        }

        let condition = match self.compute(line)?.as_slice() {
            [value] => *value,
            values => {
                let err = EvalError::WrongConditionCount(values.len());

                return Err(RuntimeError::eval(err, line.number()).into());
            }
        };

        if condition.is_truthy() {
            self.blocks.push(Block {
                condition_line: self.cursor,
                body_indent: self.indent + 1,
            });
            self.indent += 1;
            self.cursor += 1;

            return Ok(ExitCode::Yield);
        }

        // skip the body without running it
        self.cursor += 1;
        while let Some(next) = program.line(self.cursor) {
            if !next.is_empty() && next.indent() <= line.indent() {
                break;
            }

            self.cursor += 1;
        }

        Ok(ExitCode::Yield)
    }

    // Resumes at the innermost loop's `while` line so its condition is tested
    // again by the ordinary dispatch.
    fn exit_block(&mut self, program: &Program, line: usize) -> Result<ExitCode, InterpreterError> {
        let block = self
            .blocks
            .pop()
            .map_err(|_| RuntimeError::control(ControlError::BlockUnderflow, line))?;

        self.cursor = block.condition_line;
        self.indent = program
            .line(block.condition_line)
            .map_or(0, |line| line.indent());

        Ok(ExitCode::Yield)
    }
}
