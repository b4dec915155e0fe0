mod environment;
mod error;
mod eval;
mod executor;
mod program;
mod value;

#[cfg(test)]
mod tests;

use std::io::Write;

pub use environment::Environment;
pub use error::{
    ControlError, EvalError, InterpreterError, RuntimeError, RuntimeErrorKind,
};
pub use eval::evaluate;
pub use executor::{Block, ExecContext, ExitCode};
pub use program::Program;
pub use value::Value;

use crate::parser::ParseError;

pub struct Runtime {
    program: Program,
    ctx: ExecContext,
    output: Box<dyn Write>,
    saved_output: Option<String>,
    trace: Option<Box<dyn Write>>,
}

impl Runtime {
    pub fn init(program: Program) -> Self {
        Self {
            program,
            ctx: ExecContext::new(),
            output: Box::new(std::io::stdout()),
            saved_output: None,
            trace: None,
        }
    }

    pub fn load_inline(&mut self, source: &str) -> Result<(), ParseError> {
        let program = Program::load(source)?;

        self.replace_program(program);

        Ok(())
    }

    /// Swaps in a new line table. Variables survive, the cursor and any
    /// open loops do not.
    pub fn replace_program(&mut self, program: Program) {
        self.program = program;
        self.ctx.reset();
    }

    pub fn variables(&self) -> &Environment {
        self.ctx.env()
    }

    pub fn set_output(&mut self, output: Box<dyn Write>) {
        self.output = output;
    }

    pub fn set_trace(&mut self, trace: Box<dyn Write>) {
        self.trace = Some(trace);
    }

    pub fn save_output(&mut self) {
        if self.saved_output.is_none() {
            self.saved_output = Some(String::new());
        }
    }

    pub fn take_saved_output(&mut self) -> Option<String> {
        self.saved_output.take()
    }

    pub fn is_running(&self) -> bool {
        self.ctx.is_running(&self.program)
    }

    /// Executes a single line transition.
    pub fn step(&mut self) -> Result<ExitCode, InterpreterError> {
        self.trace_step();

        let code = self.ctx.step(&self.program)?;

        if let ExitCode::Print(text) = &code {
            self.print(text)?;
        }

        Ok(code)
    }

    pub fn run(&mut self) -> Result<(), InterpreterError> {
        loop {
            if let ExitCode::Exit = self.step()? {
                return Ok(());
            }
        }
    }

    /// Writes every binding as `name = value`, one per line, in name order.
    pub fn dump_variables(&mut self) -> Result<(), InterpreterError> {
        let lines: Vec<String> = self
            .variables()
            .bindings()
            .into_iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect();

        for line in lines {
            self.print(&line)?;
        }

        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<(), InterpreterError> {
        if let Some(output) = &mut self.saved_output {
            output.push_str(text);
            output.push('\n');

            return Ok(());
        }

        writeln!(self.output, "{text}").map_err(|err| InterpreterError::Output {
            line: self.current_line(),
            message: err.to_string(),
        })
    }

    fn current_line(&self) -> usize {
        self.program
            .line(self.ctx.cursor().saturating_sub(1))
            .map_or(0, |line| line.number())
    }

    // Tracing is best effort, a broken trace sink never stops the program.
    fn trace_step(&mut self) {
        let Some(trace) = &mut self.trace else {
            return;
        };

        let record = match self.program.line(self.ctx.cursor()) {
            Some(line) if line.is_empty() => return,
            Some(line) => format!(
                "[step] indent={} loops={} {}",
                self.ctx.indent(),
                self.ctx.depth(),
                line
            ),
            None => match self.ctx.innermost() {
                Some(block) => format!(
                    "[step] end of program, closing loop at line {} (body indent {})",
                    block.condition_line + 1,
                    block.body_indent
                ),
                None => String::from("[step] halted"),
            },
        };

        let _ = writeln!(trace, "{record}");
    }
}
