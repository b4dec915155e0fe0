mod config;
mod error;
mod repl;

use std::io::Write;

use termion::color;

use crate::parser::{to_postfix, ParseError, Token};
use crate::runtime::{Program, Runtime};

pub use config::Config;
pub use error::DriverError;

pub fn execute(mut config: Config) -> Result<(), DriverError> {
    let mut runtime = Runtime::init(Program::default());

    runtime.set_output(config.get_output()?);

    if config.trace {
        runtime.set_trace(Box::new(std::io::stderr()));
    }

    if config.repl_mode() {
        return repl::run_repl(runtime);
    }

    let script = config.get_script()?.unwrap_or_default();

    let program = Program::load(&script)?;

    if let Some(path) = &config.tokens_output_path {
        write_dump(path.as_deref(), &render_tokens(&program))?;
    }

    if let Some(path) = &config.postfix_output_path {
        write_dump(path.as_deref(), &render_postfix(&program)?)?;
    }

    if config.dry_run {
        return Ok(());
    }

    runtime.replace_program(program);
    runtime.run()?;

    if config.vars {
        runtime.dump_variables()?;
    }

    Ok(())
}

/// Prints a fatal error to stderr as `error: <message>`, coloured only when
/// stderr is a terminal.
pub fn report(err: &DriverError) {
    let colour = termion::is_tty(&std::io::stderr());

    eprintln!("{}", render_report(err, colour));
}

fn render_report(err: &DriverError, colour: bool) -> String {
    if colour {
        format!(
            "{}error:{} {}",
            color::Fg(color::Red),
            color::Fg(color::Reset),
            err.render()
        )
    } else {
        format!("error: {}", err.render())
    }
}

fn render_tokens(program: &Program) -> String {
    program
        .lines()
        .iter()
        .map(|line| format!("{line}\n"))
        .collect()
}

fn render_postfix(program: &Program) -> Result<String, ParseError> {
    let mut out = String::new();

    for line in program.lines().iter().filter(|line| !line.is_empty()) {
        out.push_str(&format!("{:>4} |", line.number()));

        if let Some(keyword @ Token::KeyWord(_)) = line.first() {
            out.push_str(&format!(" {keyword}"));
        }

        for token in to_postfix(line.expression(), line.number())? {
            out.push_str(&format!(" {token}"));
        }

        out.push('\n');
    }

    Ok(out)
}

fn write_dump(path: Option<&str>, content: &str) -> Result<(), DriverError> {
    match path {
        Some(path) => {
            let mut file =
                std::fs::File::create(path).map_err(|err| DriverError::io(path, err))?;

            file.write_all(content.as_bytes())
                .map_err(|err| DriverError::io(path, err))
        }
        None => {
            print!("{content}");
            Ok(())
        }
    }
}
