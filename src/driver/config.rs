use std::io::{Read, Write};

use clap::{ArgGroup, Parser};

use super::error::DriverError;

#[derive(Parser, Debug, Clone, Default)]
#[command(version, about, long_about = None)]
#[clap(group(ArgGroup::new("input").args(&["file", "inline", "stdin"])))]
pub struct Config {
    /// Optionally output the lexed lines to stdout or to a file if provided
    #[clap(short = 't', long = "tokens_output", requires = "input")]
    pub tokens_output_path: Option<Option<String>>,

    /// Optionally output each statement in postfix form to stdout or to a file if provided
    #[clap(short = 'p', long = "postfix_output", requires = "input")]
    pub postfix_output_path: Option<Option<String>>,

    /// List every variable binding once the program finishes
    #[clap(short, long)]
    pub vars: bool,

    /// Write a record of every executed line to stderr
    #[clap(long)]
    pub trace: bool,

    /// Optionally read program as an arg
    #[clap(short, long, conflicts_with_all = &["file", "stdin"])]
    pub inline: Option<String>,

    /// Optionally read program from stdin
    #[clap(short, long, conflicts_with_all = &["file", "inline"])]
    pub stdin: bool,

    /// Don't execute the program, only lex it
    #[clap(short = 'd', long)]
    pub dry_run: bool,

    /// File to be run (exclude for repl)
    pub file: Option<String>,

    // only meant to be used by tests in order to provide a way to redirect
    // output for testing purposes
    #[clap(skip)]
    pub output_override: Option<String>,
}

impl Config {
    pub fn get_output(&self) -> Result<Box<dyn Write>, DriverError> {
        match &self.output_override {
            Some(path) => {
                let file = std::fs::File::create(path).map_err(|err| DriverError::io(path, err))?;

                Ok(Box::new(file))
            }
            None => Ok(Box::new(std::io::stdout())),
        }
    }

    /// Reads the program source, `None` when no input was given.
    pub fn get_script(&mut self) -> Result<Option<String>, DriverError> {
        if self.inline.is_some() {
            return Ok(self.inline.take());
        }

        if self.stdin {
            let mut input = String::new();

            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|err| DriverError::io("<stdin>", err))?;

            return Ok(Some(input));
        }

        match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .map(Some)
                .map_err(|err| DriverError::io(path, err)),
            None => Ok(None),
        }
    }

    pub fn input_provided(&self) -> bool {
        self.inline.is_some() || self.stdin || self.file.is_some()
    }

    pub fn repl_mode(&self) -> bool {
        !self.input_provided()
    }
}

impl TryFrom<Vec<&str>> for Config {
    type Error = String;
    fn try_from(args: Vec<&str>) -> Result<Self, Self::Error> {
        match Config::try_parse_from(args) {
            Ok(config) => Ok(config),
            Err(e) => Err(e.to_string()),
        }
    }
}
