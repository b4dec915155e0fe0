use std::io::{stdin, stdout, Write};

use termion::event::{Event, Key};
use termion::input::TermRead;
use termion::raw::{IntoRawMode, RawTerminal};

use super::error::DriverError;
use super::report;
use crate::runtime::Runtime;

const PROMPT: &str = "> ";
const CONTINUATION_PROMPT: &str = ".. ";

fn interpret_input(runtime: &mut Runtime, input: &str) {
    if let Err(err) = runtime.load_inline(input) {
        report(&err.into());
        return;
    }

    if let Err(err) = runtime.run() {
        report(&err.into());
    }
}

/// A `while` header opens a block that stays open until an empty line.
fn opens_block(line: &str) -> bool {
    line.trim_start()
        .strip_prefix("while")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t', '(']))
}

fn redraw(
    stdout: &mut RawTerminal<std::io::Stdout>,
    prompt: &str,
    input: &str,
    input_pos: usize,
) -> std::io::Result<()> {
    let back = input.chars().count() + 1 - input_pos;

    write!(
        stdout,
        "\r{}\r{}{} {}",
        " ".repeat(80),
        prompt,
        input,
        termion::cursor::Left(back as u16)
    )
}

/// Previously submitted lines, browsed with Up/Down.
#[derive(Debug, Default)]
struct History {
    entries: Vec<String>,
    index: Option<usize>,
}

impl History {
    fn push(&mut self, entry: &str) {
        self.entries.push(entry.to_string());
        self.index = None;
    }

    /// Steps back one entry, staying on the oldest once reached.
    fn older(&mut self) -> Option<&str> {
        let idx = match self.index {
            Some(idx) => idx.saturating_sub(1),
            None => self.entries.len().checked_sub(1)?,
        };

        self.index = Some(idx);
        self.entries.get(idx).map(String::as_str)
    }

    /// Steps forward one entry. Walking past the newest entry leaves the
    /// history and yields an empty line; `None` means nothing is being browsed.
    fn newer(&mut self) -> Option<&str> {
        let idx = self.index?;

        if idx + 1 < self.entries.len() {
            self.index = Some(idx + 1);
            self.entries.get(idx + 1).map(String::as_str)
        } else {
            self.index = None;
            Some("")
        }
    }
}

fn byte_index(input: &str, char_pos: usize) -> usize {
    input
        .char_indices()
        .nth(char_pos)
        .map_or(input.len(), |(i, _)| i)
}

pub fn run_repl(mut runtime: Runtime) -> Result<(), DriverError> {
    let terminal = |err| DriverError::io("<terminal>", err);

    println!("tablang {}", env!("CARGO_PKG_VERSION"));
    let stdin = stdin();
    let mut stdout = stdout().into_raw_mode().map_err(terminal)?;
    let mut input = String::new();
    let mut block = String::new();
    let mut history = History::default();
    let mut input_pos = 0;

    write!(stdout, "{PROMPT}").map_err(terminal)?;
    stdout.flush().map_err(terminal)?;

    for evt in stdin.events() {
        let evt = evt.map_err(terminal)?;
        let prompt = if block.is_empty() {
            PROMPT
        } else {
            CONTINUATION_PROMPT
        };

        match evt {
            Event::Key(Key::Char('\n')) if input.trim().is_empty() && block.is_empty() => {
                write!(stdout, "\r\n{PROMPT}").map_err(terminal)?;
                input.clear();
                input_pos = 0;
            }
            Event::Key(Key::Char('\n')) => {
                write!(stdout, "\r\n").map_err(terminal)?;

                if !input.trim().is_empty() {
                    history.push(&input);
                }

                let chunk = if !block.is_empty() && input.trim().is_empty() {
                    Some(std::mem::take(&mut block))
                } else if !block.is_empty() || opens_block(&input) {
                    block.push_str(&input);
                    block.push('\n');
                    None
                } else {
                    Some(input.clone())
                };

                if let Some(chunk) = chunk {
                    stdout.flush().map_err(terminal)?;
                    let _ = stdout.suspend_raw_mode();

                    interpret_input(&mut runtime, &chunk);

                    let _ = stdout.activate_raw_mode();
                    write!(stdout, "\r\n").map_err(terminal)?;
                }

                let prompt = if block.is_empty() {
                    PROMPT
                } else {
                    CONTINUATION_PROMPT
                };

                input.clear();
                input_pos = 0;
                write!(stdout, "\r{prompt}").map_err(terminal)?;
            }
            Event::Key(Key::Up) => {
                if let Some(entry) = history.older() {
                    input = entry.to_string();
                }

                input_pos = input.chars().count();
                redraw(&mut stdout, prompt, &input, input_pos).map_err(terminal)?;
            }
            Event::Key(Key::Down) => {
                if let Some(entry) = history.newer() {
                    input = entry.to_string();
                }

                input_pos = input.chars().count();
                redraw(&mut stdout, prompt, &input, input_pos).map_err(terminal)?;
            }
            Event::Key(Key::Left) => {
                if input_pos > 0 {
                    input_pos -= 1;
                    write!(stdout, "{}", termion::cursor::Left(1)).map_err(terminal)?;
                }
            }
            Event::Key(Key::Right) => {
                if input_pos < input.chars().count() {
                    input_pos += 1;
                    write!(stdout, "{}", termion::cursor::Right(1)).map_err(terminal)?;
                }
            }
            Event::Key(Key::Char(c)) => {
                input.insert(byte_index(&input, input_pos), c);
                input_pos += 1;

                redraw(&mut stdout, prompt, &input, input_pos).map_err(terminal)?;
            }
            Event::Key(Key::Backspace) => {
                if input_pos > 0 {
                    input_pos -= 1;
                    input.remove(byte_index(&input, input_pos));

                    redraw(&mut stdout, prompt, &input, input_pos).map_err(terminal)?;
                }
            }
            Event::Key(Key::Ctrl('c')) | Event::Key(Key::Ctrl('d')) => {
                write!(stdout, "\r\nExiting REPL\r\n").map_err(terminal)?;
                break;
            }
            Event::Key(Key::Ctrl('e')) => {
                input_pos = input.chars().count();
                redraw(&mut stdout, prompt, &input, input_pos).map_err(terminal)?;
            }
            Event::Key(Key::Ctrl('a')) => {
                input_pos = 0;
                redraw(&mut stdout, prompt, &input, input_pos).map_err(terminal)?;
            }
            _ => {}
        }

        stdout.flush().map_err(terminal)?;
    }

    Ok(())
}
