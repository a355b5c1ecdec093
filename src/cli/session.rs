//! Interactive read-resolve-dispatch loop
//!
//! The session owns its input and output streams so it can be driven from a
//! terminal or from a byte buffer in tests. Each line is resolved, dispatched
//! and rendered before the next one is read.

use std::io::{self, BufRead, Write};

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};

use super::handlers::{dispatch, CommandError, Context};
use super::output::Output;
use super::resolver::{Confirm, Resolution, Resolver};
use crate::domain::Directory;
use crate::storage::Persistence;

const BANNER: &str = "\
-----------------------------------------------------------------------------
Welcome to your personal address book. Please provide a command or type help.
-----------------------------------------------------------------------------
";

/// Splits a line into a lower-cased command word and its arguments
pub fn parse_input(line: &str) -> (String, Vec<String>) {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_lowercase();
    let args = words.map(str::to_string).collect();
    (command, args)
}

/// Reads a y/n answer from the session's own streams
///
/// The question goes through [`Output::text`], so JSON mode reads the answer
/// without echoing the question.
struct Prompter<'s, R, W> {
    input: &'s mut R,
    out: &'s mut W,
    output: &'s Output,
}

impl<R: BufRead, W: Write> Confirm for Prompter<'_, R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        if self.output.text(&mut *self.out, question).is_err() {
            return false;
        }
        match read_line(self.input) {
            Ok(Some(answer)) => answer.trim().eq_ignore_ascii_case("y"),
            _ => false,
        }
    }
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// One interactive session
pub struct Session<R, W> {
    input: R,
    out: W,
    output: Output,
    resolver: Resolver,
    prompt: String,
    birthday_window: u32,
    today: Option<NaiveDate>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, output: Output) -> Self {
        Self {
            input,
            out,
            output,
            resolver: Resolver::new(),
            prompt: "Enter command: ".to_string(),
            birthday_window: 7,
            today: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_birthday_window(mut self, days: u32) -> Self {
        self.birthday_window = days;
        self
    }

    /// Pins "today" instead of reading the local clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Runs until `close`/`exit` or end of input
    ///
    /// End of input stops the session without saving.
    pub fn run(&mut self, book: &mut Directory, store: &dyn Persistence) -> Result<()> {
        self.output.text(&mut self.out, BANNER)?;

        loop {
            self.output.text(&mut self.out, &self.prompt)?;

            let Some(line) = read_line(&mut self.input).context("Failed to read input")? else {
                self.output.verbose("End of input, leaving without saving");
                break;
            };

            if self.execute(&line, book, store)? {
                break;
            }
        }

        Ok(())
    }

    /// Resolves, dispatches and renders one input line
    ///
    /// Returns true when the session should end.
    pub fn execute(&mut self, line: &str, book: &mut Directory, store: &dyn Persistence) -> Result<bool> {
        let (token, args) = parse_input(line);

        if self.output.is_verbose() {
            match self.resolver.candidate(&token) {
                Some(c) => self.output.verbose_ctx(
                    "resolver",
                    &format!("'{}' -> {} (score {})", token, c.spec.name, c.score),
                ),
                None => self.output.verbose_ctx("resolver", &format!("'{}' -> no fuzzy candidate", token)),
            }
        }

        let mut prompter = Prompter {
            input: &mut self.input,
            out: &mut self.out,
            output: &self.output,
        };
        let resolution = self.resolver.resolve(&token, &mut prompter);

        let command = match resolution {
            Resolution::Dispatch(command) => command,
            Resolution::Declined(command) => {
                self.output.verbose_ctx("resolver", &format!("{:?} declined", command));
                self.output.failure(&mut self.out, &CommandError::NotRecognized)?;
                return Ok(false);
            }
            Resolution::Unrecognized => {
                self.output.failure(&mut self.out, &CommandError::NotRecognized)?;
                return Ok(false);
            }
        };

        let mut ctx = Context {
            book,
            store,
            today: self.today.unwrap_or_else(|| Local::now().date_naive()),
            birthday_window: self.birthday_window,
        };

        match dispatch(command, &args, &mut ctx) {
            Ok(reply) => {
                self.output.reply(&mut self.out, &reply)?;
                Ok(reply.exit)
            }
            Err(err) => {
                self.output.verbose_ctx("dispatch", &format!("{:?} failed: {:?}", command, err));
                self.output.failure(&mut self.out, &err)?;
                Ok(false)
            }
        }
    }

    /// Consumes the session, returning its output stream
    pub fn into_output(self) -> W {
        self.out
    }
}
