//! Output formatting for the interactive session

use std::io::{self, Write};

use super::handlers::{CommandError, Reply};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Writes a successful reply
    pub fn reply(&self, out: &mut impl Write, reply: &Reply) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                for line in &reply.lines {
                    writeln!(out, "{}", line)?;
                }
                Ok(())
            }
            OutputFormat::Json => {
                let mut body = serde_json::to_value(reply)?;
                body["success"] = true.into();
                writeln!(out, "{}", body)
            }
        }
    }

    /// Writes a failed command
    pub fn failure(&self, out: &mut impl Write, error: &CommandError) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(out, "{}", error),
            OutputFormat::Json => writeln!(
                out,
                "{}",
                serde_json::json!({
                    "success": false,
                    "error": error.to_string(),
                })
            ),
        }
    }

    /// Writes free text (banner, prompt, confirmation question); suppressed in JSON mode
    pub fn text(&self, out: &mut impl Write, text: &str) -> io::Result<()> {
        if self.format == OutputFormat::Text {
            write!(out, "{}", text)?;
            out.flush()?;
        }
        Ok(())
    }

    /// Returns true if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
