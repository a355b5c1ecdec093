//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::output::{Output, OutputFormat};
use super::session::Session;
use crate::storage::{Config, ContactStore, Persistence};

#[derive(Parser)]
#[command(name = "address-book")]
#[command(author, version, about = "Interactive personal address book")]
pub struct Cli {
    /// Contact store file (overrides the config file)
    #[arg(long, short = 'F', env = "ADDRESS_BOOK_FILE")]
    pub file: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "ADDRESS_BOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    output.verbose_ctx("config", &format!("{:?}", config));

    let store = ContactStore::new(cli.file.unwrap_or(config.store));
    output.verbose_ctx("store", &format!("Using contact store: {}", store.path().display()));

    let mut book = store.load()?;
    output.verbose_ctx("store", &format!("Loaded {} contacts", book.len()));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), output)
        .with_prompt(config.prompt)
        .with_birthday_window(config.birthday_window);

    session.run(&mut book, &store)
}
