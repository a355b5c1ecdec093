//! # Command-Line Interface
//!
//! The interactive shell around the address book.
//!
//! ## Flow
//!
//! ```text
//! line -> parse_input -> Resolver (score, confirm) -> dispatch -> Output
//! ```
//!
//! - [`resolver`] maps an imprecise command word to a [`Command`]
//! - [`handlers`] run commands against the [`Directory`](crate::domain::Directory)
//!   and return a [`Reply`] or a [`CommandError`]
//! - [`Session`] owns the input/output streams and drives the loop
//!
//! ## Output Formats
//!
//! `--format text` (default) prints replies as plain lines;
//! `--format json` prints one JSON object per reply and hides the banner
//! and prompt.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and start the session.

mod app;
mod output;
mod similarity;
pub mod resolver;
pub mod handlers;
mod session;

pub use app::{Cli, run};
pub use output::{Output, OutputFormat};
pub use similarity::ratio;
pub use resolver::{Command, Confirm, Resolution, Resolver};
pub use handlers::{dispatch, CommandError, Context, Reply};
pub use session::{parse_input, Session};
