//! # Storage Layer
//!
//! Persistence and configuration for the address book.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Contacts | JSONL (one JSON record per line) | `addressbook.jsonl` (configurable) |
//! | Config | TOML | `<config dir>/address-book/config.toml` |
//!
//! The contact store is read once at startup and rewritten wholesale on
//! `save` and on exit. Writes are atomic (temp file + rename) and locked
//! with `fs2`.

mod jsonl;
mod config;

use anyhow::Result;

use crate::domain::Directory;

pub use jsonl::{ContactStore, DEFAULT_STORE_FILE};
pub use config::{Config, ConfigError};

/// Loads and saves a whole address book
pub trait Persistence {
    /// Returns the stored address book, or an empty one if nothing is stored
    fn load(&self) -> Result<Directory>;

    /// Replaces the stored address book
    fn save(&self, book: &Directory) -> Result<()>;
}
