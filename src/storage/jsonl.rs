//! JSONL storage for contacts
//!
//! Contacts are stored with one JSON record per line, sorted by name.
//! Uses file locking so two sessions never interleave a write.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Persistence;
use crate::domain::{Directory, Record};

/// Default store file name, relative to the working directory
pub const DEFAULT_STORE_FILE: &str = "addressbook.jsonl";

/// Store for the address book in JSONL format
pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    /// Creates a new contact store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every contact from the store
    ///
    /// A missing or empty file is an empty address book. A malformed line is
    /// an error, so a damaged store is never silently overwritten.
    pub fn read_all(&self) -> Result<Directory> {
        if !self.path.exists() {
            return Ok(Directory::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open contact store: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on contact store")?;

        let reader = BufReader::new(&file);
        let mut book = Directory::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let record: Record = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse contact at line {}", line_num + 1))?;

            book.add_record(record);
        }

        Ok(book)
    }

    /// Writes the whole address book (full rewrite)
    pub fn write_all(&self, book: &Directory) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on contact store")?;

            let mut writer = BufWriter::new(&file);

            // Directory iterates in name order
            for record in book.iter() {
                let line = serde_json::to_string(record).context("Failed to serialize contact")?;
                writeln!(writer, "{}", line).context("Failed to write contact")?;
            }

            writer.flush().context("Failed to flush contact store")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

impl Persistence for ContactStore {
    fn load(&self) -> Result<Directory> {
        self.read_all()
    }

    fn save(&self, book: &Directory) -> Result<()> {
        self.write_all(book)
    }
}
