//! Domain models for the address book
//!
//! Contains the contact model and its queries, without any I/O concerns.

mod field;
mod record;
mod directory;

pub use field::{Address, Birthday, Email, FieldError, Name, Note, Phone, DATE_FORMAT};
pub use record::Record;
pub use directory::{weekday_name, BirthdayWindow, Directory};
