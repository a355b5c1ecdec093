//! Address Book - an interactive personal contact manager
//!
//! Stores named contacts with phones, emails, addresses, a birthday and a
//! tagged note. Commands are typed at a prompt and matched approximately,
//! so small typos are offered back for confirmation instead of failing.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Birthday, Directory, FieldError, Note, Record};
