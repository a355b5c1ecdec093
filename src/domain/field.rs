//! Validated contact fields
//!
//! Each field type's constructor is the only way in: a value that fails
//! validation never becomes a field, so it can never reach a [`Record`].
//!
//! | Field | Rule |
//! |-------|------|
//! | [`Name`] | non-empty |
//! | [`Phone`] | exactly 10 ASCII digits |
//! | [`Email`] | `local@domain.tld` shape |
//! | [`Address`] | free-form |
//! | [`Birthday`] | `DD.MM.YYYY`, not in the future, at most 100 years ago |
//! | [`Note`] | free-form text plus an ordered, duplicate-free tag list |
//!
//! [`Record`]: super::Record

use std::fmt;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format used for entering, displaying and storing birthdays
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Oldest accepted birthday, in days before today (100 * 365.25)
const MAX_AGE_DAYS: i64 = 36_525;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Name field is required")]
    EmptyName,

    #[error("Invalid phone number '{0}': must be 10 digits")]
    InvalidPhone(String),

    #[error("Invalid email '{0}'. Please provide a correct email address")]
    InvalidEmail(String),

    #[error("Invalid birthday '{0}': date must be in the past and not more than 100 years ago, format DD.MM.YYYY required")]
    InvalidBirthday(String),
}

/// Contact name, the unique key of a contact in the directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(FieldError::EmptyName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A 10-digit phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        if value.len() != 10 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::InvalidPhone(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        if !EMAIL_RE.is_match(&value) {
            return Err(FieldError::InvalidEmail(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Date of birth
///
/// Range checks are relative to "today", so [`Birthday::parse_on`] takes the
/// reference date explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// Parses and validates a birthday against the given `today`
    pub fn parse_on(raw: &str, today: NaiveDate) -> Result<Self, FieldError> {
        let invalid = || FieldError::InvalidBirthday(raw.to_string());

        let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| invalid())?;
        if date > today || (today - date).num_days() > MAX_AGE_DAYS {
            return Err(invalid());
        }
        Ok(Self(date))
    }

    /// The anniversary in `year`; Feb 29 falls back to Feb 28 in common years
    pub fn occurrence_in(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.0.month(), self.0.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
    }

    /// The first anniversary on or after `today`
    pub fn next_occurrence(&self, today: NaiveDate) -> Option<NaiveDate> {
        let this_year = self.occurrence_in(today.year())?;
        if this_year < today {
            self.occurrence_in(today.year() + 1)
        } else {
            Some(this_year)
        }
    }
}

/// A free-text note with tags
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Note {
    text: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Adds a tag. Returns false (and changes nothing) if it is already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes a tag. Returns false if it was not present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let len_before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != len_before
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tags.is_empty() {
            write!(f, "{} [Tags: No tags]", self.text)
        } else {
            write!(f, "{} [Tags: {}]", self.text, self.tags.join(", "))
        }
    }
}

impl TryFrom<String> for Name {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Phone {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Email {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored birthdays are only checked for format: they were range-checked
/// when entered, and must stay loadable as they age.
impl TryFrom<String> for Birthday {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NaiveDate::parse_from_str(&value, DATE_FORMAT)
            .map(Self)
            .map_err(|_| FieldError::InvalidBirthday(value))
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl From<Birthday> for String {
    fn from(birthday: Birthday) -> Self {
        birthday.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn name_must_not_be_empty() {
        assert_eq!(Name::new(""), Err(FieldError::EmptyName));
        assert_eq!(Name::new("   "), Err(FieldError::EmptyName));
        assert_eq!(Name::new("Anna").unwrap().as_str(), "Anna");
    }

    #[test]
    fn phone_requires_ten_digits() {
        assert!(Phone::new("0123456789").is_ok());
        assert!(Phone::new("012345678").is_err());
        assert!(Phone::new("01234567890").is_err());
        assert!(Phone::new("abcdefghij").is_err());
        assert!(Phone::new("012-345-67").is_err());
    }

    #[test]
    fn email_validation() {
        assert!(Email::new("anna@example.com").is_ok());
        assert!(Email::new("first.last+tag@mail.example.org").is_ok());
        assert!(Email::new("anna@example").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("anna example.com").is_err());
    }

    #[test]
    fn birthday_rejects_future_dates() {
        let today = date(2024, 3, 13);
        assert!(Birthday::parse_on("13.03.2024", today).is_ok());
        assert!(matches!(
            Birthday::parse_on("14.03.2024", today),
            Err(FieldError::InvalidBirthday(_))
        ));
    }

    #[test]
    fn birthday_rejects_dates_older_than_a_century() {
        let today = date(2024, 3, 13);
        let limit = today - Duration::days(MAX_AGE_DAYS);
        let too_old = limit - Duration::days(1);

        assert!(Birthday::parse_on(&limit.format(DATE_FORMAT).to_string(), today).is_ok());
        assert!(Birthday::parse_on(&too_old.format(DATE_FORMAT).to_string(), today).is_err());
    }

    #[test]
    fn birthday_rejects_malformed_input() {
        let today = date(2024, 3, 13);
        assert!(Birthday::parse_on("1990-05-01", today).is_err());
        assert!(Birthday::parse_on("31.02.1990", today).is_err());
        assert!(Birthday::parse_on("yesterday", today).is_err());
    }

    #[test]
    fn leap_day_birthday_falls_back_in_common_years() {
        let birthday = Birthday::parse_on("29.02.2000", date(2024, 3, 13)).unwrap();
        assert_eq!(birthday.occurrence_in(2024), Some(date(2024, 2, 29)));
        assert_eq!(birthday.occurrence_in(2025), Some(date(2025, 2, 28)));
    }

    #[test]
    fn next_occurrence_rolls_over_to_next_year() {
        let birthday = Birthday::parse_on("01.01.1990", date(2024, 3, 13)).unwrap();
        assert_eq!(birthday.next_occurrence(date(2024, 3, 13)), Some(date(2025, 1, 1)));
        assert_eq!(birthday.next_occurrence(date(2024, 1, 1)), Some(date(2024, 1, 1)));
    }

    #[test]
    fn stored_birthday_skips_range_check() {
        let stored: Birthday = serde_json::from_str("\"01.01.1900\"").unwrap();
        assert_eq!(stored.to_string(), "01.01.1900");
    }

    #[test]
    fn note_tags_reject_duplicates() {
        let mut note = Note::new("met at conference");
        assert!(note.add_tag("work"));
        assert!(note.add_tag("rust"));
        assert!(!note.add_tag("work"));
        assert_eq!(note.tags(), ["work", "rust"]);
    }

    #[test]
    fn note_remove_missing_tag_is_noop() {
        let mut note = Note::new("text");
        note.add_tag("a");
        assert!(!note.remove_tag("b"));
        assert!(note.remove_tag("a"));
        assert!(note.tags().is_empty());
    }

    #[test]
    fn note_display() {
        let mut note = Note::new("call back");
        assert_eq!(note.to_string(), "call back [Tags: No tags]");
        note.add_tag("urgent");
        note.add_tag("work");
        assert_eq!(note.to_string(), "call back [Tags: urgent, work]");
    }

    #[test]
    fn invalid_phone_is_rejected_on_load() {
        let result: Result<Phone, _> = serde_json::from_str("\"12345\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn any_ten_digit_string_is_a_phone(digits in "[0-9]{10}") {
            prop_assert!(Phone::new(digits).is_ok());
        }

        #[test]
        fn other_lengths_are_rejected(digits in "[0-9]{0,9}|[0-9]{11,16}") {
            prop_assert!(Phone::new(digits).is_err());
        }

        #[test]
        fn birthdays_in_range_round_trip(days_ago in 0i64..=MAX_AGE_DAYS) {
            let today = date(2024, 3, 13);
            let raw = (today - Duration::days(days_ago)).format(DATE_FORMAT).to_string();
            let birthday = Birthday::parse_on(&raw, today).unwrap();
            prop_assert_eq!(birthday.to_string(), raw);
        }

        #[test]
        fn future_birthdays_are_rejected(days_ahead in 1i64..5000) {
            let today = date(2024, 3, 13);
            let raw = (today + Duration::days(days_ahead)).format(DATE_FORMAT).to_string();
            prop_assert!(Birthday::parse_on(&raw, today).is_err());
        }
    }
}
