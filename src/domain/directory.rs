//! The address book: contacts keyed by name, plus derived queries
//!
//! Records are kept in a `BTreeMap`, so listings and query results come out
//! in name order.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::{Regex, RegexBuilder};

use super::record::Record;

/// Weekdays a birthday can be reported on, in display order
const WORKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Full English name of a weekday
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Contacts with a birthday in the next N days, grouped by weekday
///
/// Only Monday..Friday buckets exist: occurrences on a weekend are
/// reported on Monday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayWindow {
    buckets: [(Weekday, Vec<String>); 5],
}

impl BirthdayWindow {
    fn new() -> Self {
        Self {
            buckets: WORKDAYS.map(|day| (day, Vec::new())),
        }
    }

    fn push(&mut self, day: Weekday, name: &str) {
        let day = match day {
            Weekday::Sat | Weekday::Sun => Weekday::Mon,
            other => other,
        };
        if let Some((_, names)) = self.buckets.iter_mut().find(|(d, _)| *d == day) {
            names.push(name.to_string());
        }
    }

    /// True when nobody has a birthday in the window
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|(_, names)| names.is_empty())
    }

    /// Names on the given weekday (weekend days always yield an empty slice)
    pub fn on(&self, day: Weekday) -> &[String] {
        self.buckets
            .iter()
            .find(|(d, _)| *d == day)
            .map(|(_, names)| names.as_slice())
            .unwrap_or(&[])
    }

    /// Non-empty buckets, Monday first
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[String])> {
        self.buckets
            .iter()
            .filter(|(_, names)| !names.is_empty())
            .map(|(day, names)| (*day, names.as_slice()))
    }
}

/// All contacts, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    records: BTreeMap<String, Record>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, silently replacing any record with the same name
    pub fn add_record(&mut self, record: Record) {
        self.records
            .insert(record.name().as_str().to_string(), record);
    }

    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    /// Deletes a contact. Returns the removed record, if there was one.
    pub fn remove(&mut self, name: &str) -> Option<Record> {
        self.records.remove(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Birthdays falling in `[today, today + threshold_days)`
    pub fn upcoming_birthdays(&self, threshold_days: u32, today: NaiveDate) -> BirthdayWindow {
        let mut window = BirthdayWindow::new();

        for record in self.iter() {
            let Some(next) = record.birthday().and_then(|b| b.next_occurrence(today)) else {
                continue;
            };

            let offset = (next - today).num_days();
            if (0..i64::from(threshold_days)).contains(&offset) {
                let day = (today + Duration::days(offset)).weekday();
                window.push(day, record.name().as_str());
            }
        }

        window
    }

    /// Records whose note carries exactly `tag`
    pub fn by_tag(&self, tag: &str) -> Vec<&Record> {
        self.iter()
            .filter(|r| r.note().is_some_and(|n| n.has_tag(tag)))
            .collect()
    }

    /// Records whose note text matches `pattern`, case-insensitively
    ///
    /// Records without a note never match. A malformed pattern is an error,
    /// distinct from an empty result.
    pub fn by_note(&self, pattern: &str) -> Result<Vec<&Record>, regex::Error> {
        let re: Regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;

        Ok(self
            .iter()
            .filter(|r| r.note().is_some_and(|n| re.is_match(n.text())))
            .collect())
    }

    /// Records where `value` equals the name, birthday, an email or a phone
    ///
    /// Each matching field contributes one entry, so a record matching on
    /// several fields appears several times.
    pub fn by_item(&self, value: &str) -> Vec<&Record> {
        let mut matches = Vec::new();

        for record in self.iter() {
            if record.name().as_str() == value {
                matches.push(record);
            }
            if record.birthday().is_some_and(|b| b.to_string() == value) {
                matches.push(record);
            }
            for email in record.emails() {
                if email.as_str() == value {
                    matches.push(record);
                }
            }
            if record.find_phone(value).is_some() {
                matches.push(record);
            }
        }

        matches
    }
}

impl FromIterator<Record> for Directory {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut directory = Directory::new();
        for record in iter {
            directory.add_record(record);
        }
        directory
    }
}
