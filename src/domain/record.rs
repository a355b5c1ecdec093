//! Contact record
//!
//! A record owns every field of one contact. The name is fixed at creation;
//! everything else is mutated in place.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::field::{Address, Birthday, Email, FieldError, Name, Note, Phone};

/// One contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    phones: Vec<Phone>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    emails: Vec<Email>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    addresses: Vec<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthday: Option<Birthday>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<Note>,
}

impl Record {
    /// Creates an empty contact. Fails if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, FieldError> {
        Ok(Self {
            name: Name::new(name)?,
            phones: Vec::new(),
            emails: Vec::new(),
            addresses: Vec::new(),
            birthday: None,
            note: None,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    pub fn note_mut(&mut self) -> Option<&mut Note> {
        self.note.as_mut()
    }

    // Phones

    /// Appends a phone. Duplicates are allowed.
    pub fn add_phone(&mut self, phone: &str) -> Result<(), FieldError> {
        self.phones.push(Phone::new(phone)?);
        Ok(())
    }

    /// Removes every phone equal to `phone`. Returns true if any was removed.
    pub fn remove_phone(&mut self, phone: &str) -> bool {
        let len_before = self.phones.len();
        self.phones.retain(|p| p.as_str() != phone);
        self.phones.len() != len_before
    }

    /// Rewrites every phone equal to `old` as `new`
    ///
    /// The new number is validated even when nothing matches; a missing
    /// `old` leaves the list untouched and returns 0.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<usize, FieldError> {
        let new = Phone::new(new)?;
        let mut changed = 0;
        for phone in self.phones.iter_mut().filter(|p| p.as_str() == old) {
            *phone = new.clone();
            changed += 1;
        }
        Ok(changed)
    }

    /// First phone equal to `phone`
    pub fn find_phone(&self, phone: &str) -> Option<&Phone> {
        self.phones.iter().find(|p| p.as_str() == phone)
    }

    pub fn first_phone(&self) -> Option<&Phone> {
        self.phones.first()
    }

    // Emails and addresses

    pub fn add_email(&mut self, email: &str) -> Result<(), FieldError> {
        self.emails.push(Email::new(email)?);
        Ok(())
    }

    /// Appends an address without deduplication
    pub fn add_address(&mut self, address: &str) {
        self.addresses.push(Address::new(address));
    }

    /// Clears ALL addresses, whatever `_address` names
    ///
    /// This is a full clear, not a per-item removal. Kept for compatibility
    /// with existing address books and scripts; see DESIGN.md.
    pub fn remove_address(&mut self, _address: &str) {
        self.addresses.clear();
    }

    // Birthday

    /// Sets the birthday, replacing any previous one
    pub fn set_birthday(&mut self, birthday: Birthday) {
        self.birthday = Some(birthday);
    }

    // Note

    /// Sets the note, replacing any previous note and its tags
    pub fn add_note(&mut self, text: impl Into<String>) {
        self.note = Some(Note::new(text));
    }

    /// Replaces the note text, keeping tags. Returns false if there is no note.
    pub fn edit_note(&mut self, text: impl Into<String>) -> bool {
        match self.note.as_mut() {
            Some(note) => {
                note.set_text(text);
                true
            }
            None => false,
        }
    }

    pub fn remove_note(&mut self) {
        self.note = None;
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contact name: {}, Phones: ", self.name)?;
        if self.phones.is_empty() {
            f.write_str("No phones")?;
        } else {
            f.write_str(&join(&self.phones, "; "))?;
        }

        if let Some(birthday) = &self.birthday {
            write!(f, ", Birthday: {}", birthday)?;
        }
        if !self.addresses.is_empty() {
            write!(f, ", Addresses: {}", join(&self.addresses, ", "))?;
        }
        if !self.emails.is_empty() {
            write!(f, ", e-mail: {}", join(&self.emails, ", "))?;
        }
        if let Some(note) = &self.note {
            write!(f, ", Note: {}", note)?;
        }
        Ok(())
    }
}

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record_with_phones(phones: &[&str]) -> Record {
        let mut record = Record::new("Anna").unwrap();
        for phone in phones {
            record.add_phone(phone).unwrap();
        }
        record
    }

    #[test]
    fn new_record_requires_name() {
        assert_eq!(Record::new(""), Err(FieldError::EmptyName));
    }

    #[test]
    fn invalid_phone_is_not_added() {
        let mut record = Record::new("Anna").unwrap();
        assert!(record.add_phone("123").is_err());
        assert!(record.phones().is_empty());
    }

    #[test]
    fn remove_phone_removes_all_matches() {
        let mut record = record_with_phones(&["0123456789", "1111111111", "0123456789"]);
        assert!(record.remove_phone("0123456789"));
        assert_eq!(record.phones().len(), 1);
        assert!(!record.remove_phone("0123456789"));
    }

    #[test]
    fn edit_phone_rewrites_every_match() {
        let mut record = record_with_phones(&["0123456789", "1111111111", "0123456789"]);
        let changed = record.edit_phone("0123456789", "9999999999").unwrap();
        assert_eq!(changed, 2);
        assert!(record.find_phone("0123456789").is_none());
        assert_eq!(record.phones()[1].as_str(), "1111111111");
    }

    #[test]
    fn edit_phone_with_absent_old_is_noop() {
        let mut record = record_with_phones(&["0123456789"]);
        let before = record.phones().to_vec();
        assert_eq!(record.edit_phone("5555555555", "9999999999").unwrap(), 0);
        assert_eq!(record.phones(), before.as_slice());
    }

    #[test]
    fn edit_phone_validates_new_number() {
        let mut record = record_with_phones(&["0123456789"]);
        assert!(record.edit_phone("0123456789", "12").is_err());
        assert_eq!(record.phones()[0].as_str(), "0123456789");
    }

    #[test]
    fn find_phone_returns_first_match() {
        let record = record_with_phones(&["0123456789", "1111111111"]);
        assert_eq!(record.find_phone("1111111111").unwrap().as_str(), "1111111111");
        assert!(record.find_phone("2222222222").is_none());
    }

    #[test]
    fn remove_address_clears_everything() {
        let mut record = Record::new("Anna").unwrap();
        record.add_address("Main St 1");
        record.add_address("Main St 1");
        record.add_address("Side Rd 2");
        assert_eq!(record.addresses().len(), 3);

        record.remove_address("never added");
        assert!(record.addresses().is_empty());
    }

    #[test]
    fn edit_note_without_note_does_not_create_one() {
        let mut record = Record::new("Anna").unwrap();
        assert!(!record.edit_note("text"));
        assert!(record.note().is_none());

        record.add_note("first");
        record.note_mut().unwrap().add_tag("x");
        assert!(record.edit_note("second"));
        assert_eq!(record.note().unwrap().text(), "second");
        assert_eq!(record.note().unwrap().tags(), ["x"]);

        record.remove_note();
        assert!(record.note().is_none());
    }

    #[test]
    fn set_birthday_overwrites() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        let mut record = Record::new("Anna").unwrap();
        record.set_birthday(Birthday::parse_on("01.01.1990", today).unwrap());
        record.set_birthday(Birthday::parse_on("02.02.1991", today).unwrap());
        assert_eq!(record.birthday().unwrap().to_string(), "02.02.1991");
    }

    #[test]
    fn display_minimal_record() {
        let record = Record::new("Anna").unwrap();
        assert_eq!(record.to_string(), "Contact name: Anna, Phones: No phones");
    }

    #[test]
    fn display_full_record_in_fixed_order() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        let mut record = record_with_phones(&["0123456789", "1111111111"]);
        record.set_birthday(Birthday::parse_on("05.06.1990", today).unwrap());
        record.add_address("Main St 1");
        record.add_email("anna@example.com").unwrap();
        record.add_note("likes tea");
        record.note_mut().unwrap().add_tag("friend");

        assert_eq!(
            record.to_string(),
            "Contact name: Anna, Phones: 0123456789; 1111111111, Birthday: 05.06.1990, \
             Addresses: Main St 1, e-mail: anna@example.com, Note: likes tea [Tags: friend]"
        );
    }

    #[test]
    fn serde_omits_empty_fields() {
        let record = record_with_phones(&["0123456789"]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"Anna","phones":["0123456789"]}"#);

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
