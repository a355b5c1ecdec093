//! Command handlers
//!
//! Every handler takes its arguments and the session state explicitly and
//! returns a [`Reply`] or a [`CommandError`]; nothing here prints. A failed
//! handler leaves the address book untouched.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::resolver::{command_spec, Command, REGISTRY};
use crate::domain::{weekday_name, Birthday, Directory, FieldError, Record};
use crate::storage::Persistence;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("Contact {0} not found")]
    ContactNotFound(String),

    #[error("Phone number {phone} not found for contact {name}")]
    PhoneNotFound { name: String, phone: String },

    #[error("No phone numbers for contact {0}")]
    NoPhones(String),

    #[error("No note for contact {0}. Please add a note first")]
    NoNote(String),

    #[error("Invalid command format. Use '{0}'")]
    Usage(&'static str),

    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid command. Please try again")]
    NotRecognized,

    #[error("Failed to save address book: {0:#}")]
    Storage(anyhow::Error),
}

/// Result of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub lines: Vec<String>,

    /// The session should end after this reply
    #[serde(skip)]
    pub exit: bool,
}

impl Reply {
    pub fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            exit: false,
        }
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self { lines, exit: false }
    }
}

/// Everything a handler may read or change
pub struct Context<'a> {
    pub book: &'a mut Directory,
    pub store: &'a dyn Persistence,
    pub today: NaiveDate,
    pub birthday_window: u32,
}

type HandlerResult = Result<Reply, CommandError>;

/// Runs a resolved command
pub fn dispatch(command: Command, args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    match command {
        Command::Add => add(args, ctx),
        Command::RemovePhone => remove_phone(args, ctx),
        Command::Change => change(args, ctx),
        Command::Phone => phone(args, ctx),
        Command::All => all(ctx),
        Command::AddBirthday => add_birthday(args, ctx),
        Command::ShowBirthday => show_birthday(args, ctx),
        Command::Birthdays => birthdays(args, ctx),
        Command::Hello => Ok(Reply::line("Hello!")),
        Command::AddNote => add_note(args, ctx),
        Command::EditNote => edit_note(args, ctx),
        Command::RemoveNote => remove_note(args, ctx),
        Command::FindByNote => find_by_note(args, ctx),
        Command::FindByItem => find_by_item(args, ctx),
        Command::AddAddress => add_address(args, ctx),
        Command::RemoveAddress => remove_address(args, ctx),
        Command::AddEmail => add_email(args, ctx),
        Command::TagAdd => tag_add(args, ctx),
        Command::TagRemove => tag_remove(args, ctx),
        Command::FindByTag => find_by_tag(args, ctx),
        Command::Delete => delete(args, ctx),
        Command::Save => save(ctx),
        Command::Close => close(ctx),
        Command::Help => Ok(help()),
    }
}

fn usage(command: Command) -> CommandError {
    CommandError::Usage(command_spec(command).usage)
}

fn record_mut<'b>(book: &'b mut Directory, name: &str) -> Result<&'b mut Record, CommandError> {
    book.find_mut(name)
        .ok_or_else(|| CommandError::ContactNotFound(name.to_string()))
}

fn record<'b>(book: &'b Directory, name: &str) -> Result<&'b Record, CommandError> {
    book.find(name)
        .ok_or_else(|| CommandError::ContactNotFound(name.to_string()))
}

fn render(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.to_string()).collect()
}

fn add(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, phone] = args else {
        return Err(usage(Command::Add));
    };

    let mut record = Record::new(name.as_str())?;
    record.add_phone(phone)?;
    ctx.book.add_record(record);

    Ok(Reply::line(format!("Contact {} added with phone number {}", name, phone)))
}

fn remove_phone(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, phone] = args else {
        return Err(usage(Command::RemovePhone));
    };

    if !record_mut(ctx.book, name)?.remove_phone(phone) {
        return Err(CommandError::PhoneNotFound {
            name: name.clone(),
            phone: phone.clone(),
        });
    }

    Ok(Reply::line(format!("Phone number {} removed for contact {}.", phone, name)))
}

fn change(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, new_phone] = args else {
        return Err(usage(Command::Change));
    };

    let record = record_mut(ctx.book, name)?;
    let old = record
        .first_phone()
        .ok_or_else(|| CommandError::NoPhones(name.clone()))?
        .to_string();
    record.edit_phone(&old, new_phone)?;

    Ok(Reply::line(format!("Phone number changed for contact {}", name)))
}

fn phone(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, ..] = args else {
        return Err(usage(Command::Phone));
    };

    let phone = record(ctx.book, name)?
        .first_phone()
        .ok_or_else(|| CommandError::NoPhones(name.clone()))?;

    Ok(Reply::line(format!("Phone number for {}: {}", name, phone)))
}

fn all(ctx: &mut Context<'_>) -> HandlerResult {
    if ctx.book.is_empty() {
        return Ok(Reply::line("No contacts in the address book."));
    }

    let mut lines = vec!["All contacts:".to_string()];
    lines.extend(ctx.book.iter().map(|r| r.to_string()));
    Ok(Reply::lines(lines))
}

fn add_birthday(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, raw] = args else {
        return Err(usage(Command::AddBirthday));
    };

    let record = record_mut(ctx.book, name)?;
    record.set_birthday(Birthday::parse_on(raw, ctx.today)?);

    Ok(Reply::line(format!("Birthday added for contact {}", name)))
}

fn show_birthday(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, ..] = args else {
        return Err(usage(Command::ShowBirthday));
    };

    let reply = match record(ctx.book, name)?.birthday() {
        Some(birthday) => format!("Birthday for {}: {}", name, birthday),
        None => format!("No birthday set for {}", name),
    };
    Ok(Reply::line(reply))
}

fn birthdays(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let days = match args.first() {
        Some(raw) => raw.parse::<u32>().map_err(|_| usage(Command::Birthdays))?,
        None => ctx.birthday_window,
    };

    let window = ctx.book.upcoming_birthdays(days, ctx.today);
    if window.is_empty() {
        return Ok(Reply::line(format!("No birthdays in the next {} days.", days)));
    }

    let mut lines = vec![format!("Birthdays in the next {} days:", days)];
    lines.extend(
        window
            .iter()
            .map(|(day, names)| format!("{}: {}", weekday_name(day), names.join(", "))),
    );
    Ok(Reply::lines(lines))
}

fn add_note(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, text @ ..] = args else {
        return Err(usage(Command::AddNote));
    };

    record_mut(ctx.book, name)?.add_note(text.join(" "));
    Ok(Reply::line(format!("Note added for contact {}", name)))
}

fn edit_note(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, text @ ..] = args else {
        return Err(usage(Command::EditNote));
    };

    if !record_mut(ctx.book, name)?.edit_note(text.join(" ")) {
        return Err(CommandError::NoNote(name.clone()));
    }
    Ok(Reply::line(format!("Note edited for contact {}", name)))
}

fn remove_note(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, ..] = args else {
        return Err(usage(Command::RemoveNote));
    };

    record_mut(ctx.book, name)?.remove_note();
    Ok(Reply::line(format!("Note removed for contact {}", name)))
}

fn find_by_note(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    if args.is_empty() {
        return Err(usage(Command::FindByNote));
    }

    let matches = ctx.book.by_note(&args.join(" "))?;
    if matches.is_empty() {
        return Ok(Reply::line("No contacts found with the given note content."));
    }

    let mut lines = vec!["Contacts with matching note content:".to_string()];
    lines.extend(matches.iter().map(|r| r.name().to_string()));
    Ok(Reply::lines(lines))
}

fn find_by_item(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [item, ..] = args else {
        return Err(usage(Command::FindByItem));
    };

    let matches = ctx.book.by_item(item);
    if matches.is_empty() {
        return Ok(Reply::line(format!("No contacts found for {}", item)));
    }
    Ok(Reply::lines(render(&matches)))
}

fn add_address(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, address @ ..] = args else {
        return Err(usage(Command::AddAddress));
    };
    if address.is_empty() {
        return Err(usage(Command::AddAddress));
    }

    record_mut(ctx.book, name)?.add_address(&address.join(" "));
    Ok(Reply::line(format!("Address added to contact {}", name)))
}

fn remove_address(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, address @ ..] = args else {
        return Err(usage(Command::RemoveAddress));
    };

    record_mut(ctx.book, name)?.remove_address(&address.join(" "));
    Ok(Reply::line(format!("All addresses removed from contact {}", name)))
}

fn add_email(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, email] = args else {
        return Err(usage(Command::AddEmail));
    };

    record_mut(ctx.book, name)?.add_email(email)?;
    Ok(Reply::line(format!("e-mail added to contact {}", name)))
}

fn tag_add(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, tag] = args else {
        return Err(usage(Command::TagAdd));
    };

    let note = record_mut(ctx.book, name)?
        .note_mut()
        .ok_or_else(|| CommandError::NoNote(name.clone()))?;

    if note.add_tag(tag.as_str()) {
        Ok(Reply::line(format!("Tag '{}' added for contact {}", tag, name)))
    } else {
        Ok(Reply::line(format!("Tag '{}' already exists for contact {}", tag, name)))
    }
}

fn tag_remove(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, tag] = args else {
        return Err(usage(Command::TagRemove));
    };

    let note = record_mut(ctx.book, name)?
        .note_mut()
        .ok_or_else(|| CommandError::NoNote(name.clone()))?;

    if note.remove_tag(tag) {
        Ok(Reply::line(format!("Tag '{}' removed for contact {}", tag, name)))
    } else {
        Ok(Reply::line(format!("Tag '{}' not found for contact {}", tag, name)))
    }
}

fn find_by_tag(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [tag] = args else {
        return Err(usage(Command::FindByTag));
    };

    let matches = ctx.book.by_tag(tag);
    if matches.is_empty() {
        return Ok(Reply::line(format!("No contacts tagged '{}'", tag)));
    }

    let mut lines = vec![format!("Contacts tagged '{}':", tag)];
    lines.extend(render(&matches));
    Ok(Reply::lines(lines))
}

fn delete(args: &[String], ctx: &mut Context<'_>) -> HandlerResult {
    let [name, ..] = args else {
        return Err(usage(Command::Delete));
    };

    ctx.book
        .remove(name)
        .ok_or_else(|| CommandError::ContactNotFound(name.clone()))?;
    Ok(Reply::line(format!("Contact {} deleted.", name)))
}

fn save(ctx: &mut Context<'_>) -> HandlerResult {
    ctx.store.save(ctx.book).map_err(CommandError::Storage)?;
    Ok(Reply::line("Saving your contact list"))
}

fn close(ctx: &mut Context<'_>) -> HandlerResult {
    ctx.store.save(ctx.book).map_err(CommandError::Storage)?;
    Ok(Reply {
        lines: vec!["Saving address book and closing the app.".to_string()],
        exit: true,
    })
}

fn help() -> Reply {
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        REGISTRY
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{:>2}. {:<42} {}", i + 1, s.usage, s.summary)),
    );
    Reply::lines(lines)
}
