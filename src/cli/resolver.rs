//! Command resolution
//!
//! Maps the first word of an input line to a [`Command`]:
//!
//! 1. Exact literals (`close`/`exit`, `save`, `help`/`?`) match by equality.
//! 2. Otherwise every fuzzy command is scored in [`REGISTRY`] order, and the
//!    FIRST one whose score exceeds its threshold is the candidate, even if a
//!    later command would score higher.
//! 3. A perfect score dispatches immediately; anything less asks the user to
//!    confirm. Declining does not fall through to the next candidate.
//!
//! ```text
//! AwaitingInput -> Scoring -> [AwaitingConfirmation] -> Dispatched
//!                     \               \
//!                      -> Unrecognized -> Declined
//! ```

use super::similarity::ratio;

/// Canonical commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Add,
    RemovePhone,
    Change,
    Phone,
    All,
    AddBirthday,
    ShowBirthday,
    Birthdays,
    Hello,
    AddNote,
    EditNote,
    RemoveNote,
    FindByNote,
    FindByItem,
    AddAddress,
    RemoveAddress,
    AddEmail,
    TagAdd,
    TagRemove,
    FindByTag,
    Delete,
    Close,
    Save,
    Help,
}

/// How a command is recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Similarity score must exceed the threshold
    Fuzzy { threshold: u8 },
    /// Token must equal one of the literals
    Exact(&'static [&'static str]),
}

/// Registry entry for one command
#[derive(Debug)]
pub struct CommandSpec {
    pub command: Command,
    pub name: &'static str,
    pub matcher: Matcher,
    pub usage: &'static str,
    pub summary: &'static str,
}

const fn fuzzy(
    command: Command,
    name: &'static str,
    threshold: u8,
    usage: &'static str,
    summary: &'static str,
) -> CommandSpec {
    CommandSpec {
        command,
        name,
        matcher: Matcher::Fuzzy { threshold },
        usage,
        summary,
    }
}

const fn exact(
    command: Command,
    literals: &'static [&'static str],
    usage: &'static str,
    summary: &'static str,
) -> CommandSpec {
    CommandSpec {
        command,
        name: literals[0],
        matcher: Matcher::Exact(literals),
        usage,
        summary,
    }
}

/// All commands, in resolution order
///
/// Thresholds are tuned per command: short common words need a higher bar
/// than long distinctive ones.
pub static REGISTRY: &[CommandSpec] = &[
    fuzzy(
        Command::Add,
        "add",
        66,
        "add [name] [phone]",
        "add a contact with a 10-digit phone number (replaces an existing contact)",
    ),
    fuzzy(
        Command::RemovePhone,
        "remove-phone",
        91,
        "remove-phone [name] [phone]",
        "remove a phone number from a contact",
    ),
    fuzzy(
        Command::Change,
        "change",
        82,
        "change [name] [new phone]",
        "replace the first phone number of a contact",
    ),
    fuzzy(
        Command::Phone,
        "phone",
        79,
        "phone [name]",
        "show the first phone number of a contact",
    ),
    fuzzy(Command::All, "all", 66, "all", "list all contacts"),
    fuzzy(
        Command::AddBirthday,
        "add-birthday",
        91,
        "add-birthday [name] [DD.MM.YYYY]",
        "set the birthday of a contact",
    ),
    fuzzy(
        Command::ShowBirthday,
        "show-birthday",
        91,
        "show-birthday [name]",
        "show the birthday of a contact",
    ),
    fuzzy(
        Command::Birthdays,
        "birthdays",
        88,
        "birthdays [days]",
        "list birthdays in the next [days] days (default 7)",
    ),
    fuzzy(Command::Hello, "hello", 79, "hello", "say hello"),
    fuzzy(
        Command::AddNote,
        "add-note",
        91,
        "add-note [name] [note]",
        "set the note of a contact (replaces note and tags)",
    ),
    fuzzy(
        Command::EditNote,
        "edit-note",
        91,
        "edit-note [name] [new note]",
        "change the text of an existing note",
    ),
    fuzzy(
        Command::RemoveNote,
        "remove-note",
        91,
        "remove-note [name]",
        "remove the note of a contact",
    ),
    fuzzy(
        Command::FindByNote,
        "find-by-note",
        91,
        "find-by-note [regex pattern]",
        "find contacts whose note matches a pattern",
    ),
    fuzzy(
        Command::FindByItem,
        "find-by-item",
        91,
        "find-by-item [name/birthday/email/phone]",
        "find contacts by an exact field value",
    ),
    fuzzy(
        Command::AddAddress,
        "add-address",
        90,
        "add-address [name] [address]",
        "add an address to a contact",
    ),
    fuzzy(
        Command::RemoveAddress,
        "remove-address",
        66,
        "remove-address [name] [address]",
        "remove ALL addresses of a contact",
    ),
    fuzzy(
        Command::AddEmail,
        "add-email",
        66,
        "add-email [name] [email]",
        "add an email address to a contact",
    ),
    fuzzy(
        Command::TagAdd,
        "tag-add",
        91,
        "tag-add [name] [tag]",
        "tag the note of a contact",
    ),
    fuzzy(
        Command::TagRemove,
        "tag-remove",
        91,
        "tag-remove [name] [tag]",
        "remove a tag from the note of a contact",
    ),
    fuzzy(
        Command::FindByTag,
        "find-by-tag",
        91,
        "find-by-tag [tag]",
        "find contacts whose note carries a tag",
    ),
    fuzzy(
        Command::Delete,
        "delete",
        91,
        "delete [name]",
        "delete a contact",
    ),
    exact(
        Command::Close,
        &["close", "exit"],
        "close | exit",
        "save and quit",
    ),
    exact(Command::Save, &["save"], "save", "save the address book"),
    exact(Command::Help, &["help", "?"], "help | ?", "show this help"),
];

/// Looks up the registry entry for a command
pub fn command_spec(command: Command) -> &'static CommandSpec {
    REGISTRY
        .iter()
        .find(|s| s.command == command)
        .unwrap_or_else(|| unreachable!("every command is registered"))
}

/// Asks the user whether a guessed command is what they meant
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// A fuzzy match awaiting dispatch or confirmation
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub spec: &'static CommandSpec,
    pub score: u8,
}

impl Candidate {
    pub fn is_perfect(&self) -> bool {
        self.score == 100
    }
}

/// Outcome of resolving one input token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Run this command
    Dispatch(Command),
    /// A guess was offered and rejected
    Declined(Command),
    /// Nothing scored above its threshold
    Unrecognized,
}

/// Resolves input tokens against a command registry
pub struct Resolver {
    specs: &'static [CommandSpec],
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self { specs: REGISTRY }
    }

    /// Exact-literal match, bypassing scoring
    pub fn exact(&self, token: &str) -> Option<Command> {
        self.specs.iter().find_map(|s| match s.matcher {
            Matcher::Exact(literals) if literals.contains(&token) => Some(s.command),
            _ => None,
        })
    }

    /// First fuzzy command, in registry order, whose score exceeds its threshold
    pub fn candidate(&self, token: &str) -> Option<Candidate> {
        self.specs.iter().find_map(|s| match s.matcher {
            Matcher::Fuzzy { threshold } => {
                let score = ratio(token, s.name);
                (score > threshold).then_some(Candidate { spec: s, score })
            }
            Matcher::Exact(_) => None,
        })
    }

    /// Resolves a token, asking for confirmation on imperfect matches
    pub fn resolve(&self, token: &str, confirm: &mut impl Confirm) -> Resolution {
        if let Some(command) = self.exact(token) {
            return Resolution::Dispatch(command);
        }

        let Some(candidate) = self.candidate(token) else {
            return Resolution::Unrecognized;
        };

        if candidate.is_perfect() {
            return Resolution::Dispatch(candidate.spec.command);
        }

        let question = format!("Did you mean to enter '{}'? (y/n): ", candidate.spec.usage);
        if confirm.confirm(&question) {
            Resolution::Dispatch(candidate.spec.command)
        } else {
            Resolution::Declined(candidate.spec.command)
        }
    }
}
