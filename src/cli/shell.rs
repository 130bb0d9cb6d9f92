//! Line-oriented phonebook session
//!
//! Reads one command per line from stdin and applies it to an in-memory
//! store seeded at startup. Useful for scripting and for terminals where the
//! TUI is not available.
//!
//! ```text
//! add Rosie Simpson, 459-12-56
//! filter ros
//! list
//! delete id-1
//! quit
//! ```

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use thiserror::Error;

use super::form::{ContactForm, Submission};
use super::notify::ConsoleNotifier;
use super::output::Output;
use crate::domain::{ContactId, ContactStore};

const HELP: &str = "\
Commands:
  add <name>, <number>   Add a contact
  delete <id>            Delete a contact (alias: rm)
  filter [text]          Show only names containing text (empty clears)
  list                   List visible contacts (alias: ls)
  help                   Show this help
  quit                   End the session (alias: exit)";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("Usage: add <name>, <number>")]
    AddUsage,

    #[error("Usage: delete <id>")]
    DeleteUsage,

    #[error("Unknown command: '{0}' (try 'help')")]
    Unknown(String),
}

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add { name: String, number: String },
    Delete(ContactId),
    Filter(String),
    List,
    Help,
    Quit,
    /// Blank line or comment
    Nothing,
}

impl ShellCommand {
    /// Parses one input line
    pub fn parse(line: &str) -> Result<Self, ShellError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();

        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            return Ok(ShellCommand::Nothing);
        }

        let (word, rest) = match trimmed.split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (trimmed.trim_end(), ""),
        };

        match word {
            "add" => {
                let (name, number) = rest.split_once(',').ok_or(ShellError::AddUsage)?;
                Ok(ShellCommand::Add {
                    name: name.to_string(),
                    number: number.to_string(),
                })
            }
            "delete" | "rm" => rest
                .trim()
                .parse()
                .map(ShellCommand::Delete)
                .map_err(|_| ShellError::DeleteUsage),
            "filter" => Ok(ShellCommand::Filter(rest.to_string())),
            "list" | "ls" => Ok(ShellCommand::List),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(ShellError::Unknown(other.to_string())),
        }
    }
}

/// Whether the session keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// A shell session over one store
pub struct Shell<'a> {
    store: ContactStore,
    form: ContactForm,
    output: &'a Output,
}

impl<'a> Shell<'a> {
    pub fn new(store: ContactStore, output: &'a Output) -> Self {
        Self {
            store,
            form: ContactForm::new(),
            output,
        }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    /// Reads and executes lines until EOF or `quit`
    pub fn run<R: BufRead>(&mut self, reader: R, prompt: bool) -> Result<()> {
        let mut lines = reader.lines();

        loop {
            if prompt {
                print!("> ");
                io::stdout().flush().context("Failed to flush prompt")?;
            }

            let line = match lines.next() {
                Some(line) => line.context("Failed to read command")?,
                None => break,
            };

            let flow = match ShellCommand::parse(&line) {
                Ok(command) => self.execute(command),
                Err(e) => {
                    self.output.error(&e.to_string());
                    Flow::Continue
                }
            };

            if flow == Flow::Stop {
                break;
            }
        }

        self.output
            .verbose_ctx("shell", &format!("Session ended with {} contacts", self.store.len()));
        Ok(())
    }

    /// Applies a single command
    pub fn execute(&mut self, command: ShellCommand) -> Flow {
        match command {
            ShellCommand::Add { name, number } => self.add(name, number),
            ShellCommand::Delete(id) => self.delete(&id),
            ShellCommand::Filter(text) => self.filter(&text),
            ShellCommand::List => self.output.contacts(self.store.visible_contacts()),
            ShellCommand::Help => {
                if self.output.is_text() {
                    println!("{}", HELP);
                }
            }
            ShellCommand::Quit => return Flow::Stop,
            ShellCommand::Nothing => {}
        }
        Flow::Continue
    }

    fn add(&mut self, name: String, number: String) {
        self.output
            .verbose_ctx("add", &format!("Candidate name={:?} number={:?}", name, number));

        // Each line is a fresh submission
        self.form.clear();
        self.form.set_name(name.trim());
        self.form.set_number(number.trim());

        let mut notifier = ConsoleNotifier::new(self.output);
        match self.form.submit(&mut self.store, &mut notifier) {
            Submission::Added(contact) => {
                if self.output.is_json() {
                    self.output.data(&serde_json::json!({ "added": contact }));
                } else {
                    self.output
                        .success(&format!("Added: {} - {} ({})", contact.name, contact.number, contact.id));
                }
            }
            Submission::Duplicate(e) => {
                self.output
                    .verbose_ctx("add", &format!("Rejected on {}", e.field.as_str()));
            }
            Submission::Invalid(_) => {}
        }
    }

    fn delete(&mut self, id: &ContactId) {
        match self.store.delete_contact(id) {
            Some(contact) => {
                if self.output.is_json() {
                    self.output.data(&serde_json::json!({ "deleted": contact }));
                } else {
                    self.output.success(&format!("Deleted: {} ({})", contact.name, contact.id));
                }
            }
            None => {
                if self.output.is_json() {
                    self.output.data(&serde_json::json!({ "deleted": null, "id": id }));
                } else {
                    self.output.success(&format!("No contact with id {}", id));
                }
            }
        }
    }

    fn filter(&mut self, text: &str) {
        self.store.set_filter(text);
        let visible = self.store.visible_contacts().count();

        if self.output.is_json() {
            self.output.data(&serde_json::json!({
                "filter": self.store.filter(),
                "visible": visible,
            }));
        } else {
            self.output
                .success(&format!("Filter: '{}' ({} visible)", self.store.filter(), visible));
        }
    }
}

/// Runs a shell session on stdin
pub fn run(output: &Output, store: ContactStore) -> Result<()> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal() && output.is_text();
    output.verbose_ctx("shell", &format!("Starting session with {} contacts", store.len()));

    let mut shell = Shell::new(store, output);
    if prompt {
        println!("Phonebook shell. Type 'help' for commands.");
    }
    shell.run(stdin.lock(), prompt)
}
