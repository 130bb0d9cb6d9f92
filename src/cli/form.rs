//! Add-contact form
//!
//! Collects a name and a number, checks they are well-formed, and hands the
//! candidate to the store. Duplicate and validation failures are reported
//! through a [`Notifier`]; the typed values are kept so they can be fixed.

use thiserror::Error;

use super::notify::Notifier;
use crate::domain::{Contact, ContactStore, DuplicateContactError, NewContact};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Name is required")]
    EmptyName,

    #[error("Number is required")]
    EmptyNumber,

    #[error("Name may only contain letters, spaces, apostrophes, hyphens and dots: '{0}'")]
    InvalidName(String),

    #[error("Number may only contain digits, spaces, dashes, parentheses, dots and a leading +: '{0}'")]
    InvalidNumber(String),
}

/// Form field with input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Number,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Number,
            Field::Number => Field::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Number => "Number",
        }
    }
}

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Added(Contact),
    Duplicate(DuplicateContactError),
    Invalid(FormError),
}

fn is_name_char(c: char) -> bool {
    c.is_alphabetic() || matches!(c, ' ' | '\'' | '-' | '.')
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '.')
}

/// Checks a name/number pair and builds a candidate from it
pub fn validate(name: &str, number: &str) -> Result<NewContact, FormError> {
    let trimmed_name = name.trim();
    let trimmed_number = number.trim();

    if trimmed_name.is_empty() {
        return Err(FormError::EmptyName);
    }
    if trimmed_number.is_empty() {
        return Err(FormError::EmptyNumber);
    }
    if !trimmed_name.chars().all(is_name_char) {
        return Err(FormError::InvalidName(name.to_string()));
    }

    let digits = trimmed_number.strip_prefix('+').unwrap_or(trimmed_number);
    if !digits.chars().all(is_number_char) || !digits.chars().any(|c| c.is_ascii_digit()) {
        return Err(FormError::InvalidNumber(number.to_string()));
    }

    Ok(NewContact::new(name, number))
}

/// Editable form state
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    name: String,
    number: String,
    focus: Field,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_number(&mut self, number: impl Into<String>) {
        self.number = number.into();
    }

    /// Moves input focus to the other field
    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Types a character into the focused field
    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    /// Deletes the last character of the focused field
    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.number.clear();
        self.focus = Field::Name;
    }

    /// Validates and adds the contact.
    ///
    /// Clears the form on success. Failures go to the notifier and leave the
    /// fields as typed.
    pub fn submit(&mut self, store: &mut ContactStore, notifier: &mut dyn Notifier) -> Submission {
        let candidate = match validate(&self.name, &self.number) {
            Ok(candidate) => candidate,
            Err(e) => {
                notifier.error(&e.to_string());
                return Submission::Invalid(e);
            }
        };

        match store.add_contact(candidate) {
            Ok(contact) => {
                let contact = contact.clone();
                self.clear();
                Submission::Added(contact)
            }
            Err(e) => {
                notifier.error(&e.to_string());
                Submission::Duplicate(e)
            }
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.name,
            Field::Number => &mut self.number,
        }
    }
}
