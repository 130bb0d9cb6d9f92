//! Phonebook - a terminal contact book
//!
//! Contacts live in memory for one session, seeded from a JSON list. The
//! store rejects a new contact whose name (ignoring case and surrounding
//! whitespace) or number (ignoring surrounding whitespace) is already taken,
//! and lists contacts filtered by a case-insensitive name substring.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Contact, ContactId, ContactStore, DuplicateContactError, NewContact};
