//! Domain models for the phonebook
//!
//! Contains the contact store and its matching rules without any I/O concerns.

mod id;
mod contact;
mod store;

pub use id::{ContactId, IdError};
pub use contact::{normalize_filter, normalize_name, normalize_number, Contact, NewContact};
pub use store::{ContactStore, DuplicateContactError, DuplicateField, VisibleContacts};
