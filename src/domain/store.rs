//! In-memory contact store
//!
//! Owns the contact collection (most-recently-added first) and the active
//! filter. A candidate is rejected when any existing contact shares its
//! normalized name OR its normalized number.

use std::collections::{vec_deque, HashSet, VecDeque};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use super::contact::{normalize_filter, normalize_name, normalize_number, Contact, NewContact};
use super::id::ContactId;

/// Which field of a candidate collided with an existing contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateField {
    Name,
    Number,
}

impl DuplicateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateField::Name => "name",
            DuplicateField::Number => "number",
        }
    }
}

/// Returned by [`ContactStore::add_contact`] when the candidate is a duplicate.
///
/// Displays as `"<name>: is already in contacts"`, using the candidate's name
/// as it was entered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{name}: is already in contacts")]
pub struct DuplicateContactError {
    pub name: String,
    pub field: DuplicateField,
}

/// Contact collection plus filter state
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    contacts: VecDeque<Contact>,
    filter: String,
    /// Every ID that has ever been in the collection
    seen_ids: HashSet<ContactId>,
}

impl ContactStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given contacts, in order.
    ///
    /// The seed is trusted: it is not checked against the uniqueness rule.
    pub fn with_contacts(seed: impl IntoIterator<Item = Contact>) -> Self {
        let contacts: VecDeque<Contact> = seed.into_iter().collect();
        let seen_ids = contacts.iter().map(|c| c.id.clone()).collect();
        Self {
            contacts,
            filter: String::new(),
            seen_ids,
        }
    }

    /// Adds a contact at the front of the collection.
    ///
    /// Leaves the store untouched when the candidate is a duplicate.
    pub fn add_contact(&mut self, candidate: NewContact) -> Result<&Contact, DuplicateContactError> {
        if let Some(field) = self.find_conflict(&candidate) {
            return Err(DuplicateContactError {
                name: candidate.name,
                field,
            });
        }

        let id = self.next_id(&candidate.name);
        self.seen_ids.insert(id.clone());
        self.contacts.push_front(candidate.into_contact(id));

        Ok(&self.contacts[0])
    }

    /// Removes a contact by ID, returning it if it was present.
    ///
    /// Unknown IDs are a no-op.
    pub fn delete_contact(&mut self, id: &ContactId) -> Option<Contact> {
        let index = self.contacts.iter().position(|c| &c.id == id)?;
        self.contacts.remove(index)
    }

    /// Replaces the filter with the lowercased text
    pub fn set_filter(&mut self, text: &str) {
        self.filter = normalize_filter(text);
    }

    /// Returns the current (normalized) filter
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Contacts whose normalized name contains the filter, in collection order.
    ///
    /// The iterator is lazy; clone it (or call again) to restart.
    pub fn visible_contacts(&self) -> VisibleContacts<'_> {
        VisibleContacts {
            inner: self.contacts.iter(),
            filter: &self.filter,
        }
    }

    /// All contacts in collection order, ignoring the filter
    pub fn contacts(&self) -> vec_deque::Iter<'_, Contact> {
        self.contacts.iter()
    }

    /// Looks up a contact by ID
    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn find_conflict(&self, candidate: &NewContact) -> Option<DuplicateField> {
        let name = normalize_name(&candidate.name);
        let number = normalize_number(&candidate.number);

        self.contacts.iter().find_map(|c| {
            if c.normalized_name() == name {
                Some(DuplicateField::Name)
            } else if c.normalized_number() == number {
                Some(DuplicateField::Number)
            } else {
                None
            }
        })
    }

    /// Generates an ID that has never been used by this store
    fn next_id(&self, name: &str) -> ContactId {
        self.next_id_from(name, Utc::now())
    }

    /// Steps the timestamp forward one nanosecond per collision, wrapping to
    /// the earliest representable instant at the end of the range.
    fn next_id_from(&self, name: &str, start: DateTime<Utc>) -> ContactId {
        let mut timestamp = start;
        loop {
            let id = ContactId::new(name, timestamp);
            if !self.seen_ids.contains(&id) {
                return id;
            }
            timestamp = timestamp
                .checked_add_signed(Duration::nanoseconds(1))
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
        }
    }
}

/// Lazy view over the contacts matching the store's filter
#[derive(Debug, Clone)]
pub struct VisibleContacts<'a> {
    inner: vec_deque::Iter<'a, Contact>,
    filter: &'a str,
}

impl<'a> Iterator for VisibleContacts<'a> {
    type Item = &'a Contact;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.inner.find(|c| c.matches_filter(filter))
    }
}
