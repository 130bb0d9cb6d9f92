//! Contact domain model
//!
//! Contacts keep their display form exactly as entered. Comparisons for
//! uniqueness and filtering go through the normalization functions below,
//! which are the only place the matching rules live.

use serde::{Deserialize, Serialize};

use super::id::ContactId;

/// Normalizes a name for comparison: trimmed and lowercased
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalizes a phone number for comparison: trimmed
pub fn normalize_number(number: &str) -> &str {
    number.trim()
}

/// Normalizes filter text: lowercased, whitespace kept as typed
pub fn normalize_filter(text: &str) -> String {
    text.to_lowercase()
}

/// A stored contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub number: String,
}

impl Contact {
    /// Creates a contact with an existing ID (used for seeding)
    pub fn new(id: ContactId, name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            number: number.into(),
        }
    }

    /// Returns the normalized name
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Returns the normalized number
    pub fn normalized_number(&self) -> &str {
        normalize_number(&self.number)
    }

    /// Returns true if the normalized name contains the (already normalized) filter
    pub fn matches_filter(&self, normalized_filter: &str) -> bool {
        self.normalized_name().contains(normalized_filter)
    }
}

/// A candidate contact submitted for insertion (no ID yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub number: String,
}

impl NewContact {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }

    /// Turns the candidate into a stored contact with the given ID
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            number: self.number,
        }
    }
}
