//! Initial contact data
//!
//! The store is seeded once at startup from a JSON array of
//! `{"id", "name", "number"}` records. A built-in seed ships with the binary;
//! a file can replace it. Records are used verbatim and in order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::domain::{Contact, ContactStore};

/// Seed compiled into the binary
pub const BUILTIN_SEED: &str = include_str!("../../data/contacts.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to parse seed data: {0}")]
    Parse(String),

    #[error("Seed record {index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },
}

/// Where a seed came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    Builtin,
    File(PathBuf),
}

impl std::fmt::Display for SeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedSource::Builtin => f.write_str("built-in"),
            SeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Initial contact list
#[derive(Debug, Clone)]
pub struct Seed {
    contacts: Vec<Contact>,
    source: SeedSource,
}

impl Seed {
    /// Loads the seed from a file, or the built-in seed when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    /// Parses the built-in seed
    pub fn builtin() -> Result<Self> {
        let contacts = parse(BUILTIN_SEED).context("Built-in seed is invalid")?;
        Ok(Self {
            contacts,
            source: SeedSource::Builtin,
        })
    }

    /// Reads and parses a seed file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

        let contacts = parse(&content)
            .with_context(|| format!("Invalid seed file: {}", path.display()))?;

        Ok(Self {
            contacts,
            source: SeedSource::File(path.to_path_buf()),
        })
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn source(&self) -> &SeedSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Builds a store seeded with these contacts
    pub fn into_store(self) -> ContactStore {
        ContactStore::with_contacts(self.contacts)
    }
}

/// Parses a JSON seed array
pub fn parse(json: &str) -> Result<Vec<Contact>, SeedError> {
    let contacts: Vec<Contact> =
        serde_json::from_str(json).map_err(|e| SeedError::Parse(e.to_string()))?;

    for (index, contact) in contacts.iter().enumerate() {
        if contact.name.trim().is_empty() {
            return Err(SeedError::EmptyField { index, field: "name" });
        }
        if contact.number.trim().is_empty() {
            return Err(SeedError::EmptyField { index, field: "number" });
        }
    }

    Ok(contacts)
}
