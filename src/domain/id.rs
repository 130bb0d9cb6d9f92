//! Contact identifiers
//!
//! ID Format:
//! - Seeded contacts keep whatever id the seed file carries (e.g. `id-1`)
//! - Generated contacts: `c-{7-char-hash}` (e.g. `c-7f2b4c1`)
//!
//! Hash is derived from name + creation timestamp. The store bumps the
//! timestamp when a hash collides with an id it has already seen.
//!
//! Parsing keeps the id exactly as given; only blank ids are rejected.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid contact ID: expected a non-empty string, got '{0}'")]
    Empty(String),
}

/// Generates a 7-character hash from name and timestamp
fn generate_hash(name: &str, timestamp: DateTime<Utc>) -> String {
    // RFC 3339 with nanoseconds stays distinct over chrono's whole range
    let input = format!("{}{}", name, timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true));
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Opaque contact identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactId(String);

impl ContactId {
    /// Creates a new generated ID from name and timestamp
    pub fn new(name: &str, timestamp: DateTime<Utc>) -> Self {
        Self(format!("c-{}", generate_hash(name, timestamp)))
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContactId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(IdError::Empty(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ContactId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContactId> for String {
    fn from(id: ContactId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_generation_is_unique_for_different_timestamps() {
        let ts1 = Utc::now();
        let ts2 = ts1 + chrono::Duration::nanoseconds(1);

        let id1 = ContactId::new("Alice", ts1);
        let id2 = ContactId::new("Alice", ts2);

        assert_ne!(id1, id2);
    }

    #[test]
    fn generated_id_format_is_correct() {
        let id = ContactId::new("Alice", Utc::now());
        let s = id.to_string();

        assert!(s.starts_with("c-"));
        assert_eq!(s.len(), 9); // "c-" + 7 chars
        assert!(s[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn timestamps_past_nanosecond_range_still_differ() {
        let far: DateTime<Utc> = "2300-01-01T00:00:00Z".parse().unwrap();
        assert!(far.timestamp_nanos_opt().is_none());

        let id1 = ContactId::new("Alice", far);
        let id2 = ContactId::new("Alice", far + chrono::Duration::nanoseconds(1));
        assert_ne!(id1, id2);
    }

    #[test]
    fn seeded_ids_parse_verbatim() {
        let id: ContactId = "id-1".parse().unwrap();
        assert_eq!(id.as_str(), "id-1");
    }

    #[test]
    fn parse_keeps_surrounding_whitespace() {
        let id: ContactId = "  id-2 ".parse().unwrap();
        assert_eq!(id.as_str(), "  id-2 ");

        let id: ContactId = serde_json::from_str("\" id-1 \"").unwrap();
        assert_eq!(id.as_str(), " id-1 ");
    }

    #[test]
    fn rejects_empty_id() {
        assert!("".parse::<ContactId>().is_err());
        assert!("   ".parse::<ContactId>().is_err());
    }

    #[test]
    fn deserialize_rejects_empty_id() {
        assert!(serde_json::from_str::<ContactId>("\"\"").is_err());
        let id: ContactId = serde_json::from_str("\"id-3\"").unwrap();
        assert_eq!(id.as_str(), "id-3");
    }
}
