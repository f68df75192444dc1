//! Directory entry model
//!
//! An [`Entry`] is one phonebook record. Its JSON form is
//! `{"id": number, "name": string, "number": string}`; [`NewEntry`] is the
//! `{"name", "number"}` body sent for create and update calls, and
//! [`ErrorBody`] is the `{"error"}` body of every failed call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned to an entry by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl EntryId {
    /// Get the raw integer value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntryId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// One phonebook record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Server-assigned identifier
    pub id: EntryId,
    /// Display name, unique among entries (case-sensitive)
    pub name: String,
    /// Phone number, format unchecked
    pub number: String,
}

impl Entry {
    /// Create a new entry
    pub fn new(id: impl Into<EntryId>, name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Request body for create and update calls
///
/// Absent fields deserialize as empty strings so that presence checks see
/// `{"name": "x"}` and `{"name": "x", "number": ""}` the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    /// Requested name
    #[serde(default)]
    pub name: String,
    /// Requested number
    #[serde(default)]
    pub number: String,
}

impl NewEntry {
    /// Create a new request body
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }

    /// Check that both fields are present
    pub fn require_present(&self) -> crate::Result<()> {
        if self.name.is_empty() || self.number.is_empty() {
            return Err(crate::Error::validation("Name or number is missing"));
        }
        Ok(())
    }
}

/// Body of every error response: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
}

impl ErrorBody {
    /// Create an error body
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
