//! The replacement table collaborator.
//!
//! The core never assumes a storage format. It talks to a [`ReplacementTable`],
//! which maps a pattern key to a [`ReplacementEntry`] and keeps insertion order
//! for listing. Two implementations ship here:
//!
//! * [`MemoryTable`]: a plain in-process table, used by tests and as the
//!   working copy inside other backends.
//! * [`JsonFileTable`]: a JSON object on disk, `{"pattern": ["text", "owner"]}`.
//!
//! Check-then-write sequences (add, edit, remove) need at most one writer at a
//! time. The table itself does not lock; callers serialise, for example with
//! [`TableLock`].
//!
//! License: MIT OR APACHE 2.0

pub mod json_file;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::errors::RegsubError;

pub use json_file::{JsonFileTable, TableLock};
pub use memory::MemoryTable;

/// The value stored for a pattern key. Serialised as `[text, owner]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ReplacementEntry {
    pub text: String,
    pub owner: String,
}

impl ReplacementEntry {
    pub fn new(text: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            owner: owner.into(),
        }
    }
}

impl From<(String, String)> for ReplacementEntry {
    fn from((text, owner): (String, String)) -> Self {
        Self { text, owner }
    }
}

impl From<ReplacementEntry> for (String, String) {
    fn from(entry: ReplacementEntry) -> Self {
        (entry.text, entry.owner)
    }
}

/// Key-value store of replacement rules, in insertion order.
pub trait ReplacementTable {
    fn contains(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<&ReplacementEntry>;

    /// Inserts or overwrites `key`. Overwriting keeps the key's position.
    fn set(&mut self, key: &str, entry: ReplacementEntry);

    /// Removes `key`, returning its entry if it was present.
    fn delete(&mut self, key: &str) -> Option<ReplacementEntry>;

    /// All pattern keys in insertion order.
    fn keys(&self) -> Vec<String>;

    /// Writes the current state to the backing store.
    fn persist(&mut self) -> Result<(), RegsubError>;

    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key/entry pairs in insertion order.
    fn entries(&self) -> Vec<(String, ReplacementEntry)> {
        self.keys()
            .into_iter()
            .filter_map(|key| self.get(&key).cloned().map(|entry| (key, entry)))
            .collect()
    }
}
