use log::debug;

use super::{ReplacementEntry, ReplacementTable};
use crate::errors::RegsubError;

/// In-memory replacement table.
///
/// Entries live in a `Vec` to keep insertion order; tables hold a handful of
/// rules, so lookups are linear.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    entries: Vec<(String, ReplacementEntry)>,
    simulate_write_error: bool,
    persist_count: usize,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful `persist` calls so far.
    pub fn persist_count(&self) -> usize {
        self.persist_count
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl FromIterator<(String, ReplacementEntry)> for MemoryTable {
    fn from_iter<I: IntoIterator<Item = (String, ReplacementEntry)>>(iter: I) -> Self {
        let mut table = MemoryTable::new();
        for (key, entry) in iter {
            table.set(&key, entry);
        }
        table
    }
}

impl ReplacementTable for MemoryTable {
    fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    fn get(&self, key: &str) -> Option<&ReplacementEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    fn set(&mut self, key: &str, entry: ReplacementEntry) {
        match self.position(key) {
            Some(idx) => self.entries[idx].1 = entry,
            None => self.entries.push((key.to_string(), entry)),
        }
    }

    fn delete(&mut self, key: &str) -> Option<ReplacementEntry> {
        let idx = self.position(key)?;
        Some(self.entries.remove(idx).1)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    fn persist(&mut self) -> Result<(), RegsubError> {
        if self.simulate_write_error {
            return Err(RegsubError::Io(std::io::Error::other("Simulated write error")));
        }
        self.persist_count += 1;
        debug!("In-memory table persisted ({} entries).", self.entries.len());
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> Vec<(String, ReplacementEntry)> {
        self.entries.clone()
    }
}
