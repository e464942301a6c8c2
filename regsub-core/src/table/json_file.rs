//! JSON-file backed replacement table.
//!
//! The file is a single JSON object mapping each pattern key to
//! `[replacement_text, owner_id]`, in insertion order. Reads take a shared
//! lock, writes go to a temporary file under an exclusive lock and are then
//! renamed over the table file.
//!
//! License: MIT OR APACHE 2.0

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::{Map, Value};

use super::{MemoryTable, ReplacementEntry, ReplacementTable};
use crate::errors::RegsubError;

const TABLE_FILE_TMP_SUFFIX: &str = ".tmp";
const LOCK_FILE_SUFFIX: &str = ".lock";

#[derive(Debug)]
pub struct JsonFileTable {
    path: PathBuf,
    inner: MemoryTable,
}

impl JsonFileTable {
    /// Loads the table at `path`. A missing or empty file is an empty table.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RegsubError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            debug!("Table file {} does not exist yet; starting empty.", path.display());
            return Ok(Self { path, inner: MemoryTable::new() });
        }

        let mut f = OpenOptions::new().read(true).open(&path)?;
        fs2::FileExt::lock_shared(&f)?;
        let mut raw = String::new();
        let read_result = f.read_to_string(&mut raw);
        fs2::FileExt::unlock(&f)?;
        read_result?;

        if raw.trim().is_empty() {
            return Ok(Self { path, inner: MemoryTable::new() });
        }

        let object: Map<String, Value> = serde_json::from_str(&raw)?;
        let mut inner = MemoryTable::new();
        for (key, value) in object {
            let entry: ReplacementEntry = serde_json::from_value(value)?;
            inner.set(&key, entry);
        }

        info!("Loaded {} replacements from {}.", inner.len(), path.display());
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialises the table as a pretty-printed JSON object.
    pub fn to_json(&self) -> Result<String, RegsubError> {
        let mut object = Map::new();
        for (key, entry) in self.inner.entries() {
            object.insert(key, serde_json::to_value(entry)?);
        }
        Ok(serde_json::to_string_pretty(&Value::Object(object))?)
    }
}

impl ReplacementTable for JsonFileTable {
    fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }

    fn get(&self, key: &str) -> Option<&ReplacementEntry> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, entry: ReplacementEntry) {
        self.inner.set(key, entry)
    }

    fn delete(&mut self, key: &str) -> Option<ReplacementEntry> {
        self.inner.delete(key)
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    fn persist(&mut self) -> Result<(), RegsubError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = self.to_json()?;
        let tmp_path = sibling_path(&self.path, TABLE_FILE_TMP_SUFFIX);
        {
            let mut tmp = OpenOptions::new().create(true).write(true).truncate(true).open(&tmp_path)?;
            fs2::FileExt::lock_exclusive(&tmp)?;
            tmp.write_all(json.as_bytes())?;
            tmp.flush()?;
            fs2::FileExt::unlock(&tmp)?;
        }

        fs::rename(&tmp_path, &self.path)?;
        debug!("Persisted {} replacements to {}.", self.inner.len(), self.path.display());
        Ok(())
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn entries(&self) -> Vec<(String, ReplacementEntry)> {
        self.inner.entries()
    }
}

/// Exclusive advisory lock on `<table>.lock`, held for a whole
/// load-check-write sequence. Released on drop.
#[derive(Debug)]
pub struct TableLock {
    file: File,
    path: PathBuf,
}

impl TableLock {
    /// Blocks until the lock for `table_path` is acquired.
    pub fn acquire<P: AsRef<Path>>(table_path: P) -> Result<Self, RegsubError> {
        let path = sibling_path(table_path.as_ref(), LOCK_FILE_SUFFIX);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).write(true).truncate(false).open(&path)?;
        fs2::FileExt::lock_exclusive(&file)?;
        debug!("Acquired table lock {}.", path.display());
        Ok(Self { file, path })
    }
}

impl Drop for TableLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
        debug!("Released table lock {}.", self.path.display());
    }
}

/// `table.json` -> `table.json<suffix>` in the same directory.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
