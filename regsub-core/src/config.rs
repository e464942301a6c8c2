//! Configuration management for `regsub-core`.
//!
//! Settings come from an optional YAML file. Every field has a default, so an
//! empty or missing file yields a working configuration: the table lives in the
//! user's config directory, nobody is a moderator, and similarity uses the
//! cross-check strategy.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::errors::RegsubError;
use crate::manager::ManagerPolicy;
use crate::permissions::StaticPermissions;
use crate::similarity::SimilarityStrategy;
use crate::validators::MIN_SKELETON_LEN;

/// File name of the table inside the default config directory.
pub const DEFAULT_TABLE_FILE: &str = "replace.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RegsubConfig {
    /// Location of the JSON table. `None` means [`default_table_path`].
    pub table_path: Option<PathBuf>,
    /// User ids allowed to edit and remove rules they do not own.
    pub moderators: Vec<String>,
    pub similarity_strategy: SimilarityStrategy,
    /// Skeletons shorter than this are rejected as too broad.
    pub min_skeleton_len: usize,
}

impl Default for RegsubConfig {
    fn default() -> Self {
        Self {
            table_path: None,
            moderators: Vec::new(),
            similarity_strategy: SimilarityStrategy::default(),
            min_skeleton_len: MIN_SKELETON_LEN,
        }
    }
}

impl RegsubConfig {
    /// Loads configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: RegsubConfig = if text.trim().is_empty() {
            RegsubConfig::default()
        } else {
            serde_yml::from_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), RegsubError> {
        if self.min_skeleton_len == 0 {
            return Err(RegsubError::Config(
                "`min_skeleton_len` must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for moderator in &self.moderators {
            if moderator.trim().is_empty() {
                return Err(RegsubError::Config(
                    "`moderators` contains an empty user id".to_string(),
                ));
            }
            if !seen.insert(moderator.as_str()) {
                warn!("Moderator '{}' is listed more than once.", moderator);
            }
        }
        Ok(())
    }

    /// The configured table path, or the per-user default.
    pub fn resolve_table_path(&self) -> Result<PathBuf> {
        match &self.table_path {
            Some(p) => Ok(p.clone()),
            None => default_table_path(),
        }
    }

    pub fn policy(&self) -> ManagerPolicy {
        ManagerPolicy {
            similarity: self.similarity_strategy,
            min_skeleton_len: self.min_skeleton_len,
        }
    }

    pub fn permissions(&self) -> StaticPermissions {
        StaticPermissions::new(self.moderators.iter().cloned())
    }
}

/// `<config dir>/regsub/replace.json`.
pub fn default_table_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine the user config directory")?;
    Ok(base.join("regsub").join(DEFAULT_TABLE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{Capability, PermissionOracle};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = RegsubConfig::default();
        assert_eq!(config.min_skeleton_len, 3);
        assert_eq!(config.similarity_strategy, SimilarityStrategy::CrossCheck);
        assert!(config.moderators.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let yaml = r#"
table_path: /tmp/regsub-test/replace.json
moderators: ["alice", "bob"]
similarity_strategy: self_containment
min_skeleton_len: 4
"#;
        let mut file = NamedTempFile::new()?;
        file.write_all(yaml.as_bytes())?;
        let config = RegsubConfig::load_from_file(file.path())?;

        assert_eq!(config.resolve_table_path()?, PathBuf::from("/tmp/regsub-test/replace.json"));
        assert_eq!(config.similarity_strategy, SimilarityStrategy::SelfContainment);
        assert_eq!(config.policy().min_skeleton_len, 4);
        assert!(config.permissions().has_permission("bob", Capability::ManageMessages));
        Ok(())
    }

    #[test]
    fn test_partial_and_empty_files_use_defaults() -> Result<()> {
        let mut partial = NamedTempFile::new()?;
        partial.write_all(b"moderators: [carol]\n")?;
        let config = RegsubConfig::load_from_file(partial.path())?;
        assert_eq!(config.min_skeleton_len, MIN_SKELETON_LEN);
        assert_eq!(config.moderators, vec!["carol"]);

        let empty = NamedTempFile::new()?;
        assert_eq!(RegsubConfig::load_from_file(empty.path())?, RegsubConfig::default());
        Ok(())
    }

    #[test]
    fn test_invalid_values_are_rejected() -> Result<()> {
        let mut zero = NamedTempFile::new()?;
        zero.write_all(b"min_skeleton_len: 0\n")?;
        assert!(RegsubConfig::load_from_file(zero.path()).is_err());

        let mut blank = NamedTempFile::new()?;
        blank.write_all(b"moderators: ['  ']\n")?;
        assert!(RegsubConfig::load_from_file(blank.path()).is_err());

        let mut bad_strategy = NamedTempFile::new()?;
        bad_strategy.write_all(b"similarity_strategy: fuzzy\n")?;
        assert!(RegsubConfig::load_from_file(bad_strategy.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(RegsubConfig::load_from_file("/definitely/not/here.yaml").is_err());
    }
}
