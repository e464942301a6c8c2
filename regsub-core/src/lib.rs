// regsub-core/src/lib.rs
//! # regsub Core Library
//!
//! `regsub-core` manages a user-editable table of regex replacement rules
//! (`pattern -> (replacement text, owner)`) and, above all, decides which new
//! patterns may enter it. A candidate is rejected when it does not compile,
//! when it is too broad, or when it overlaps a rule that is already stored.
//!
//! Overlap is judged on *patterns*, not on what they match: each pattern is
//! reduced to a literal skeleton by the [`simplifier`], and two patterns are
//! similar when their skeletons are equal or one contains the other.
//!
//! ## Modules
//!
//! * `simplifier`: reduces a pattern to its literal skeleton.
//! * `validators`: broadness check and pattern compilation.
//! * `similarity`: heuristic overlap check between two patterns.
//! * `command`: parser for `s/old/new/` commands.
//! * `table`: the replacement table collaborator and its backends.
//! * `permissions`: the permission oracle collaborator.
//! * `manager`: add/edit/remove/list/apply on top of the above.
//! * `engine`: applies stored rules to text.
//! * `config`: YAML configuration.
//! * `errors`: the library error type.
//!
//! ## Usage Example
//!
//! ```rust
//! use regsub_core::{MemoryTable, ReplacementManager, RegsubError, StaticPermissions};
//!
//! let mut manager = ReplacementManager::new(MemoryTable::new(), StaticPermissions::default());
//! manager.add("s/colou?r/hue/", "alice")?;
//!
//! // Same skeleton as the stored rule.
//! assert!(matches!(
//!     manager.add("s/colou?r+/tint/", "bob"),
//!     Err(RegsubError::DuplicateOrSimilar { .. })
//! ));
//!
//! assert_eq!(manager.apply("what colour?")?, "what hue?");
//! # Ok::<(), RegsubError>(())
//! ```
//!
//! ## Concurrency
//!
//! The analysis functions are pure. Mutating manager calls are check-then-write
//! sequences and need at most one writer per table; see [`TableLock`].
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod command;
pub mod config;
pub mod engine;
pub mod errors;
pub mod manager;
pub mod permissions;
pub mod similarity;
pub mod simplifier;
pub mod table;
pub mod validators;

pub use command::{parse_replace_command, ParsedCommand};
pub use config::{default_table_path, RegsubConfig};
pub use engine::{apply_replacements, compile_table, CompiledReplacement};
pub use errors::RegsubError;
pub use manager::{format_listing, ManagerPolicy, PatternReport, ReplacementManager};
pub use permissions::{Capability, PermissionOracle, StaticPermissions};
pub use similarity::{is_similar, is_similar_with, SimilarityStrategy};
pub use simplifier::simplify;
pub use table::{JsonFileTable, MemoryTable, ReplacementEntry, ReplacementTable, TableLock};
pub use validators::{compile_pattern, is_too_broad, is_too_broad_with, MIN_SKELETON_LEN};
