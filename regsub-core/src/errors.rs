//! errors.rs - Custom error types for the regsub-core library.
//!
//! Every rejection a replacement command can hit is a distinct variant, so the
//! command surface can report it to the user without inspecting strings.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All failure outcomes of the `regsub-core` library.
///
/// Marked `#[non_exhaustive]` so new outcomes can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RegsubError {
    /// The input did not match the `s<sep>old<sep>new<sep>[g]` grammar.
    #[error("Could not find valid regex")]
    ParseError,

    #[error("regex '{0}' is invalid: {1}")]
    InvalidPattern(String, regex::Error),

    #[error("regex '{0}' is too broad")]
    TooBroad(String),

    /// A stored key overlaps with the candidate. Carries the stored key and its replacement.
    #[error("Similar regex already exists, delete or edit it\n\"{existing}\" -> \"{replacement}\"")]
    DuplicateOrSimilar {
        existing: String,
        replacement: String,
    },

    #[error("regex '{0}' already exists")]
    AlreadyExists(String),

    #[error("Regex '{0}' not in replacements.")]
    NotFound(String),

    #[error("Cannot {action} '{pattern}': user '{user_id}' is neither the owner nor a moderator")]
    PermissionDenied {
        action: &'static str,
        pattern: String,
        user_id: String,
    },

    #[error("Failed to (de)serialize the replacement table: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl RegsubError {
    /// True for outcomes caused by the user's request rather than by storage or config.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            RegsubError::Serialization(_) | RegsubError::Io(_) | RegsubError::Config(_)
        )
    }
}
