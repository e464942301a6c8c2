//! Permission oracle consulted when a user touches a rule they do not own.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Elevated capabilities a user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May edit or remove rules owned by other users.
    ManageMessages,
}

pub trait PermissionOracle {
    fn has_permission(&self, user_id: &str, capability: Capability) -> bool;
}

/// Oracle backed by a fixed set of moderator ids. Moderators hold every capability.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    moderators: HashSet<String>,
}

impl StaticPermissions {
    pub fn new<I, S>(moderators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            moderators: moderators.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_moderator(&self, user_id: &str) -> bool {
        self.moderators.contains(user_id)
    }
}

impl PermissionOracle for StaticPermissions {
    fn has_permission(&self, user_id: &str, capability: Capability) -> bool {
        match capability {
            Capability::ManageMessages => self.is_moderator(user_id),
        }
    }
}
