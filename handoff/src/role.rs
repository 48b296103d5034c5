//! Worker roles
//!
//! The fixed set of recipients a planner can hand work to. Adding a role
//! means extending this enum; every dispatch site is an exhaustive match.

use crate::error::HandoffError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A worker role with a dedicated inbox/outbox directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Implementation work
    Dev,
    /// Test authoring and verification
    Test,
    /// Code review
    Review,
    /// Documentation
    Doc,
}

impl Role {
    /// All roles, in canonical order
    pub const ALL: [Role; 4] = [Role::Dev, Role::Test, Role::Review, Role::Doc];

    /// Lowercase role name as used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Review => "review",
            Self::Doc => "doc",
        }
    }

    /// Name of the role's directory under the project root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Dev => ".dev",
            Self::Test => ".test",
            Self::Review => ".review",
            Self::Doc => ".doc",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = HandoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "test" => Ok(Self::Test),
            "review" => Ok(Self::Review),
            "doc" => Ok(Self::Doc),
            other => Err(HandoffError::UnknownRole {
                name: other.to_string(),
            }),
        }
    }
}
