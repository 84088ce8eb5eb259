use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Who is signing up: a student looking for housing or a house owner.
///
/// Chosen once on the first registration step and carried through to submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Owner,
}

impl Role {
    /// Code expected by the account API.
    pub fn api_code(self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Owner => "HOUSE_OWNER",
        }
    }

    /// Label shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Étudiant",
            Role::Owner => "Propriétaire",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Accepts both the API codes and the radio-button values of the sign-up page.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "STUDENT" | "Etudiant" | "Étudiant" => Ok(Role::Student),
            "HOUSE_OWNER" | "Proprietaire" | "Propriétaire" => Ok(Role::Owner),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
