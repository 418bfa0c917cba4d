//! Per-city membership roles.
//!
//! Role names must match the values stored on `memberships.role`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_MEMBER: &str = "member";
pub const ROLE_ORGANIZER: &str = "organizer";
pub const ROLE_ADMIN: &str = "admin";

/// A user's role inside a single city (tenant).
///
/// Variants are ordered by privilege so that `role >= CityRole::Organizer`
/// reads as "at least an organizer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityRole {
    Member,
    Organizer,
    Admin,
}

impl CityRole {
    pub fn as_str(self) -> &'static str {
        match self {
            CityRole::Member => ROLE_MEMBER,
            CityRole::Organizer => ROLE_ORGANIZER,
            CityRole::Admin => ROLE_ADMIN,
        }
    }

    /// Organizers and admins may create events and write blog posts.
    pub fn can_manage_content(self) -> bool {
        self >= CityRole::Organizer
    }

    /// Only admins may curate (feature) content.
    pub fn can_curate(self) -> bool {
        self == CityRole::Admin
    }
}

impl std::str::FromStr for CityRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_MEMBER => Ok(CityRole::Member),
            ROLE_ORGANIZER => Ok(CityRole::Organizer),
            ROLE_ADMIN => Ok(CityRole::Admin),
            other => Err(CoreError::Validation(format!("Unknown city role '{other}'"))),
        }
    }
}

impl std::fmt::Display for CityRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
