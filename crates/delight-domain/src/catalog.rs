//! Catalog domain types: entity kinds, search scope, and sort policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a catalog entity.
///
/// Declaration order is significant: crops sort before meals when a
/// cross-type ordering needs a tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Crop,
    Meal,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Crop => "crop",
            Self::Meal => "meal",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string cannot be parsed as an [`EntityKind`].
#[derive(Debug, Error)]
#[error("unknown entity kind: {0:?}")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crop" => Ok(Self::Crop),
            "meal" => Ok(Self::Meal),
            other => Err(UnknownEntityKind(other.to_owned())),
        }
    }
}

/// Reference to a single catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i32,
}

impl EntityRef {
    pub fn crop(id: i32) -> Self {
        Self {
            kind: EntityKind::Crop,
            id,
        }
    }

    pub fn meal(id: i32) -> Self {
        Self {
            kind: EntityKind::Meal,
            id,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// Which entity types a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchScope {
    #[default]
    All,
    Crops,
    Meals,
}

impl SearchScope {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "crops" => Some(Self::Crops),
            "meals" => Some(Self::Meals),
            _ => None,
        }
    }

    /// Parse a raw query value, degrading to [`SearchScope::All`] on absent
    /// or unknown input.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(Self::from_kebab_case).unwrap_or_default()
    }
}

/// Sort policy applied to search results.
///
/// `Name` is ascending; `Hunger` and `Likes` are descending. Ties are always
/// broken by entity kind, then id ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchSortBy {
    #[default]
    Name,
    Hunger,
    Likes,
}

impl SearchSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "hunger" => Some(Self::Hunger),
            "likes" => Some(Self::Likes),
            _ => None,
        }
    }

    /// Parse a raw query value, degrading to [`SearchSortBy::Name`] on absent
    /// or unknown input.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(Self::from_kebab_case).unwrap_or_default()
    }
}
