//! Divisions and per-class declarations.
//!
//! Declaration syntax: divisions separated by `|`, each division a
//! whitespace-separated list of group tokens, each token dot-separated tags.
//!
//! ```text
//! A B | G R | A.I B
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::group::CompoundGroup;
use crate::error::{GroupError, GroupResult};

/// Separator between divisions in a declaration.
pub const DIVISION_SEPARATOR: char = '|';

/// A set of mutually exclusive groups declared together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    groups: BTreeSet<CompoundGroup>,
}

impl Division {
    /// Build a division from groups; duplicates collapse.
    pub fn new<I: IntoIterator<Item = CompoundGroup>>(groups: I) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    /// Parse one division: whitespace-separated group tokens.
    pub fn parse(text: &str) -> GroupResult<Self> {
        let groups = text
            .split_whitespace()
            .map(CompoundGroup::parse)
            .collect::<GroupResult<BTreeSet<_>>>()?;
        Ok(Self { groups })
    }

    /// Member groups.
    pub fn groups(&self) -> impl Iterator<Item = &CompoundGroup> {
        self.groups.iter()
    }

    /// Number of member groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the division declares nothing.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether `group` is a member.
    pub fn contains(&self, group: &CompoundGroup) -> bool {
        self.groups.contains(group)
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.groups.iter().map(CompoundGroup::canonical).collect();
        f.write_str(&keys.join(" "))
    }
}

/// The full grouping declaration of one class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    divisions: Vec<Division>,
}

impl Declaration {
    /// Build a declaration from divisions. Empty divisions are dropped.
    pub fn new<I: IntoIterator<Item = Division>>(divisions: I) -> Self {
        Self {
            divisions: divisions.into_iter().filter(|d| !d.is_empty()).collect(),
        }
    }

    /// Parse a raw declaration string.
    ///
    /// Empty divisions (`"A B |"`, `"| G R"`) are ignored; any malformed token
    /// aborts the whole declaration.
    pub fn parse(text: &str) -> GroupResult<Self> {
        let divisions = text
            .split(DIVISION_SEPARATOR)
            .map(Division::parse)
            .collect::<GroupResult<Vec<_>>>()?;
        Ok(Self::new(divisions))
    }

    /// Declared divisions in declaration order.
    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    /// Whether the class is undivided.
    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    /// Every group declared in any division.
    pub fn all_groups(&self) -> BTreeSet<CompoundGroup> {
        self.divisions
            .iter()
            .flat_map(|d| d.groups().cloned())
            .collect()
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.divisions.iter().map(Division::to_string).collect();
        f.write_str(&parts.join(" | "))
    }
}

impl FromStr for Declaration {
    type Err = GroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
