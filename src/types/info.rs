//! Class identifiers and the computed per-class result.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::canonical::canonical_hash_hex;
use crate::error::GroupResult;
use crate::query;

/// Identifier of a school class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClassId(String);

impl ClassId {
    /// Reserved "no class" placeholder. Never has groups.
    pub const NONE: &'static str = "--";

    /// Create a class identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The "no class" placeholder.
    pub fn none() -> Self {
        Self(Self::NONE.to_string())
    }

    /// Whether this is the "no class" placeholder.
    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE
    }

    /// String form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClassId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The complete computed grouping of one class.
///
/// All group names are canonical keys (sorted tags joined by `.`); the empty
/// key `""` is the whole class. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroupInfo {
    /// Pairwise independent divisions, each sorted, sorted among themselves.
    pub independent_divisions: Vec<Vec<String>>,
    /// Every declared group expressed as the independent-division pieces whose
    /// union it is.
    pub group_map: BTreeMap<String, Vec<String>>,
    /// Every declared group, sorted.
    pub groups: Vec<String>,
    /// The atoms: one member from each independent division, unioned.
    pub minimal_subgroups: Vec<String>,
    /// Preferred declared names for unnamed single pieces (piece → group).
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl ClassGroupInfo {
    /// Info for an undivided class: one atom, the whole class.
    pub fn undivided() -> Self {
        Self {
            independent_divisions: Vec::new(),
            group_map: BTreeMap::new(),
            groups: Vec::new(),
            minimal_subgroups: vec![String::new()],
            aliases: BTreeMap::new(),
        }
    }

    /// Content fingerprint (xxh64 of the canonical JSON form).
    pub fn fingerprint(&self) -> String {
        canonical_hash_hex(self)
    }

    /// The atoms that make up `key` (any group key, `""` for the whole class).
    pub fn atoms_for(&self, key: &str) -> GroupResult<BTreeSet<String>> {
        let mut mapping = query::atoms_of(&self.minimal_subgroups, [key])?;
        Ok(mapping.remove(key).unwrap_or_default())
    }

    /// Whether two groups can share a pupil.
    pub fn overlaps(&self, a: &str, b: &str) -> GroupResult<bool> {
        let atoms_a = self.atoms_for(a)?;
        let atoms_b = self.atoms_for(b)?;
        Ok(!atoms_a.is_disjoint(&atoms_b))
    }

    /// Whether every pupil of `inner` is also in `outer`.
    pub fn contains(&self, outer: &str, inner: &str) -> GroupResult<bool> {
        let atoms_outer = self.atoms_for(outer)?;
        let atoms_inner = self.atoms_for(inner)?;
        Ok(atoms_inner.is_subset(&atoms_outer))
    }

    /// Preferred display name for a piece.
    pub fn display_name<'a>(&'a self, piece: &'a str) -> &'a str {
        self.aliases.get(piece).map(String::as_str).unwrap_or(piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_id_sentinel() {
        assert!(ClassId::none().is_none());
        assert!(ClassId::from("--").is_none());
        assert!(!ClassId::new("10A").is_none());
        assert_eq!(ClassId::new("10A").to_string(), "10A");
    }

    #[test]
    fn test_undivided_class() {
        let info = ClassGroupInfo::undivided();
        assert_eq!(info.minimal_subgroups, vec![String::new()]);
        assert_eq!(info.atoms_for("").unwrap().len(), 1);
    }

    #[test]
    fn test_fingerprint_stable() {
        let a = ClassGroupInfo::undivided();
        let b = ClassGroupInfo::undivided();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 16);
    }

    #[test]
    fn test_display_name_falls_back() {
        let mut info = ClassGroupInfo::undivided();
        info.aliases.insert("B.N".to_string(), "N".to_string());
        assert_eq!(info.display_name("B.N"), "N");
        assert_eq!(info.display_name("A"), "A");
    }
}
