//! Compound groups: intersections of atomic tags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{GroupError, GroupResult};

/// Separator between atomic tags inside a compound group token.
pub const TAG_SEPARATOR: char = '.';

/// A set of atomic tags naming the intersection of the groups they denote.
///
/// Equality is set equality, so `"G.A"` and `"A.G"` are the same group.
/// The empty tag set is the whole, undivided class.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompoundGroup {
    tags: BTreeSet<String>,
}

impl CompoundGroup {
    /// The whole class (no tags).
    pub fn whole_class() -> Self {
        Self::default()
    }

    /// Parse a declared group token such as `"A"` or `"A.G"`.
    ///
    /// Empty tokens and empty segments (`".A"`, `"A..G"`) are rejected, as is
    /// any character that is neither a letter nor a digit.
    pub fn parse(token: &str) -> GroupResult<Self> {
        if token.is_empty() {
            return Err(GroupError::syntax(token, "empty group token"));
        }

        let mut tags = BTreeSet::new();
        for segment in token.split(TAG_SEPARATOR) {
            if segment.is_empty() {
                return Err(GroupError::syntax(token, "empty tag segment"));
            }
            if let Some(c) = segment.chars().find(|c| !c.is_alphanumeric()) {
                return Err(GroupError::syntax(token, format!("illegal character {c:?}")));
            }
            tags.insert(segment.to_string());
        }

        Ok(Self { tags })
    }

    /// Parse a query key: like [`parse`](Self::parse), except that the empty
    /// key names the whole class.
    pub fn parse_key(key: &str) -> GroupResult<Self> {
        if key.is_empty() {
            Ok(Self::whole_class())
        } else {
            Self::parse(key)
        }
    }

    /// The tags, in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether this is the whole class.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Canonical form: sorted tags joined by [`TAG_SEPARATOR`].
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                out.push(TAG_SEPARATOR);
            }
            out.push_str(tag);
        }
        out
    }

    /// `self ⊑ other`: every tag of `other` is also a tag of `self`.
    pub fn refines(&self, other: &CompoundGroup) -> bool {
        other.tags.is_subset(&self.tags)
    }

    /// Tag-set union (the intersection of the two pupil groups).
    pub fn union(&self, other: &CompoundGroup) -> CompoundGroup {
        Self {
            tags: self.tags.union(&other.tags).cloned().collect(),
        }
    }
}

impl fmt::Display for CompoundGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl FromStr for CompoundGroup {
    type Err = GroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_sorts_tags() {
        let g = CompoundGroup::parse("G.A").unwrap();
        assert_eq!(g.canonical(), "A.G");
        assert_eq!(g, CompoundGroup::parse("A.G").unwrap());
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let g = CompoundGroup::parse("A.A.G").unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.to_string(), "A.G");
    }

    #[test]
    fn test_rejects_empty_and_bad_segments() {
        for token in ["", ".A", "A.", "A..G", "A-G", "A G", "A|G"] {
            let err = CompoundGroup::parse(token).unwrap_err();
            assert!(
                matches!(err, GroupError::InvalidGroupSyntax { .. }),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_digits_allowed() {
        let g: CompoundGroup = "R2.A".parse().unwrap();
        assert_eq!(g.canonical(), "A.R2");
    }

    #[test]
    fn test_refinement_order() {
        let a = CompoundGroup::parse("A").unwrap();
        let ag = CompoundGroup::parse("A.G").unwrap();
        let whole = CompoundGroup::whole_class();

        assert!(ag.refines(&a));
        assert!(!a.refines(&ag));
        assert!(a.refines(&a));
        assert!(a.refines(&whole));
        assert!(ag.refines(&whole));
    }

    #[test]
    fn test_parse_key_accepts_whole_class() {
        assert!(CompoundGroup::parse_key("").unwrap().is_empty());
        assert!(CompoundGroup::parse("").is_err());
    }

    #[test]
    fn test_union() {
        let a = CompoundGroup::parse("A").unwrap();
        let g = CompoundGroup::parse("G.I").unwrap();
        assert_eq!(a.union(&g).canonical(), "A.G.I");
    }
}
