//! Tag interning and bit-set group masks.
//!
//! Each atomic tag of a declaration gets a bit position. Tags are interned in
//! sorted order, so walking a mask's bits from low to high yields the tags in
//! canonical order.

use std::collections::BTreeMap;

use super::group::{CompoundGroup, TAG_SEPARATOR};
use crate::error::{GroupError, GroupResult};

/// Maximum number of distinct atomic tags per declaration.
pub const MAX_TAGS: usize = u128::BITS as usize;

/// A compound group as a bit-set over interned tags.
///
/// Refinement is a single mask test: `g ⊑ h` iff `g & h == h`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupMask(u128);

impl GroupMask {
    /// The whole class.
    pub const EMPTY: GroupMask = GroupMask(0);

    /// Raw bits.
    pub fn bits(self) -> u128 {
        self.0
    }

    /// Tag-set union.
    pub fn union(self, other: GroupMask) -> GroupMask {
        GroupMask(self.0 | other.0)
    }

    /// `self ⊑ other` (self carries every tag of other).
    pub fn refines(self, other: GroupMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// `self ⊑ other` and `self != other`.
    pub fn strictly_refines(self, other: GroupMask) -> bool {
        self != other && self.refines(other)
    }

    /// Whether no tags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of tags.
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }
}

/// Fixed-size interner mapping atomic tags to bit positions.
#[derive(Debug, Clone, Default)]
pub struct TagInterner {
    tags: Vec<String>,
    index: BTreeMap<String, usize>,
}

impl TagInterner {
    /// Build an interner over every tag used by `groups`.
    pub fn from_groups<'a, I>(groups: I) -> GroupResult<Self>
    where
        I: IntoIterator<Item = &'a CompoundGroup>,
    {
        let mut vocabulary: Vec<String> = groups
            .into_iter()
            .flat_map(|g| g.tags().map(str::to_string))
            .collect();
        vocabulary.sort();
        vocabulary.dedup();

        if vocabulary.len() > MAX_TAGS {
            return Err(GroupError::TooManyTags { limit: MAX_TAGS });
        }

        let index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, tag)| (tag.clone(), i))
            .collect();

        Ok(Self { tags: vocabulary, index })
    }

    /// Number of interned tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether no tags are interned.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Mask for a group, or `None` if it uses a tag this interner never saw.
    pub fn mask(&self, group: &CompoundGroup) -> Option<GroupMask> {
        let mut bits = 0u128;
        for tag in group.tags() {
            bits |= 1u128 << *self.index.get(tag)?;
        }
        Some(GroupMask(bits))
    }

    /// Canonical string key for a mask.
    pub fn key(&self, mask: GroupMask) -> String {
        let mut out = String::new();
        for (i, tag) in self.tags.iter().enumerate() {
            if mask.0 & (1u128 << i) != 0 {
                if !out.is_empty() {
                    out.push(TAG_SEPARATOR);
                }
                out.push_str(tag);
            }
        }
        out
    }

    /// Canonical keys for a list of masks, sorted.
    pub fn sorted_keys<I>(&self, masks: I) -> Vec<String>
    where
        I: IntoIterator<Item = GroupMask>,
    {
        let mut keys: Vec<String> = masks.into_iter().map(|m| self.key(m)).collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Sort masks by their canonical key.
    pub fn sort_canonical(&self, masks: &mut [GroupMask]) {
        masks.sort_by_cached_key(|m| self.key(*m));
    }
}
