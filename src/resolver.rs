//! Division independence resolver.
//!
//! Two divisions conflict when some pair of their members cannot be held by
//! the same pupil. Conflicting divisions are merged into their compatible
//! cross-set until every remaining pair of divisions is independent.
//!
//! ## Algorithm
//!
//! 1. Record, for every declared group, its impossible partners: the other
//!    members of every division that declares it.
//! 2. Pop a division from the pending worklist and compare it with every other
//!    pending or already resolved division.
//! 3. On the first conflict, remove the other division and replace the current
//!    one by the unions of all compatible member pairs; re-test it.
//! 4. With no conflict, the division is resolved.
//!
//! Each merge removes one division and each non-merging step resolves one, so
//! the potential `2 * pending + resolved` strictly drops on every iteration.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::{GroupError, GroupResult};
use crate::types::{GroupMask, TagInterner};

/// A division in mask form.
pub type MaskDivision = BTreeSet<GroupMask>;

/// Mutual-exclusion table for declared groups.
#[derive(Debug, Clone, Default)]
pub struct ImpossiblePartners {
    partners: BTreeMap<GroupMask, BTreeSet<GroupMask>>,
}

impl ImpossiblePartners {
    /// Build from the declared divisions.
    pub fn from_divisions(divisions: &[MaskDivision]) -> Self {
        let mut partners: BTreeMap<GroupMask, BTreeSet<GroupMask>> = BTreeMap::new();
        for division in divisions {
            for &group in division {
                let entry = partners.entry(group).or_default();
                entry.extend(division.iter().copied().filter(|&other| other != group));
            }
        }
        Self { partners }
    }

    /// Groups that can never co-occur with `group`.
    pub fn partners_of(&self, group: GroupMask) -> impl Iterator<Item = GroupMask> + '_ {
        self.partners.get(&group).into_iter().flatten().copied()
    }

    /// Whether no pupil can belong to `group`: it refines two declared groups
    /// that exclude each other.
    pub fn is_contradictory(&self, group: GroupMask) -> bool {
        self.partners.iter().any(|(&declared, partners)| {
            group.refines(declared) && partners.iter().any(|&p| group.refines(p))
        })
    }

    /// Whether `a` and `b` cannot share a pupil.
    pub fn excludes(&self, a: GroupMask, b: GroupMask) -> bool {
        self.is_contradictory(a.union(b))
    }
}

/// Output of the resolver.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Pairwise independent divisions.
    pub divisions: Vec<MaskDivision>,
    /// Number of merges performed.
    pub merges: usize,
}

/// Fixed-point resolver over mask divisions.
pub struct IndependenceResolver<'a> {
    partners: &'a ImpossiblePartners,
    interner: &'a TagInterner,
}

impl<'a> IndependenceResolver<'a> {
    /// Create a resolver over the given exclusion table.
    pub fn new(partners: &'a ImpossiblePartners, interner: &'a TagInterner) -> Self {
        Self { partners, interner }
    }

    /// Whether any member pair of `left` × `right` is mutually exclusive.
    pub fn conflicts(&self, left: &MaskDivision, right: &MaskDivision) -> bool {
        left.iter()
            .any(|&a| right.iter().any(|&b| self.partners.excludes(a, b)))
    }

    /// Compatible cross-set of two divisions.
    pub fn merge(&self, left: &MaskDivision, right: &MaskDivision) -> GroupResult<MaskDivision> {
        let merged: MaskDivision = left
            .iter()
            .flat_map(|&a| right.iter().map(move |&b| (a, b)))
            .filter(|&(a, b)| !self.partners.excludes(a, b))
            .map(|(a, b)| a.union(b))
            .collect();

        if merged.is_empty() {
            return Err(GroupError::ImpossibleGroupDeclaration {
                reason: format!(
                    "divisions [{}] and [{}] have no compatible groups",
                    self.render(left),
                    self.render(right),
                ),
            });
        }

        Ok(merged)
    }

    /// Merge the divisions until they are pairwise independent.
    pub fn resolve(&self, divisions: Vec<MaskDivision>) -> GroupResult<Resolution> {
        let mut pending: VecDeque<MaskDivision> =
            divisions.into_iter().filter(|d| !d.is_empty()).collect();
        let mut resolved: Vec<MaskDivision> = Vec::new();
        let mut merges = 0;

        while let Some(current) = pending.pop_front() {
            let before = pending.len() + resolved.len() + 1;

            let other = match pending.iter().position(|d| self.conflicts(&current, d)) {
                Some(idx) => pending.remove(idx),
                None => resolved
                    .iter()
                    .position(|d| self.conflicts(&current, d))
                    .map(|idx| resolved.remove(idx)),
            };

            match other {
                Some(other) => {
                    let merged = self.merge(&current, &other)?;
                    tracing::debug!(
                        left = %self.render(&current),
                        right = %self.render(&other),
                        merged = %self.render(&merged),
                        "Merged conflicting divisions"
                    );
                    pending.push_front(merged);
                    merges += 1;
                    debug_assert!(pending.len() + resolved.len() < before);
                }
                None => {
                    tracing::debug!(division = %self.render(&current), "Division resolved");
                    resolved.push(current);
                }
            }
        }

        Ok(Resolution { divisions: resolved, merges })
    }

    fn render(&self, division: &MaskDivision) -> String {
        self.interner.sorted_keys(division.iter().copied()).join(" ")
    }
}
