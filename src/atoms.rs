//! Atom generation: the cross product of the independent divisions.

use std::collections::BTreeSet;

use crate::resolver::{ImpossiblePartners, MaskDivision};
use crate::types::GroupMask;

/// Every union of exactly one member from each division.
///
/// Unions no pupil can satisfy are dropped as soon as they appear; adding
/// tags never lifts a contradiction, so no atom is lost by pruning early.
/// With no divisions the only atom is the whole class.
pub fn minimal_subgroups(
    divisions: &[MaskDivision],
    partners: &ImpossiblePartners,
) -> BTreeSet<GroupMask> {
    let mut atoms: BTreeSet<GroupMask> = BTreeSet::from([GroupMask::EMPTY]);

    for division in divisions {
        atoms = atoms
            .iter()
            .flat_map(|&atom| division.iter().map(move |&member| atom.union(member)))
            .filter(|&candidate| !partners.is_contradictory(candidate))
            .collect();
    }

    atoms
}
