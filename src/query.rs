//! Atom queries for consumers.
//!
//! Clash detection and subject filtering reduce to set tests on atoms: two
//! groups can share a pupil iff their atom sets intersect, and one group lies
//! inside another iff its atom set is a subset.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::GroupResult;
use crate::types::{CompoundGroup, GroupMask, TagInterner};

/// For each group key, the atoms that refine it.
///
/// The empty key is the whole class and maps to every atom. Keys naming a tag
/// that no atom carries map to the empty set. Malformed keys or atoms are
/// rejected.
pub fn atoms_of<A, K>(
    minimal_subgroups: &[A],
    group_keys: impl IntoIterator<Item = K>,
) -> GroupResult<BTreeMap<String, BTreeSet<String>>>
where
    A: AsRef<str>,
    K: AsRef<str>,
{
    let atoms = minimal_subgroups
        .iter()
        .map(|a| CompoundGroup::parse_key(a.as_ref()))
        .collect::<GroupResult<Vec<_>>>()?;
    let keys = group_keys
        .into_iter()
        .map(|k| {
            let key = k.as_ref().to_string();
            CompoundGroup::parse_key(&key).map(|g| (key, g))
        })
        .collect::<GroupResult<Vec<_>>>()?;

    let interner = TagInterner::from_groups(atoms.iter().chain(keys.iter().map(|(_, g)| g)))?;
    let atom_masks: Vec<(String, GroupMask)> = atoms
        .iter()
        .filter_map(|a| interner.mask(a).map(|m| (a.canonical(), m)))
        .collect();

    let mut result = BTreeMap::new();
    for (key, group) in keys {
        let refining: BTreeSet<String> = match interner.mask(&group) {
            Some(mask) => atom_masks
                .iter()
                .filter(|(_, atom)| atom.refines(mask))
                .map(|(name, _)| name.clone())
                .collect(),
            None => BTreeSet::new(),
        };
        result.insert(key, refining);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroupError;

    const ATOMS: [&str; 4] = ["A.G", "A.R", "B.G", "B.R"];

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_whole_class_key() {
        let mapping = atoms_of(&ATOMS, [""]).unwrap();
        assert_eq!(mapping[""], set(&ATOMS));
    }

    #[test]
    fn test_single_and_compound_keys() {
        let mapping = atoms_of(&ATOMS, ["A", "G", "A.G", "G.A"]).unwrap();
        assert_eq!(mapping["A"], set(&["A.G", "A.R"]));
        assert_eq!(mapping["G"], set(&["A.G", "B.G"]));
        assert_eq!(mapping["A.G"], set(&["A.G"]));
        assert_eq!(mapping["G.A"], set(&["A.G"]));
    }

    #[test]
    fn test_unknown_tag_is_empty() {
        let mapping = atoms_of(&ATOMS, ["Z"]).unwrap();
        assert!(mapping["Z"].is_empty());
    }

    #[test]
    fn test_malformed_key_rejected() {
        let err = atoms_of(&ATOMS, ["A..G"]).unwrap_err();
        assert!(matches!(err, GroupError::InvalidGroupSyntax { .. }));
    }

    #[test]
    fn test_undivided_class() {
        let mapping = atoms_of(&[""], ["", "A"]).unwrap();
        assert_eq!(mapping[""], set(&[""]));
        assert!(mapping["A"].is_empty());
    }
}
