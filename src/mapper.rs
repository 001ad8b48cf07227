//! Group mapper: declared groups in terms of independent-division pieces.
//!
//! Within one independent division a declared group is either a member
//! itself, or the union of the members strictly refining it. Concatenating
//! the pieces over all divisions gives the group's expression; the atoms
//! reachable from those pieces are exactly the atoms refining the group.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{GroupMask, TagInterner};

/// Expresses declared groups over canonically ordered independent divisions.
pub struct GroupMapper<'a> {
    divisions: &'a [Vec<GroupMask>],
}

impl<'a> GroupMapper<'a> {
    /// Create a mapper. Each division must already be in canonical order.
    pub fn new(divisions: &'a [Vec<GroupMask>]) -> Self {
        Self { divisions }
    }

    /// Pieces of `group`, one list per division (possibly empty).
    pub fn expression(&self, group: GroupMask) -> Vec<Vec<GroupMask>> {
        self.divisions
            .iter()
            .map(|division| {
                if division.contains(&group) {
                    vec![group]
                } else {
                    division
                        .iter()
                        .copied()
                        .filter(|member| member.strictly_refines(group))
                        .collect()
                }
            })
            .collect()
    }

    /// Flattened pieces of `group`.
    pub fn pieces(&self, group: GroupMask) -> Vec<GroupMask> {
        self.expression(group).into_iter().flatten().collect()
    }

    /// Pieces for every declared group.
    pub fn map(&self, groups: &BTreeSet<GroupMask>) -> BTreeMap<GroupMask, Vec<GroupMask>> {
        groups.iter().map(|&g| (g, self.pieces(g))).collect()
    }

    /// Naming post-pass: when a declared group is, within some division, a
    /// single piece that is not itself declared, prefer the declared name for
    /// that piece. The first declared group in canonical order wins.
    ///
    /// Purely cosmetic; the piece keeps its tags.
    pub fn aliases(
        &self,
        groups: &BTreeSet<GroupMask>,
        interner: &TagInterner,
    ) -> BTreeMap<GroupMask, GroupMask> {
        let mut ordered: Vec<GroupMask> = groups.iter().copied().collect();
        interner.sort_canonical(&mut ordered);

        let mut aliases = BTreeMap::new();
        for group in ordered {
            for pieces in self.expression(group) {
                if let &[piece] = pieces.as_slice() {
                    if piece != group && !groups.contains(&piece) {
                        aliases.entry(piece).or_insert(group);
                    }
                }
            }
        }
        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompoundGroup;

    struct Fixture {
        interner: TagInterner,
        divisions: Vec<Vec<GroupMask>>,
        groups: BTreeSet<GroupMask>,
    }

    impl Fixture {
        fn new(divisions: &[&[&str]], declared: &[&str]) -> Self {
            let parsed: Vec<CompoundGroup> = divisions
                .iter()
                .flat_map(|d| d.iter())
                .chain(declared.iter())
                .map(|s| CompoundGroup::parse(s).unwrap())
                .collect();
            let interner = TagInterner::from_groups(&parsed).unwrap();
            let mask = |s: &str| interner.mask(&CompoundGroup::parse(s).unwrap()).unwrap();
            let divisions = divisions
                .iter()
                .map(|d| {
                    let mut members: Vec<GroupMask> = d.iter().map(|s| mask(*s)).collect();
                    interner.sort_canonical(&mut members);
                    members
                })
                .collect();
            let groups = declared.iter().map(|s| mask(*s)).collect();
            Self { interner, divisions, groups }
        }

        fn mask(&self, s: &str) -> GroupMask {
            self.interner.mask(&CompoundGroup::parse(s).unwrap()).unwrap()
        }

        fn pieces(&self, s: &str) -> Vec<String> {
            let mapper = GroupMapper::new(&self.divisions);
            mapper.pieces(self.mask(s)).into_iter().map(|m| self.interner.key(m)).collect()
        }
    }

    #[test]
    fn test_exact_members_map_to_themselves() {
        let f = Fixture::new(&[&["A", "B"], &["G", "R"]], &["A", "B", "G", "R"]);
        assert_eq!(f.pieces("A"), vec!["A"]);
        assert_eq!(f.pieces("R"), vec!["R"]);
    }

    #[test]
    fn test_refining_members_reconstruct_group() {
        let f = Fixture::new(&[&["A.X", "A.Y", "B"]], &["A", "A.X", "A.Y", "B"]);
        assert_eq!(f.pieces("A"), vec!["A.X", "A.Y"]);
        assert_eq!(f.pieces("B"), vec!["B"]);
    }

    #[test]
    fn test_pieces_span_divisions() {
        let f = Fixture::new(&[&["A"], &["A.X", "C"]], &["A", "A.X", "C"]);
        assert_eq!(f.pieces("A"), vec!["A", "A.X"]);
    }

    #[test]
    fn test_whole_class_expression() {
        let f = Fixture::new(&[&["A", "B"], &["G", "R"]], &["A", "B", "G", "R"]);
        let mapper = GroupMapper::new(&f.divisions);
        let expression = mapper.expression(GroupMask::EMPTY);
        assert_eq!(expression.len(), 2);
        assert_eq!(expression[0].len(), 2);
    }

    #[test]
    fn test_alias_for_unnamed_single_piece() {
        let f = Fixture::new(&[&["A.I", "B.I", "B.N"]], &["A", "A.I", "B", "I", "N"]);
        let mapper = GroupMapper::new(&f.divisions);
        let aliases = mapper.aliases(&f.groups, &f.interner);

        let named: Vec<(String, String)> = aliases
            .iter()
            .map(|(p, g)| (f.interner.key(*p), f.interner.key(*g)))
            .collect();
        // A → A.I is a declared piece, so only N gets an alias
        assert_eq!(named, vec![("B.N".to_string(), "N".to_string())]);
    }
}
