//! Class-group engine: declaration in, [`ClassGroupInfo`] out.
//!
//! ```text
//! Declaration → TagInterner → ImpossiblePartners → Resolver → Atoms → GroupMapper
//!                                                                 ↓
//!                                                          ClassGroupInfo
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::atoms::minimal_subgroups;
use crate::error::{GroupError, GroupResult};
use crate::mapper::GroupMapper;
use crate::resolver::{ImpossiblePartners, IndependenceResolver, MaskDivision};
use crate::types::{ClassGroupInfo, Declaration, GroupMask, TagInterner};

/// Engine options.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Run the naming post-pass that fills [`ClassGroupInfo::aliases`].
    pub normalise_aliases: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            normalise_aliases: true,
        }
    }
}

/// Computes class-group info from declarations. Pure and deterministic.
#[derive(Debug, Clone, Default)]
pub struct GroupEngine {
    options: EngineOptions,
}

impl GroupEngine {
    /// Create an engine with the given options.
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Parse and analyse a raw declaration string.
    pub fn analyse_str(&self, text: &str) -> GroupResult<ClassGroupInfo> {
        self.analyse(&Declaration::parse(text)?)
    }

    /// Analyse a parsed declaration.
    pub fn analyse(&self, declaration: &Declaration) -> GroupResult<ClassGroupInfo> {
        if declaration.is_empty() {
            return Ok(ClassGroupInfo::undivided());
        }

        let declared = declaration.all_groups();
        let interner = TagInterner::from_groups(&declared)?;

        let mut groups: BTreeSet<GroupMask> = BTreeSet::new();
        let mut divisions: Vec<MaskDivision> = Vec::with_capacity(declaration.divisions().len());
        for division in declaration.divisions() {
            let mut masks = MaskDivision::new();
            for group in division.groups() {
                // Every declared tag was interned above.
                let mask = interner.mask(group).ok_or_else(|| {
                    GroupError::syntax(&group.canonical(), "tag missing from interner")
                })?;
                masks.insert(mask);
            }
            groups.extend(masks.iter().copied());
            divisions.push(masks);
        }

        let partners = ImpossiblePartners::from_divisions(&divisions);
        let divisions = prune_contradictions(divisions, &partners, &interner)?;

        let resolver = IndependenceResolver::new(&partners, &interner);
        let resolution = resolver.resolve(divisions)?;

        let mut independent: Vec<Vec<GroupMask>> = resolution
            .divisions
            .into_iter()
            .map(|d| {
                let mut members: Vec<GroupMask> = d.into_iter().collect();
                interner.sort_canonical(&mut members);
                members
            })
            .collect();
        independent.sort_by_cached_key(|d| d.iter().map(|&m| interner.key(m)).collect::<Vec<_>>());

        let resolved_sets: Vec<MaskDivision> = independent
            .iter()
            .map(|d| d.iter().copied().collect())
            .collect();
        let atoms = minimal_subgroups(&resolved_sets, &partners);
        if atoms.is_empty() {
            return Err(GroupError::ImpossibleGroupDeclaration {
                reason: format!("no pupil can satisfy the declaration \"{declaration}\""),
            });
        }

        let mapper = GroupMapper::new(&independent);
        let group_map: BTreeMap<String, Vec<String>> = mapper
            .map(&groups)
            .into_iter()
            .map(|(g, pieces)| {
                (
                    interner.key(g),
                    pieces.into_iter().map(|p| interner.key(p)).collect(),
                )
            })
            .collect();

        let aliases = if self.options.normalise_aliases {
            mapper
                .aliases(&groups, &interner)
                .into_iter()
                .map(|(piece, group)| (interner.key(piece), interner.key(group)))
                .collect()
        } else {
            BTreeMap::new()
        };

        let info = ClassGroupInfo {
            independent_divisions: independent
                .iter()
                .map(|d| d.iter().map(|&m| interner.key(m)).collect())
                .collect(),
            group_map,
            groups: interner.sorted_keys(groups.iter().copied()),
            minimal_subgroups: interner.sorted_keys(atoms),
            aliases,
        };

        tracing::debug!(
            divisions = info.independent_divisions.len(),
            atoms = info.minimal_subgroups.len(),
            merges = resolution.merges,
            "Analysed class declaration"
        );

        Ok(info)
    }
}

/// Drop declared groups no pupil can belong to. A division left empty makes
/// the declaration impossible.
fn prune_contradictions(
    divisions: Vec<MaskDivision>,
    partners: &ImpossiblePartners,
    interner: &TagInterner,
) -> GroupResult<Vec<MaskDivision>> {
    divisions
        .into_iter()
        .map(|division| {
            let (kept, dropped): (MaskDivision, MaskDivision) = division
                .iter()
                .copied()
                .partition(|&g| !partners.is_contradictory(g));

            for &g in &dropped {
                tracing::warn!(group = %interner.key(g), "Declared group can never hold a pupil");
            }

            if kept.is_empty() {
                return Err(GroupError::ImpossibleGroupDeclaration {
                    reason: format!(
                        "every group of division [{}] is self-contradictory",
                        interner.sorted_keys(division.iter().copied()).join(" ")
                    ),
                });
            }
            Ok(kept)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyse(text: &str) -> ClassGroupInfo {
        GroupEngine::default().analyse_str(text).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_orthogonal_divisions() {
        let info = analyse("A B | G R");
        assert_eq!(
            info.independent_divisions,
            vec![strings(&["A", "B"]), strings(&["G", "R"])]
        );
        assert_eq!(info.minimal_subgroups, strings(&["A.G", "A.R", "B.G", "B.R"]));
        assert_eq!(info.groups, strings(&["A", "B", "G", "R"]));
        for g in ["A", "B", "G", "R"] {
            assert_eq!(info.group_map[g], strings(&[g]));
        }
        assert!(info.aliases.is_empty());
    }

    #[test]
    fn test_single_division() {
        let info = analyse("A B C");
        assert_eq!(info.independent_divisions, vec![strings(&["A", "B", "C"])]);
        assert_eq!(info.minimal_subgroups, strings(&["A", "B", "C"]));
        assert_eq!(info.group_map.len(), 3);
        assert_eq!(info.group_map["C"], strings(&["C"]));
    }

    #[test]
    fn test_division_order_does_not_matter() {
        let a = analyse("G R | A B");
        let b = analyse("A B | G R");
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_subdivided_stream() {
        let info = analyse("A B | A.X A.Y B");
        assert_eq!(info.independent_divisions, vec![strings(&["A.X", "A.Y", "B"])]);
        assert_eq!(info.minimal_subgroups, strings(&["A.X", "A.Y", "B"]));
        assert_eq!(info.group_map["A"], strings(&["A.X", "A.Y"]));
        assert_eq!(info.group_map["A.X"], strings(&["A.X"]));
        assert_eq!(info.group_map["B"], strings(&["B"]));
    }

    #[test]
    fn test_aliases_for_unnamed_pieces() {
        let info = analyse("A B | I N | A.I B");
        assert_eq!(info.minimal_subgroups, strings(&["A.I", "B.I", "B.N"]));
        assert_eq!(info.group_map["N"], strings(&["B.N"]));
        assert_eq!(info.group_map["I"], strings(&["A.I", "B.I"]));
        assert_eq!(info.aliases.get("B.N").map(String::as_str), Some("N"));
        assert_eq!(info.display_name("B.N"), "N");
    }

    #[test]
    fn test_aliases_disabled() {
        let engine = GroupEngine::new(EngineOptions { normalise_aliases: false });
        let info = engine.analyse_str("A B | I N | A.I B").unwrap();
        assert!(info.aliases.is_empty());
        assert_eq!(info.group_map["N"], strings(&["B.N"]));
    }

    #[test]
    fn test_empty_declaration() {
        let info = analyse("  ");
        assert_eq!(info, ClassGroupInfo::undivided());
    }

    #[test]
    fn test_contradictory_group_maps_to_nothing() {
        let info = analyse("A A.B | B C");
        assert_eq!(info.minimal_subgroups, strings(&["A.C"]));
        assert!(info.group_map["A.B"].is_empty());
        assert!(info.groups.contains(&"A.B".to_string()));
    }

    #[test]
    fn test_impossible_declaration() {
        let err = GroupEngine::default().analyse_str("A B | A.B").unwrap_err();
        assert!(matches!(err, GroupError::ImpossibleGroupDeclaration { .. }));
    }

    #[test]
    fn test_invalid_syntax() {
        let err = GroupEngine::default().analyse_str("A B | .G R").unwrap_err();
        assert!(matches!(err, GroupError::InvalidGroupSyntax { .. }));
    }
}
