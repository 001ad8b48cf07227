//! # class-groups
//!
//! Class-group algebra for school administration.
//!
//! A class is subdivided by human-authored divisions (language choice,
//! remedial stream, elective, ...). The engine answers one question:
//!
//! > Which minimal pupil subgroups ("atoms") does this declaration imply, and
//! > which atoms make up each declared group?
//!
//! ## Core Contract
//!
//! 1. Parse the declaration (`"A B | G R | A.I B"`) into divisions of
//!    compound groups
//! 2. Merge divisions that can conflict until all are pairwise independent
//! 3. Cross the independent divisions into atoms
//! 4. Express every declared group as pieces of the independent divisions
//!
//! ## Architecture
//!
//! ```text
//! DeclarationSource → ClassGroupCache → GroupEngine → ClassGroupInfo
//!                                           ↓
//!                     Declaration → Resolver → Atoms → GroupMapper
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same declaration → identical `ClassGroupInfo` and fingerprint
//! - Group names are canonical (tags sorted, joined by `.`)
//! - Divisions, atoms and groups are sorted; maps are `BTreeMap`
//!
//! ## Example
//!
//! ```rust
//! use class_groups::GroupEngine;
//!
//! let info = GroupEngine::default().analyse_str("A B | G R").unwrap();
//! assert_eq!(info.minimal_subgroups, ["A.G", "A.R", "B.G", "B.R"]);
//! assert!(info.overlaps("A", "G").unwrap());
//! assert!(!info.overlaps("A", "B").unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod error;
pub mod resolver;
pub mod atoms;
pub mod mapper;
pub mod engine;
pub mod cache;
pub mod store;
pub mod query;
pub mod canonical;

// Re-exports
pub use types::{
    ClassId, ClassGroupInfo, CompoundGroup, Declaration, Division, GroupMask, TagInterner,
    DIVISION_SEPARATOR, MAX_TAGS, TAG_SEPARATOR,
};
pub use error::{GroupError, GroupResult};
pub use resolver::{ImpossiblePartners, IndependenceResolver, MaskDivision, Resolution};
pub use atoms::minimal_subgroups;
pub use mapper::GroupMapper;
pub use engine::{EngineOptions, GroupEngine};
pub use cache::{CacheConfig, CacheStats, ClassGroupCache};
pub use store::{DeclarationSource, InMemoryDeclarations};
pub use query::atoms_of;
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};

/// Schema version for serialized `ClassGroupInfo`.
/// Increment on breaking changes to any serialized type.
pub const CLASS_GROUPS_SCHEMA_VERSION: &str = "1.0.0";
