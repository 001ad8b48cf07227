//! Core types for the class-group engine.

pub mod tag;
pub mod group;
pub mod division;
pub mod info;

pub use tag::{TagInterner, GroupMask, MAX_TAGS};
pub use group::{CompoundGroup, TAG_SEPARATOR};
pub use division::{Division, Declaration, DIVISION_SEPARATOR};
pub use info::{ClassId, ClassGroupInfo};
