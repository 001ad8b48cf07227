//! Declaration sources.
//!
//! The engine never reads persistence itself; the class registry hands it raw
//! declaration strings through this trait.

pub mod memory;

use crate::types::ClassId;

/// Trait for suppliers of raw per-class declarations.
///
/// Implementations must return the same declaration for a class until the
/// caller evicts that class from the cache.
pub trait DeclarationSource: Send + Sync {
    /// Error type for source operations.
    type Error: std::error::Error + Send + Sync;

    /// Raw declaration for a class, or `None` if the class is unknown.
    fn declaration(&self, class_id: &ClassId) -> Result<Option<String>, Self::Error>;
}

pub use memory::InMemoryDeclarations;
