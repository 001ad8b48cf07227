//! In-memory declaration source.

use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::types::ClassId;
use super::DeclarationSource;

/// Declarations held in memory, keyed by class.
///
/// Uses BTreeMap for deterministic iteration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeclarations {
    declarations: BTreeMap<ClassId, String>,
}

impl InMemoryDeclarations {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the declaration of a class.
    pub fn set_declaration(&mut self, class_id: ClassId, declaration: impl Into<String>) {
        self.declarations.insert(class_id, declaration.into());
    }

    /// Remove a class. Returns its declaration if it had one.
    pub fn remove(&mut self, class_id: &ClassId) -> Option<String> {
        self.declarations.remove(class_id)
    }

    /// All known classes, sorted.
    pub fn classes(&self) -> Vec<&ClassId> {
        self.declarations.keys().collect()
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether no class is known.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InMemoryDeclarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            declarations: iter
                .into_iter()
                .map(|(k, v)| (ClassId::new(k), v.into()))
                .collect(),
        }
    }
}

impl DeclarationSource for InMemoryDeclarations {
    type Error = Infallible;

    fn declaration(&self, class_id: &ClassId) -> Result<Option<String>, Self::Error> {
        Ok(self.declarations.get(class_id).cloned())
    }
}
