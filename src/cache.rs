//! Per-class cache of computed group info.
//!
//! ## Lifecycle
//!
//! A class's [`ClassGroupInfo`] is computed the first time any consumer asks
//! for it and reused afterwards. Entries are immutable; a changed declaration
//! only takes effect after an explicit [`ClassGroupCache::evict`].
//!
//! Failures are never cached: a malformed declaration fails again on the next
//! query instead of leaving a partial result behind.
//!
//! ## Thread Safety
//!
//! The class → info map sits behind a `parking_lot::RwLock`. Lookups take the
//! read lock and `peek`; only a miss takes the write lock. Two threads missing
//! on the same class may both compute it, which is harmless because the
//! engine is deterministic.

use lru::LruCache;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::engine::GroupEngine;
use crate::error::{GroupError, GroupResult};
use crate::store::DeclarationSource;
use crate::types::{ClassGroupInfo, ClassId};

/// Configuration for the class-group cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of classes kept.
    pub max_entries: usize,
    /// Whether to enable the cache.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            enabled: true,
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    /// Current number of entries in the cache.
    pub len: usize,
    /// Maximum capacity of the cache.
    pub cap: usize,
}

/// Lazily computed, memoized [`ClassGroupInfo`] per class.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use class_groups::{ClassGroupCache, ClassId, InMemoryDeclarations};
///
/// let mut source = InMemoryDeclarations::new();
/// source.set_declaration(ClassId::new("10A"), "A B | G R");
///
/// let cache = ClassGroupCache::new(Arc::new(source));
/// let info = cache.group_info(&ClassId::new("10A")).unwrap();
/// assert_eq!(info.minimal_subgroups, ["A.G", "A.R", "B.G", "B.R"]);
/// ```
pub struct ClassGroupCache<S: DeclarationSource> {
    source: Arc<S>,
    engine: GroupEngine,
    cache: Option<Arc<RwLock<LruCache<ClassId, Arc<ClassGroupInfo>>>>>,
}

impl<S: DeclarationSource> ClassGroupCache<S> {
    /// Create a cache with default configuration and engine options.
    pub fn new(source: Arc<S>) -> Self {
        Self::with_config(source, CacheConfig::default(), GroupEngine::default())
    }

    /// Create a cache with custom configuration.
    pub fn with_config(source: Arc<S>, config: CacheConfig, engine: GroupEngine) -> Self {
        let cache = if config.enabled {
            let size = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
            Some(Arc::new(RwLock::new(LruCache::new(size))))
        } else {
            None
        };

        Self { source, engine, cache }
    }

    /// Cached info for a class, computing it from the source on first access.
    ///
    /// Fails with [`GroupError::UnknownClass`] for the "no class" sentinel and
    /// for classes the source does not know.
    pub fn get_or_compute(&self, class_id: &ClassId) -> GroupResult<Arc<ClassGroupInfo>> {
        if class_id.is_none() {
            return Err(GroupError::UnknownClass(class_id.clone()));
        }

        if let Some(cache) = &self.cache {
            if let Some(info) = cache.read().peek(class_id) {
                tracing::debug!(class = %class_id, "Class group cache hit");
                return Ok(Arc::clone(info));
            }
        }

        let declaration = self
            .source
            .declaration(class_id)
            .map_err(GroupError::from_source)?
            .ok_or_else(|| GroupError::UnknownClass(class_id.clone()))?;

        let info = match self.engine.analyse_str(&declaration) {
            Ok(info) => Arc::new(info),
            Err(e) => {
                tracing::warn!(class = %class_id, error = %e, "Failed to load class groups");
                return Err(e);
            }
        };

        tracing::info!(
            class = %class_id,
            divisions = info.independent_divisions.len(),
            atoms = info.minimal_subgroups.len(),
            "Computed class groups"
        );

        if let Some(cache) = &self.cache {
            cache.write().put(class_id.clone(), Arc::clone(&info));
        }

        Ok(info)
    }

    /// Same as [`get_or_compute`](Self::get_or_compute).
    pub fn group_info(&self, class_id: &ClassId) -> GroupResult<Arc<ClassGroupInfo>> {
        self.get_or_compute(class_id)
    }

    /// Whether a class currently has a cached entry.
    pub fn is_cached(&self, class_id: &ClassId) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|cache| cache.read().contains(class_id))
    }

    /// Drop a class's entry so the next query recomputes it.
    ///
    /// Returns whether an entry was removed.
    pub fn evict(&self, class_id: &ClassId) -> bool {
        match &self.cache {
            Some(cache) => cache.write().pop(class_id).is_some(),
            None => false,
        }
    }

    /// Clear every entry.
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.write().clear();
        }
    }

    /// Get cache statistics.
    ///
    /// Returns `None` if caching is disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| {
            let cache = cache.read();
            CacheStats {
                len: cache.len(),
                cap: cache.cap().get(),
            }
        })
    }

    /// Get a reference to the declaration source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the engine.
    pub fn engine(&self) -> &GroupEngine {
        &self.engine
    }
}
