//! Error taxonomy for the class-group engine.
//!
//! Every failure is deterministic: the engine is pure, so a repeated error
//! means bad input, never a transient condition. Nothing here is retried.

use crate::types::ClassId;

/// Error type for parsing, resolving and caching class groups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupError {
    /// A group token is empty, has an empty dot segment or an illegal character.
    #[error("Invalid group syntax in {token:?}: {reason}")]
    InvalidGroupSyntax {
        /// The offending token as written.
        token: String,
        /// What is wrong with it.
        reason: String,
    },
    /// The declared divisions contradict each other.
    #[error("Impossible group declaration: {reason}")]
    ImpossibleGroupDeclaration {
        /// Which divisions could not be combined.
        reason: String,
    },
    /// The "no class" sentinel, or a class without a declaration, was queried.
    #[error("Unknown class: {0}")]
    UnknownClass(ClassId),
    /// More distinct atomic tags than the interner can hold.
    #[error("Too many atomic tags in one declaration (limit {limit})")]
    TooManyTags {
        /// Interner capacity.
        limit: usize,
    },
    /// Declaration source error.
    #[error("Declaration source error: {0}")]
    Source(String),
}

impl GroupError {
    /// Create a syntax error for a token.
    pub fn syntax(token: &str, reason: impl Into<String>) -> Self {
        Self::InvalidGroupSyntax {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a source error from any error type.
    pub fn from_source<E: std::error::Error>(e: E) -> Self {
        Self::Source(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type GroupResult<T> = Result<T, GroupError>;
