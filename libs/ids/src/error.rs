//! Error types for identifier collection construction and access
//!
//! Every error in this crate is synchronous and local: construction-time
//! invariant violations, rejected mutation attempts, and out-of-range access.
//! Nothing here is retried or degraded; callers treat these as programming
//! errors in the surrounding graph-construction code.

use thiserror::Error;

/// Errors raised by identifier collections
///
/// The variants map one-to-one onto the error categories callers are expected
/// to assert against: construction invariants (`DuplicateElement`,
/// `EmptyIdentity`), rejected mutation (`UnsupportedMutation`), and bounds
/// violations (`IndexOutOfBounds`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdCollectionError {
    /// A set-kind collection was constructed with two equal elements.
    ///
    /// Silent dedup would hide a caller bug in surrounding graph-construction
    /// code, so this fails fast instead.
    #[error("duplicate element {value} in set construction")]
    DuplicateElement { value: String },

    /// An identity was constructed with zero UUID values (minimum is one).
    #[error("an identity requires at least one UUID value")]
    EmptyIdentity,

    /// Positional access beyond the collection's size.
    #[error("index {index} out of bounds for collection of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A mutating operation was attempted on an immutable collection.
    ///
    /// Mutators exist on the capability surface for compatibility with
    /// generic sequence/set abstractions but never succeed, even partially.
    #[error("collection is immutable: {operation} is not supported")]
    UnsupportedMutation { operation: &'static str },
}

impl IdCollectionError {
    pub(crate) fn duplicate(value: impl ToString) -> Self {
        Self::DuplicateElement {
            value: value.to_string(),
        }
    }

    pub(crate) fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedMutation { operation }
    }
}

/// Result alias for identifier collection operations
pub type Result<T, E = IdCollectionError> = std::result::Result<T, E>;
