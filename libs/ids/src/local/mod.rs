//! Local-id (nid) collections
//!
//! A nid is a signed 32-bit surrogate for an entity, valid only within one
//! running identity-resolution context. It has no intrinsic structure and
//! compares by integer equality. The collections here back extremely hot
//! paths (graph edges, per-entity property sets) where millions of instances
//! of cardinality <= 2 dominate, so every representation is chosen at
//! construction for memory density: no backing array exists until the third
//! element, and very large sets switch to a compressed bitmap index.
//!
//! [`IntIdSet`] is order-insignificant with no duplicates; [`IntIdList`]
//! preserves insertion order and permits repeats. Both are immutable after
//! construction and therefore trivially thread-safe.

use std::borrow::Cow;

pub mod list;
pub mod set;

pub use list::IntIdList;
pub use set::IntIdSet;

/// Local identifier: opaque 32-bit surrogate assigned by identity resolution.
pub type Nid = i32;

/// Membership threshold for array-backed sets: at or below this length a
/// linear scan wins over branch-heavy binary search; above it, lookups go
/// through a sorted copy built once at construction.
pub const LINEAR_SCAN_MAX: usize = 32;

/// Capability surface shared by every nid collection representation.
///
/// Callers stay representation-transparent: whether a collection is inline,
/// array-backed, or bitmap-backed is a construction-time decision that never
/// leaks through this trait.
pub trait IdCollection {
    /// Element count. O(1) for every representation; the bitmap variant
    /// answers with a cardinality query that is effectively O(1) amortized.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership test: scan, binary search, or bitmap probe depending on
    /// representation.
    fn contains(&self, nid: Nid) -> bool;

    /// Visit every element exactly once. Lists visit in stored order; sets
    /// in representation-defined order with no cross-representation
    /// guarantee.
    fn for_each<F: FnMut(Nid)>(&self, f: F);

    /// Read-only view of the elements.
    ///
    /// For inline and array-backed representations this borrows the internal
    /// backing storage rather than copying; the `Cow` return makes the
    /// "treat as read-only" contract static instead of a comment. The bitmap
    /// representation materializes an owned vector.
    fn as_slice(&self) -> Cow<'_, [Nid]>;

    /// Fresh owned materialization of the elements.
    fn to_vec(&self) -> Vec<Nid> {
        self.as_slice().into_owned()
    }
}
