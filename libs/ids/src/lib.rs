//! # Identifier Collections
//!
//! Immutable, size-specialized identifier containers for the terminology
//! knowledge base.
//!
//! ## Design Philosophy
//!
//! - **Density First**: millions of instances of cardinality <= 2 dominate
//!   the loaded graph, so zero-, one-, and two-element collections carry no
//!   backing array at all; the representation is a construction-time
//!   decision that never leaks through the API
//! - **Merge-Aware Identity**: a [`PublicId`] holds one or more 128-bit
//!   values and compares equal to anything sharing at least one of them,
//!   modeling identifier merges across source systems
//! - **Immutable and Lock-Free**: every type is deeply immutable after
//!   construction; concurrent readers need no synchronization
//! - **Fail Fast**: duplicate set elements, empty identities, and mutation
//!   attempts are synchronous, typed errors, never silent degradation
//!
//! ## Quick Start
//!
//! ### Local-id collections
//! ```rust
//! use ids::{IdCollection, IntIdList, IntIdSet};
//!
//! let set = IntIdSet::of(&[5, 7])?;
//! assert!(set.contains(5) && !set.contains(6));
//!
//! // Lists keep order and repeats; sets reject duplicates outright.
//! let list = IntIdList::of(&[5, 5, 7]);
//! assert_eq!(list.len(), 3);
//! assert!(IntIdSet::of(&[5, 5]).is_err());
//! # Ok::<(), ids::IdCollectionError>(())
//! ```
//!
//! ### Global identifiers
//! ```rust
//! use ids::PublicId;
//! use uuid::Uuid;
//!
//! let solo = PublicId::from_uuid(Uuid::from_u128(1));
//! let merged = PublicId::from_pair(Uuid::from_u128(1), Uuid::from_u128(2));
//! assert_eq!(solo, merged); // any shared value matches
//! ```
//!
//! ## Integration Points
//!
//! Domain code constructs a [`PublicId`] once per entity; an external
//! identity-resolution service maps it to a nid, and hot paths (graph
//! traversal, per-entity property sets) then work exclusively with
//! [`IntIdSet`]/[`IntIdList`]. [`PublicIdList`]/[`PublicIdSet`] hold full
//! identities where resolution has not happened, e.g. configuration lists.
//! This crate performs no resolution and no I/O of its own.

pub mod display;
pub mod error;
pub mod local;
pub mod public;

mod salt;

pub use display::{DISPLAY_LIMIT, ELLIPSIS};
pub use error::{IdCollectionError, Result};
pub use local::{IdCollection, IntIdList, IntIdSet, Nid, LINEAR_SCAN_MAX};
pub use public::{PublicId, PublicIdList, PublicIdSet};
