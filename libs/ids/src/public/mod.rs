//! Global identifiers: merge-aware 128-bit identity values
//!
//! ## Purpose
//!
//! A knowledge-base entity is identified globally by one or more 128-bit
//! values (UUIDs). Identifiers issued by different source systems may later
//! be recognized as referring to the same real-world concept; when that
//! happens the identifiers are merged and the entity carries all of them as
//! aliases. [`PublicId`] is the in-memory form of that identity: always at
//! least one UUID, unsorted, duplicates across merges tolerated but not
//! structurally deduplicated.
//!
//! ## Merge-aware equality
//!
//! Two identities are equal if they share **at least one** underlying UUID,
//! not if their value sets are identical. Once two source identifiers are
//! known to denote the same entity, any object holding either old identifier
//! must compare equal to an object holding the merged identity. Equality is
//! reflexive and symmetric; transitivity holds only if upstream merge
//! bookkeeping is consistent, which this library cannot enforce on its own.
//!
//! ## Hash caveat
//!
//! Because equality is "any value matches", no hash function can depend on
//! which subset of values is present and still be consistent with equality.
//! The implementation hashes a combination of all component halves, which is
//! stable per value set but not across different value sets of one merged
//! identity. Use as a hashed-container key is only safe when identity
//! resolution normalizes every alias of a merged identity to the same
//! in-memory value set first. This is an accepted approximation, not a bug.
//!
//! ## Representation
//!
//! Arity-specialized like the nid collections: one and two values are stored
//! inline, larger merge sets in a boxed slice. Almost every identity in a
//! loaded knowledge base has one value, so the inline forms dominate and the
//! backing allocation is rare.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use uuid::Uuid;

use crate::error::{IdCollectionError, Result};

pub mod list;
pub mod set;

pub use list::PublicIdList;
pub use set::PublicIdSet;

/// Identity of a knowledge-base entity: one or more 128-bit values, any one
/// of which is sufficient to match.
#[derive(Debug, Clone)]
pub struct PublicId {
    repr: IdRepr,
}

#[derive(Debug, Clone)]
enum IdRepr {
    One(Uuid),
    Two([Uuid; 2]),
    Many(Box<[Uuid]>),
}

impl PublicId {
    /// Identity with a single value.
    pub const fn from_uuid(value: Uuid) -> Self {
        Self {
            repr: IdRepr::One(value),
        }
    }

    /// Identity carrying two values, e.g. the result of one merge. Equal
    /// values are tolerated here; deduplication is the resolver's business,
    /// not this type's.
    pub const fn from_pair(first: Uuid, second: Uuid) -> Self {
        Self {
            repr: IdRepr::Two([first, second]),
        }
    }

    /// Identity from an arbitrary number of values.
    ///
    /// Fails with [`IdCollectionError::EmptyIdentity`] on an empty input;
    /// an identity always has at least one value.
    pub fn new(values: Vec<Uuid>) -> Result<Self> {
        match values.len() {
            0 => Err(IdCollectionError::EmptyIdentity),
            1 => Ok(Self::from_uuid(values[0])),
            2 => Ok(Self::from_pair(values[0], values[1])),
            _ => Ok(Self {
                repr: IdRepr::Many(values.into_boxed_slice()),
            }),
        }
    }

    /// Fresh single-value identity with a random (v4) UUID.
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Number of 128-bit values backing this identity.
    pub fn uuid_count(&self) -> usize {
        self.as_uuid_slice().len()
    }

    fn as_uuid_slice(&self) -> &[Uuid] {
        match &self.repr {
            IdRepr::One(value) => std::slice::from_ref(value),
            IdRepr::Two(values) => values,
            IdRepr::Many(values) => values,
        }
    }

    /// Lazy, restartable traversal of the values in storage order.
    pub fn uuids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.as_uuid_slice().iter().copied()
    }

    /// Fresh materialization of the full value set.
    pub fn to_uuid_array(&self) -> Vec<Uuid> {
        self.as_uuid_slice().to_vec()
    }

    /// Visit each value's two 64-bit halves (most-significant first) in
    /// storage order.
    pub fn for_each_half<F: FnMut(u64, u64)>(&self, mut f: F) {
        for value in self.uuids() {
            let (high, low) = value.as_u64_pair();
            f(high, low);
        }
    }

    /// True iff `value` is one of this identity's values. This is the probe
    /// equality is built on.
    pub fn contains(&self, value: Uuid) -> bool {
        self.as_uuid_slice().contains(&value)
    }

    /// Order-independent combination of all component halves; shared by the
    /// `Hash` impl and the open-addressing set's slot addressing.
    pub(crate) fn uuid_fold(&self) -> u64 {
        let mut acc = 0u64;
        self.for_each_half(|high, low| {
            acc = acc.wrapping_add(high).wrapping_add(low);
        });
        acc
    }
}

/// Merge-aware: true iff the two identities share at least one value. The
/// smaller side is iterated against the larger; arities are almost always
/// 1-3, so this is effectively constant time.
impl PartialEq for PublicId {
    fn eq(&self, other: &Self) -> bool {
        let (small, large) = if self.uuid_count() <= other.uuid_count() {
            (self, other)
        } else {
            (other, self)
        };
        small.uuids().any(|value| large.contains(value))
    }
}

// Reflexive and symmetric by construction; transitive only when upstream
// merge bookkeeping is consistent (see module docs).
impl Eq for PublicId {}

impl Hash for PublicId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.uuid_fold());
    }
}

impl fmt::Display for PublicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, value) in self.uuids().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// Parses the canonical hyphenated form of a single UUID.
impl FromStr for PublicId {
    type Err = uuid::Error;

    fn from_str(text: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(text).map(Self::from_uuid)
    }
}

impl From<Uuid> for PublicId {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

impl Serialize for PublicId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.uuid_count()))?;
        for value in self.uuids() {
            seq.serialize_element(&value)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for PublicId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<Uuid>::deserialize(deserializer)?;
        PublicId::new(values).map_err(serde::de::Error::custom)
    }
}
