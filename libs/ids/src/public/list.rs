//! Immutable list of global identifiers
//!
//! Same arity tiering as the nid collections: one and two elements inline,
//! larger lists behind a shared backing sequence. Sub-range views share the
//! parent's backing storage with an offset and length instead of copying;
//! taking a sub-range of a sub-range composes the offsets, so indirection
//! depth never exceeds one.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::Arc;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::display::fmt_bounded;
use crate::error::{IdCollectionError, Result};
use crate::public::PublicId;

/// Immutable, order-significant sequence of [`PublicId`]s.
#[derive(Debug, Clone)]
pub struct PublicIdList {
    repr: ListRepr,
}

#[derive(Debug, Clone)]
enum ListRepr {
    Empty,
    One(PublicId),
    Two([PublicId; 2]),
    Many(Arc<[PublicId]>),
    View {
        backing: Arc<[PublicId]>,
        offset: usize,
        len: usize,
    },
}

impl PublicIdList {
    /// Shared empty list; allocates nothing.
    pub const EMPTY: PublicIdList = PublicIdList {
        repr: ListRepr::Empty,
    };

    /// Build a list from `values` in order, cloning the elements.
    pub fn of(values: &[PublicId]) -> Self {
        Self::from_vec(values.to_vec())
    }

    /// Build a list from an owned vector, selecting the representation by
    /// length.
    pub fn from_vec(mut values: Vec<PublicId>) -> Self {
        let repr = match values.len() {
            0 => ListRepr::Empty,
            1 => ListRepr::One(values.remove(0)),
            2 => {
                let second = values.remove(1);
                let first = values.remove(0);
                ListRepr::Two([first, second])
            }
            _ => ListRepr::Many(Arc::from(values)),
        };
        Self { repr }
    }

    /// Read-only view of the elements; borrows internal backing storage for
    /// every representation.
    pub fn as_slice(&self) -> &[PublicId] {
        match &self.repr {
            ListRepr::Empty => &[],
            ListRepr::One(id) => std::slice::from_ref(id),
            ListRepr::Two(ids) => ids,
            ListRepr::Many(backing) => backing,
            ListRepr::View {
                backing,
                offset,
                len,
            } => &backing[*offset..offset + len],
        }
    }

    pub fn len(&self) -> usize {
        match &self.repr {
            ListRepr::Empty => 0,
            ListRepr::One(_) => 1,
            ListRepr::Two(_) => 2,
            ListRepr::Many(backing) => backing.len(),
            ListRepr::View { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, or a bounds error carrying the offending index
    /// and the list's length.
    pub fn get(&self, index: usize) -> Result<&PublicId> {
        self.as_slice()
            .get(index)
            .ok_or(IdCollectionError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    pub fn first(&self) -> Option<&PublicId> {
        self.as_slice().first()
    }

    pub fn last(&self) -> Option<&PublicId> {
        self.as_slice().last()
    }

    /// Membership under the merge-aware identity contract.
    pub fn contains(&self, id: &PublicId) -> bool {
        self.as_slice().iter().any(|element| element == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PublicId> + '_ {
        self.as_slice().iter()
    }

    pub fn for_each<F: FnMut(&PublicId)>(&self, f: F) {
        self.as_slice().iter().for_each(f);
    }

    pub fn to_vec(&self) -> Vec<PublicId> {
        self.as_slice().to_vec()
    }

    /// Sub-range view sharing this list's backing storage.
    ///
    /// A view of a backed list keeps the same backing with an adjusted
    /// offset; a view of a view composes offsets rather than nesting. The
    /// inline representations have no backing array to share, so their
    /// sub-ranges re-tier through the factory.
    pub fn sub_list(&self, range: Range<usize>) -> Result<Self> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(IdCollectionError::IndexOutOfBounds {
                index: range.end,
                len,
            });
        }
        let sub_len = range.end - range.start;
        match &self.repr {
            ListRepr::Many(backing) => Ok(Self {
                repr: ListRepr::View {
                    backing: backing.clone(),
                    offset: range.start,
                    len: sub_len,
                },
            }),
            ListRepr::View {
                backing, offset, ..
            } => Ok(Self {
                repr: ListRepr::View {
                    backing: backing.clone(),
                    offset: offset + range.start,
                    len: sub_len,
                },
            }),
            _ => Ok(Self::of(&self.as_slice()[range])),
        }
    }

    // Mutators exist for capability-surface compatibility only; every call
    // fails with the dedicated immutability error.

    pub fn add(&self, _id: &PublicId) -> Result<()> {
        Err(IdCollectionError::unsupported("add"))
    }

    pub fn set_at(&self, _index: usize, _id: &PublicId) -> Result<()> {
        Err(IdCollectionError::unsupported("set_at"))
    }

    pub fn insert_at(&self, _index: usize, _id: &PublicId) -> Result<()> {
        Err(IdCollectionError::unsupported("insert_at"))
    }

    pub fn remove(&self, _id: &PublicId) -> Result<()> {
        Err(IdCollectionError::unsupported("remove"))
    }

    pub fn clear(&self) -> Result<()> {
        Err(IdCollectionError::unsupported("clear"))
    }

    pub fn sort(&self) -> Result<()> {
        Err(IdCollectionError::unsupported("sort"))
    }
}

/// Length plus merge-aware element equality at every index.
impl PartialEq for PublicIdList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for PublicIdList {}

impl Hash for PublicIdList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let slice = self.as_slice();
        state.write_usize(slice.len());
        for id in slice {
            state.write_u64(id.uuid_fold());
        }
    }
}

impl fmt::Display for PublicIdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bounded(f, self.iter(), self.len())
    }
}

impl FromIterator<PublicId> for PublicIdList {
    fn from_iter<I: IntoIterator<Item = PublicId>>(values: I) -> Self {
        Self::from_vec(values.into_iter().collect())
    }
}

impl Serialize for PublicIdList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for id in self.iter() {
            seq.serialize_element(id)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for PublicIdList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<PublicId>::deserialize(deserializer)?;
        Ok(PublicIdList::from_vec(values))
    }
}
