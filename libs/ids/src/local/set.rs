//! Order-insignificant nid set with size-specialized representations
//!
//! The factory inspects element count and picks the densest layout: zero
//! elements cost nothing, one or two are stored inline without a backing
//! array, and larger sets use a boxed slice. Membership on the array
//! representation is a linear scan up to [`LINEAR_SCAN_MAX`] elements and a
//! binary search over a sorted copy beyond it; the sorted copy is built once
//! at construction. High-cardinality or sparse-but-wide sets can be built on
//! a roaring bitmap instead, giving sub-linear membership and cardinality.
//!
//! Two sets are equal iff they have the same cardinality and the same element
//! multiset, regardless of representation.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use roaring::RoaringBitmap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use tracing::trace;

use crate::display::fmt_bounded;
use crate::error::{IdCollectionError, Result};
use crate::local::{IdCollection, IntIdList, Nid, LINEAR_SCAN_MAX};

/// Immutable set of local identifiers.
///
/// Construct through [`IntIdSet::of`] (representation chosen by length) or
/// [`IntIdSet::of_bitmap`] (caller-selected compressed bitmap). Duplicate
/// input values are a construction error at every arity.
#[derive(Debug, Clone)]
pub struct IntIdSet {
    repr: SetRepr,
}

#[derive(Debug, Clone)]
enum SetRepr {
    Empty,
    One(Nid),
    Two([Nid; 2]),
    Array {
        values: Box<[Nid]>,
        /// Present iff `values.len() > LINEAR_SCAN_MAX`.
        sorted: Option<Box<[Nid]>>,
    },
    Bitmap(RoaringBitmap),
}

impl IntIdSet {
    /// Shared empty set; allocates nothing.
    pub const EMPTY: IntIdSet = IntIdSet {
        repr: SetRepr::Empty,
    };

    /// Build a set from `values`, selecting the representation by length.
    ///
    /// Fails fast with [`IdCollectionError::DuplicateElement`] if any value
    /// repeats; silent dedup would hide a caller bug.
    pub fn of(values: &[Nid]) -> Result<Self> {
        match values.len() {
            0 => Ok(Self::EMPTY),
            1 => Ok(Self {
                repr: SetRepr::One(values[0]),
            }),
            2 => {
                if values[0] == values[1] {
                    return Err(IdCollectionError::duplicate(values[0]));
                }
                Ok(Self {
                    repr: SetRepr::Two([values[0], values[1]]),
                })
            }
            len => {
                let mut scratch = values.to_vec();
                scratch.sort_unstable();
                if let Some(pair) = scratch.windows(2).find(|pair| pair[0] == pair[1]) {
                    return Err(IdCollectionError::duplicate(pair[0]));
                }
                let sorted = (len > LINEAR_SCAN_MAX).then(|| scratch.into_boxed_slice());
                trace!(len, binary_search = sorted.is_some(), "array-backed nid set");
                Ok(Self {
                    repr: SetRepr::Array {
                        values: values.to_vec().into_boxed_slice(),
                        sorted,
                    },
                })
            }
        }
    }

    /// Build a compressed-bitmap set. Caller-selected for sets expected to be
    /// large or sparse-but-wide; small inputs are accepted but gain nothing.
    pub fn of_bitmap(values: &[Nid]) -> Result<Self> {
        Self::of_bitmap_from_iter(values.iter().copied())
    }

    /// Bitmap construction from an arbitrary nid source.
    pub fn of_bitmap_from_iter<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = Nid>,
    {
        let mut bitmap = RoaringBitmap::new();
        for nid in values {
            if !bitmap.insert(nid as u32) {
                return Err(IdCollectionError::duplicate(nid));
            }
        }
        trace!(len = bitmap.len(), "bitmap-backed nid set");
        Ok(Self {
            repr: SetRepr::Bitmap(bitmap),
        })
    }

    /// Borrowed view of the backing storage for non-bitmap representations.
    fn backing(&self) -> Option<&[Nid]> {
        match &self.repr {
            SetRepr::Empty => Some(&[]),
            SetRepr::One(value) => Some(std::slice::from_ref(value)),
            SetRepr::Two(values) => Some(values),
            SetRepr::Array { values, .. } => Some(values),
            SetRepr::Bitmap(_) => None,
        }
    }

    /// Lazy, restartable traversal in representation-defined order.
    pub fn iter(&self) -> Iter<'_> {
        let inner = match &self.repr {
            SetRepr::Bitmap(bitmap) => IterRepr::Bitmap(bitmap.iter()),
            _ => IterRepr::Slice(self.backing().unwrap_or(&[]).iter()),
        };
        Iter { inner }
    }

    // Mutators exist for capability-surface compatibility only; every call
    // fails with the dedicated immutability error.

    pub fn add(&self, _nid: Nid) -> Result<()> {
        Err(IdCollectionError::unsupported("add"))
    }

    pub fn remove(&self, _nid: Nid) -> Result<()> {
        Err(IdCollectionError::unsupported("remove"))
    }

    pub fn clear(&self) -> Result<()> {
        Err(IdCollectionError::unsupported("clear"))
    }
}

impl IdCollection for IntIdSet {
    fn len(&self) -> usize {
        match &self.repr {
            SetRepr::Empty => 0,
            SetRepr::One(_) => 1,
            SetRepr::Two(_) => 2,
            SetRepr::Array { values, .. } => values.len(),
            SetRepr::Bitmap(bitmap) => bitmap.len() as usize,
        }
    }

    fn contains(&self, nid: Nid) -> bool {
        match &self.repr {
            SetRepr::Empty => false,
            SetRepr::One(value) => *value == nid,
            SetRepr::Two(values) => values[0] == nid || values[1] == nid,
            SetRepr::Array { values, sorted } => match sorted {
                Some(sorted) => sorted.binary_search(&nid).is_ok(),
                None => values.contains(&nid),
            },
            SetRepr::Bitmap(bitmap) => bitmap.contains(nid as u32),
        }
    }

    fn for_each<F: FnMut(Nid)>(&self, f: F) {
        self.iter().for_each(f);
    }

    fn as_slice(&self) -> Cow<'_, [Nid]> {
        match self.backing() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.iter().collect()),
        }
    }
}

/// Iterator over a set's elements. Restartable: call [`IntIdSet::iter`]
/// again, the source is immutable.
pub struct Iter<'a> {
    inner: IterRepr<'a>,
}

enum IterRepr<'a> {
    Slice(std::slice::Iter<'a, Nid>),
    Bitmap(roaring::bitmap::Iter<'a>),
}

impl Iterator for Iter<'_> {
    type Item = Nid;

    fn next(&mut self) -> Option<Nid> {
        match &mut self.inner {
            IterRepr::Slice(values) => values.next().copied(),
            IterRepr::Bitmap(values) => values.next().map(|raw| raw as Nid),
        }
    }
}

/// Cardinality plus element multiset, independent of representation and
/// iteration order.
impl PartialEq for IntIdSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|nid| other.contains(nid))
    }
}

impl Eq for IntIdSet {}

/// Hashes the element sum so equal sets hash alike across representations
/// and orderings.
impl Hash for IntIdSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut sum = 0i64;
        self.for_each(|nid| sum = sum.wrapping_add(nid as i64));
        self.len().hash(state);
        sum.hash(state);
    }
}

impl fmt::Display for IntIdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bounded(f, self.iter(), self.len())
    }
}

impl Serialize for IntIdSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for nid in self.iter() {
            seq.serialize_element(&nid)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for IntIdSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<Nid>::deserialize(deserializer)?;
        IntIdSet::of(&values).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<&IntIdList> for IntIdSet {
    type Error = IdCollectionError;

    fn try_from(list: &IntIdList) -> Result<Self> {
        IntIdSet::of(&list.to_vec())
    }
}
