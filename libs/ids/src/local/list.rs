//! Order-preserving nid list with size-specialized representations
//!
//! Same arity tiering as the set (zero, one, and two elements are stored
//! inline; more go into a boxed slice) but positional: index access is
//! meaningful, duplicates and repeats are permitted, and equality is
//! element-wise at every index.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::display::fmt_bounded;
use crate::error::{IdCollectionError, Result};
use crate::local::{IdCollection, IntIdSet, Nid};

/// Immutable list of local identifiers.
#[derive(Debug, Clone)]
pub struct IntIdList {
    repr: ListRepr,
}

#[derive(Debug, Clone)]
enum ListRepr {
    Empty,
    One(Nid),
    Two([Nid; 2]),
    Array(Box<[Nid]>),
}

impl IntIdList {
    /// Shared empty list; allocates nothing.
    pub const EMPTY: IntIdList = IntIdList {
        repr: ListRepr::Empty,
    };

    /// Build a list from `values` in order. Duplicates are preserved, so
    /// construction never fails.
    pub fn of(values: &[Nid]) -> Self {
        let repr = match values.len() {
            0 => ListRepr::Empty,
            1 => ListRepr::One(values[0]),
            2 => ListRepr::Two([values[0], values[1]]),
            _ => ListRepr::Array(values.to_vec().into_boxed_slice()),
        };
        Self { repr }
    }

    fn backing(&self) -> &[Nid] {
        match &self.repr {
            ListRepr::Empty => &[],
            ListRepr::One(value) => std::slice::from_ref(value),
            ListRepr::Two(values) => values,
            ListRepr::Array(values) => values,
        }
    }

    /// Element at `index`, or a bounds error carrying the offending index
    /// and the list's length.
    pub fn get(&self, index: usize) -> Result<Nid> {
        let backing = self.backing();
        backing
            .get(index)
            .copied()
            .ok_or(IdCollectionError::IndexOutOfBounds {
                index,
                len: backing.len(),
            })
    }

    pub fn first(&self) -> Option<Nid> {
        self.backing().first().copied()
    }

    pub fn last(&self) -> Option<Nid> {
        self.backing().last().copied()
    }

    /// Lazy, restartable traversal in stored order.
    pub fn iter(&self) -> impl Iterator<Item = Nid> + '_ {
        self.backing().iter().copied()
    }

    // Mutators exist for capability-surface compatibility only; every call
    // fails with the dedicated immutability error.

    pub fn add(&self, _nid: Nid) -> Result<()> {
        Err(IdCollectionError::unsupported("add"))
    }

    pub fn set_at(&self, _index: usize, _nid: Nid) -> Result<()> {
        Err(IdCollectionError::unsupported("set_at"))
    }

    pub fn insert_at(&self, _index: usize, _nid: Nid) -> Result<()> {
        Err(IdCollectionError::unsupported("insert_at"))
    }

    pub fn remove(&self, _nid: Nid) -> Result<()> {
        Err(IdCollectionError::unsupported("remove"))
    }

    pub fn clear(&self) -> Result<()> {
        Err(IdCollectionError::unsupported("clear"))
    }

    pub fn sort(&self) -> Result<()> {
        Err(IdCollectionError::unsupported("sort"))
    }
}

impl IdCollection for IntIdList {
    fn len(&self) -> usize {
        self.backing().len()
    }

    fn contains(&self, nid: Nid) -> bool {
        self.backing().contains(&nid)
    }

    fn for_each<F: FnMut(Nid)>(&self, f: F) {
        self.iter().for_each(f);
    }

    fn as_slice(&self) -> Cow<'_, [Nid]> {
        Cow::Borrowed(self.backing())
    }
}

/// Length plus identical elements at every index.
impl PartialEq for IntIdList {
    fn eq(&self, other: &Self) -> bool {
        self.backing() == other.backing()
    }
}

impl Eq for IntIdList {}

impl Hash for IntIdList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.backing().hash(state);
    }
}

impl fmt::Display for IntIdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bounded(f, self.iter(), self.len())
    }
}

impl FromIterator<Nid> for IntIdList {
    fn from_iter<I: IntoIterator<Item = Nid>>(values: I) -> Self {
        let collected: Vec<Nid> = values.into_iter().collect();
        Self::of(&collected)
    }
}

/// Set elements in the set's iteration order; order is then fixed in the
/// resulting list.
impl From<&IntIdSet> for IntIdList {
    fn from(set: &IntIdSet) -> Self {
        set.iter().collect()
    }
}

impl Serialize for IntIdList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for nid in self.iter() {
            seq.serialize_element(&nid)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for IntIdList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<Nid>::deserialize(deserializer)?;
        Ok(IntIdList::of(&values))
    }
}
