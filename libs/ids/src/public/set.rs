//! Immutable set of global identifiers with randomized iteration
//!
//! One- and two-element sets are stored inline; anything larger goes into a
//! flat open-addressing table sized to twice the element count, keeping the
//! load factor at or below 0.5 so probe chains stay short. Insertion probes
//! linearly from `hash mod capacity`; finding a slot whose occupant equals
//! the incoming element under the merge-aware identity contract is a
//! construction-time duplicate error. Membership re-probes the same scheme.
//!
//! Iteration order over the table is randomized per process run: a
//! process-wide salt picks the starting slot and the scan direction. This is
//! a correctness discipline, not a performance feature: no caller gets to
//! depend on iteration order. Tests that need a stable order construct the
//! set through [`PublicIdSet::with_salt`].

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::display::fmt_bounded;
use crate::error::{IdCollectionError, Result};
use crate::public::PublicId;
use crate::salt::process_salt;

/// Immutable, order-insignificant collection of [`PublicId`]s.
#[derive(Debug, Clone)]
pub struct PublicIdSet {
    repr: SetRepr,
}

#[derive(Debug, Clone)]
enum SetRepr {
    Empty,
    One(PublicId),
    Two([PublicId; 2]),
    Table(Table),
}

#[derive(Debug, Clone)]
struct Table {
    slots: Box<[Option<PublicId>]>,
    len: usize,
    salt: u64,
}

impl Table {
    fn build(values: &[PublicId], salt: u64) -> Result<Self> {
        // 2 x N slots: load factor <= 0.5 bounds probe length.
        let capacity = values.len() * 2;
        let mut slots: Vec<Option<PublicId>> = vec![None; capacity];
        for id in values {
            let mut slot = (id.uuid_fold() % capacity as u64) as usize;
            loop {
                match &slots[slot] {
                    None => {
                        slots[slot] = Some(id.clone());
                        break;
                    }
                    Some(existing) if existing == id => {
                        return Err(IdCollectionError::duplicate(id));
                    }
                    Some(_) => slot = (slot + 1) % capacity,
                }
            }
        }
        Ok(Self {
            slots: slots.into_boxed_slice(),
            len: values.len(),
            salt,
        })
    }

    fn probe(&self, id: &PublicId) -> bool {
        let capacity = self.slots.len();
        let mut slot = (id.uuid_fold() % capacity as u64) as usize;
        loop {
            match &self.slots[slot] {
                None => return false,
                Some(existing) if existing == id => return true,
                Some(_) => slot = (slot + 1) % capacity,
            }
        }
    }
}

impl PublicIdSet {
    /// Shared empty set; allocates nothing.
    pub const EMPTY: PublicIdSet = PublicIdSet {
        repr: SetRepr::Empty,
    };

    /// Build a set from `values` using the process-wide iteration salt.
    ///
    /// Fails fast with [`IdCollectionError::DuplicateElement`] when two
    /// inputs are equal under the identity contract.
    pub fn of(values: &[PublicId]) -> Result<Self> {
        Self::with_salt(values, process_salt())
    }

    /// Build a set with an explicit iteration salt. Production code uses
    /// [`PublicIdSet::of`]; a fixed salt here makes iteration order
    /// deterministic for tests.
    pub fn with_salt(values: &[PublicId], salt: u64) -> Result<Self> {
        let repr = match values {
            [] => SetRepr::Empty,
            [only] => SetRepr::One(only.clone()),
            [first, second] => {
                if first == second {
                    return Err(IdCollectionError::duplicate(second));
                }
                SetRepr::Two([first.clone(), second.clone()])
            }
            _ => SetRepr::Table(Table::build(values, salt)?),
        };
        Ok(Self { repr })
    }

    pub fn len(&self) -> usize {
        match &self.repr {
            SetRepr::Empty => 0,
            SetRepr::One(_) => 1,
            SetRepr::Two(_) => 2,
            SetRepr::Table(table) => table.len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership under the merge-aware identity contract; the table
    /// representation re-probes the insertion scheme.
    pub fn contains(&self, id: &PublicId) -> bool {
        match &self.repr {
            SetRepr::Empty => false,
            SetRepr::One(existing) => existing == id,
            SetRepr::Two(pair) => &pair[0] == id || &pair[1] == id,
            SetRepr::Table(table) => table.probe(id),
        }
    }

    fn inline_slice(&self) -> Option<&[PublicId]> {
        match &self.repr {
            SetRepr::Empty => Some(&[]),
            SetRepr::One(id) => Some(std::slice::from_ref(id)),
            SetRepr::Two(pair) => Some(pair),
            SetRepr::Table(_) => None,
        }
    }

    /// Traversal in representation-defined order; for the table
    /// representation the order is randomized per process run.
    pub fn iter(&self) -> Iter<'_> {
        let inner = match &self.repr {
            SetRepr::Table(table) => {
                let capacity = table.slots.len();
                IterRepr::Table(TableIter {
                    slots: &table.slots,
                    start: (table.salt % capacity as u64) as usize,
                    forward: (table.salt >> 32) & 1 == 0,
                    visited: 0,
                })
            }
            _ => IterRepr::Inline(self.inline_slice().unwrap_or(&[]).iter()),
        };
        Iter { inner }
    }

    pub fn for_each<F: FnMut(&PublicId)>(&self, f: F) {
        self.iter().for_each(f);
    }

    pub fn to_vec(&self) -> Vec<PublicId> {
        self.iter().cloned().collect()
    }

    // Mutators exist for capability-surface compatibility only; every call
    // fails with the dedicated immutability error.

    pub fn add(&self, _id: &PublicId) -> Result<()> {
        Err(IdCollectionError::unsupported("add"))
    }

    pub fn remove(&self, _id: &PublicId) -> Result<()> {
        Err(IdCollectionError::unsupported("remove"))
    }

    pub fn clear(&self) -> Result<()> {
        Err(IdCollectionError::unsupported("clear"))
    }
}

/// Iterator over a set's elements in representation-defined order.
pub struct Iter<'a> {
    inner: IterRepr<'a>,
}

enum IterRepr<'a> {
    Inline(std::slice::Iter<'a, PublicId>),
    Table(TableIter<'a>),
}

struct TableIter<'a> {
    slots: &'a [Option<PublicId>],
    start: usize,
    forward: bool,
    visited: usize,
}

impl<'a> Iterator for TableIter<'a> {
    type Item = &'a PublicId;

    fn next(&mut self) -> Option<&'a PublicId> {
        let capacity = self.slots.len();
        while self.visited < capacity {
            let slot = if self.forward {
                (self.start + self.visited) % capacity
            } else {
                (self.start + capacity - self.visited) % capacity
            };
            self.visited += 1;
            if let Some(id) = &self.slots[slot] {
                return Some(id);
            }
        }
        None
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PublicId;

    fn next(&mut self) -> Option<&'a PublicId> {
        match &mut self.inner {
            IterRepr::Inline(ids) => ids.next(),
            IterRepr::Table(slots) => slots.next(),
        }
    }
}

/// Cardinality plus membership of every element, independent of
/// representation and iteration order.
impl PartialEq for PublicIdSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|id| other.contains(id))
    }
}

impl Eq for PublicIdSet {}

impl Hash for PublicIdSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut acc = 0u64;
        self.for_each(|id| acc = acc.wrapping_add(id.uuid_fold()));
        self.len().hash(state);
        acc.hash(state);
    }
}

impl fmt::Display for PublicIdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bounded(f, self.iter(), self.len())
    }
}

impl Serialize for PublicIdSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for id in self.iter() {
            seq.serialize_element(id)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for PublicIdSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<PublicId>::deserialize(deserializer)?;
        PublicIdSet::of(&values).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn id(n: u128) -> PublicId {
        PublicId::from_uuid(Uuid::from_u128(n))
    }

    fn ids(count: u128) -> Vec<PublicId> {
        (0..count).map(id).collect()
    }

    #[test]
    fn inline_pair_rejects_identity_duplicate() {
        // Merge-aware: {u1} and {u1, u2} denote the same entity.
        let original = id(1);
        let merged = PublicId::from_pair(Uuid::from_u128(1), Uuid::from_u128(2));
        let err = PublicIdSet::of(&[original, merged]).unwrap_err();
        assert!(matches!(err, IdCollectionError::DuplicateElement { .. }));
    }

    #[test]
    fn table_rejects_duplicate_in_probe_chain() {
        let mut values = ids(8);
        values.push(id(3));
        let err = PublicIdSet::of(&values).unwrap_err();
        assert!(matches!(err, IdCollectionError::DuplicateElement { .. }));
    }

    #[test]
    fn table_membership() {
        let values = ids(50);
        let set = PublicIdSet::of(&values).unwrap();
        assert_eq!(set.len(), 50);
        for value in &values {
            assert!(set.contains(value));
        }
        assert!(!set.contains(&id(999)));
    }

    #[test]
    fn fixed_salt_iteration_is_deterministic() {
        let values = ids(20);
        let first = PublicIdSet::with_salt(&values, 0x1234_5678_9ABC_DEF0).unwrap();
        let second = PublicIdSet::with_salt(&values, 0x1234_5678_9ABC_DEF0).unwrap();
        let order_a: Vec<PublicId> = first.to_vec();
        let order_b: Vec<PublicId> = second.to_vec();
        assert_eq!(order_a, order_b);
    }

    #[test]
    fn distinct_salts_permute_the_same_multiset() {
        let values = ids(20);
        let forward = PublicIdSet::with_salt(&values, 0).unwrap();
        let shifted = PublicIdSet::with_salt(&values, (1 << 32) | 7).unwrap();
        assert_eq!(forward, shifted);
        assert_eq!(forward.to_vec().len(), shifted.to_vec().len());
    }

    #[test]
    fn iteration_covers_every_element_once() {
        let values = ids(25);
        let set = PublicIdSet::with_salt(&values, 99).unwrap();
        let mut seen = Vec::new();
        set.for_each(|id| seen.push(id.clone()));
        assert_eq!(seen.len(), 25);
        for value in &values {
            assert!(seen.iter().any(|candidate| candidate == value));
        }
    }

    #[test]
    fn mutators_reject() {
        let set = PublicIdSet::of(&ids(5)).unwrap();
        let probe = id(0);
        for err in [
            set.add(&probe).unwrap_err(),
            set.remove(&probe).unwrap_err(),
            set.clear().unwrap_err(),
        ] {
            assert!(matches!(err, IdCollectionError::UnsupportedMutation { .. }));
        }
        assert_eq!(set.len(), 5);
    }
}
