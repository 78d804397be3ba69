//! Immutability contract
//!
//! Every mutating operation on every collection type fails with the
//! dedicated unsupported-mutation error and leaves observable state
//! (length, membership, iteration results) unchanged.

use ids::{IdCollection, IdCollectionError, IntIdList, IntIdSet, PublicId, PublicIdList, PublicIdSet};
use uuid::Uuid;

fn assert_unsupported(result: Result<(), IdCollectionError>, operation: &str) {
    match result {
        Err(IdCollectionError::UnsupportedMutation { operation: op }) => {
            assert_eq!(op, operation);
        }
        other => panic!("expected UnsupportedMutation for {operation}, got {other:?}"),
    }
}

#[test]
fn int_id_set_mutators() {
    let set = IntIdSet::of(&[1, 2, 3]).unwrap();
    let before = {
        let mut values = set.to_vec();
        values.sort_unstable();
        values
    };

    assert_unsupported(set.add(9), "add");
    assert_unsupported(set.remove(1), "remove");
    assert_unsupported(set.clear(), "clear");

    let mut after = set.to_vec();
    after.sort_unstable();
    assert_eq!(before, after);
    assert_eq!(set.len(), 3);
    assert!(set.contains(2));
}

#[test]
fn int_id_list_mutators() {
    let list = IntIdList::of(&[1, 2, 2]);

    assert_unsupported(list.add(9), "add");
    assert_unsupported(list.set_at(0, 9), "set_at");
    assert_unsupported(list.insert_at(1, 9), "insert_at");
    assert_unsupported(list.remove(2), "remove");
    assert_unsupported(list.clear(), "clear");
    assert_unsupported(list.sort(), "sort");

    assert_eq!(list.to_vec(), vec![1, 2, 2]);
}

#[test]
fn public_id_list_mutators() {
    let ids: Vec<PublicId> = (0..4u128)
        .map(|n| PublicId::from_uuid(Uuid::from_u128(n)))
        .collect();
    let list = PublicIdList::of(&ids);
    let probe = PublicId::from_uuid(Uuid::from_u128(99));

    assert_unsupported(list.add(&probe), "add");
    assert_unsupported(list.set_at(0, &probe), "set_at");
    assert_unsupported(list.insert_at(0, &probe), "insert_at");
    assert_unsupported(list.remove(&probe), "remove");
    assert_unsupported(list.clear(), "clear");
    assert_unsupported(list.sort(), "sort");

    assert_eq!(list.to_vec(), ids);
}

#[test]
fn public_id_set_mutators() {
    let ids: Vec<PublicId> = (0..8u128)
        .map(|n| PublicId::from_uuid(Uuid::from_u128(n)))
        .collect();
    let set = PublicIdSet::of(&ids).unwrap();
    let probe = PublicId::from_uuid(Uuid::from_u128(99));

    assert_unsupported(set.add(&probe), "add");
    assert_unsupported(set.remove(&probe), "remove");
    assert_unsupported(set.clear(), "clear");

    assert_eq!(set.len(), 8);
    for id in &ids {
        assert!(set.contains(id));
    }
}

#[test]
fn views_are_immutable_too() {
    let ids: Vec<PublicId> = (0..6u128)
        .map(|n| PublicId::from_uuid(Uuid::from_u128(n)))
        .collect();
    let view = PublicIdList::of(&ids).sub_list(1..5).unwrap();
    let probe = PublicId::from_uuid(Uuid::from_u128(99));

    assert_unsupported(view.add(&probe), "add");
    assert_unsupported(view.clear(), "clear");
    assert_eq!(view.len(), 4);
}
