//! Merge-aware identity contract
//!
//! An identity equals anything sharing at least one of its 128-bit values.
//! These tests pin the cross-representation behavior and the set/list
//! construction consequences.

use ids::{IdCollectionError, PublicId, PublicIdList, PublicIdSet};
use uuid::Uuid;

const ISSUED: &str = "123e4567-e89b-12d3-a456-426614174000";

fn uuid(text: &str) -> Uuid {
    Uuid::parse_str(text).expect("valid uuid literal")
}

#[test]
fn merged_identity_equals_original() {
    let original = PublicId::from_uuid(uuid(ISSUED));
    let merged = PublicId::from_pair(uuid(ISSUED), Uuid::from_u128(77));

    assert_eq!(original, merged);
    assert_eq!(merged, original);

    let unrelated = PublicId::from_uuid(Uuid::from_u128(3));
    assert_ne!(original, unrelated);
    assert_ne!(merged, unrelated);
}

#[test]
fn equality_across_all_arities() {
    let shared = Uuid::from_u128(500);
    let one = PublicId::from_uuid(shared);
    let two = PublicId::from_pair(Uuid::from_u128(501), shared);
    let many = PublicId::new(vec![
        Uuid::from_u128(502),
        Uuid::from_u128(503),
        shared,
        Uuid::from_u128(504),
    ])
    .unwrap();

    assert_eq!(one, two);
    assert_eq!(one, many);
    assert_eq!(two, many);
}

#[test]
fn set_rejects_merge_duplicate_list_preserves_it() {
    let original = PublicId::from_uuid(uuid(ISSUED));
    let merged = PublicId::from_pair(uuid(ISSUED), Uuid::from_u128(77));

    let err = PublicIdSet::of(&[original.clone(), merged.clone()]).unwrap_err();
    assert!(matches!(err, IdCollectionError::DuplicateElement { .. }));

    let list = PublicIdList::of(&[original.clone(), merged.clone()]);
    assert_eq!(list.len(), 2);
    assert_eq!(list.get(0).unwrap(), &original);
    assert_eq!(list.get(1).unwrap(), &merged);
}

#[test]
fn component_traversal_matches_value_array() {
    let id = PublicId::new(vec![
        Uuid::from_u128(0x0102_0304_0506_0708_090A_0B0C_0D0E_0F10),
        Uuid::from_u128(42),
        Uuid::from_u128(7),
    ])
    .unwrap();

    assert_eq!(id.uuid_count(), 3);

    let mut halves = Vec::new();
    id.for_each_half(|high, low| halves.push((high, low)));
    let expected: Vec<(u64, u64)> = id
        .to_uuid_array()
        .into_iter()
        .map(|value| value.as_u64_pair())
        .collect();
    assert_eq!(halves, expected);
}

#[test]
fn identity_round_trips_through_value_array() {
    let id = PublicId::new(vec![
        Uuid::from_u128(1),
        Uuid::from_u128(2),
        Uuid::from_u128(3),
    ])
    .unwrap();
    let rebuilt = PublicId::new(id.to_uuid_array()).unwrap();
    assert_eq!(id, rebuilt);
    assert_eq!(rebuilt.uuid_count(), 3);
}

#[test]
fn list_and_set_membership_use_identity_semantics() {
    let original = PublicId::from_uuid(uuid(ISSUED));
    let alias_probe = PublicId::from_pair(Uuid::from_u128(9_999), uuid(ISSUED));

    let list = PublicIdList::of(&[original.clone(), PublicId::from_uuid(Uuid::from_u128(1))]);
    assert!(list.contains(&alias_probe));

    let set = PublicIdSet::of(&[original, PublicId::from_uuid(Uuid::from_u128(1))]).unwrap();
    assert!(set.contains(&alias_probe));
}
