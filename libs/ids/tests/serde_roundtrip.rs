//! Serde surface
//!
//! Collections serialize as plain element sequences and re-validate
//! construction invariants on the way back in.

use ids::{IntIdList, IntIdSet, PublicId, PublicIdList, PublicIdSet};
use uuid::Uuid;

fn id(n: u128) -> PublicId {
    PublicId::from_uuid(Uuid::from_u128(n))
}

#[test]
fn int_id_set_round_trips() {
    let set = IntIdSet::of(&[3, 1, 4, 1_000_000]).unwrap();
    let json = serde_json::to_string(&set).unwrap();
    let back: IntIdSet = serde_json::from_str(&json).unwrap();
    assert_eq!(set, back);

    // A bitmap set round-trips into an equal collection even though the
    // representation on the way back is array-tiered.
    let bitmap = IntIdSet::of_bitmap(&(0..500).collect::<Vec<_>>()).unwrap();
    let json = serde_json::to_string(&bitmap).unwrap();
    let back: IntIdSet = serde_json::from_str(&json).unwrap();
    assert_eq!(bitmap, back);
}

#[test]
fn int_id_set_rejects_duplicates_on_input() {
    assert!(serde_json::from_str::<IntIdSet>("[5, 5]").is_err());
}

#[test]
fn int_id_list_round_trips_preserving_order() {
    let list = IntIdList::of(&[5, 5, 7, -1]);
    let json = serde_json::to_string(&list).unwrap();
    assert_eq!(json, "[5,5,7,-1]");
    let back: IntIdList = serde_json::from_str(&json).unwrap();
    assert_eq!(list, back);
}

#[test]
fn public_id_round_trips_as_uuid_sequence() {
    let merged = PublicId::from_pair(Uuid::from_u128(1), Uuid::from_u128(2));
    let json = serde_json::to_string(&merged).unwrap();
    let back: PublicId = serde_json::from_str(&json).unwrap();
    assert_eq!(merged, back);
    assert_eq!(back.uuid_count(), 2);
}

#[test]
fn public_id_rejects_empty_sequence() {
    assert!(serde_json::from_str::<PublicId>("[]").is_err());
}

#[test]
fn public_id_collections_round_trip() {
    let values: Vec<PublicId> = (0..5u128).map(id).collect();

    let list = PublicIdList::of(&values);
    let json = serde_json::to_string(&list).unwrap();
    let back: PublicIdList = serde_json::from_str(&json).unwrap();
    assert_eq!(list, back);

    let set = PublicIdSet::of(&values).unwrap();
    let json = serde_json::to_string(&set).unwrap();
    let back: PublicIdSet = serde_json::from_str(&json).unwrap();
    assert_eq!(set, back);
}

#[test]
fn public_id_set_rejects_identity_duplicate_on_input() {
    let original = id(1);
    let merged = PublicId::from_pair(Uuid::from_u128(1), Uuid::from_u128(2));
    let json = serde_json::to_string(&vec![original, merged]).unwrap();
    assert!(serde_json::from_str::<PublicIdSet>(&json).is_err());
}
