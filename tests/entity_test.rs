//! Integration tests for entity records.

mod common;

use common::{record, TestHarness, TABLE};
use dyna_core::key::{encode_self_key, PARTITION_KEY_NAME, SORT_KEY_NAME};
use dyna_core::Error;
use serde_json::json;

#[test]
fn put_get_round_trip() {
    for (name, h) in TestHarness::all() {
        let user = h.dyna.entity("user").unwrap();
        let kamata = record(json!({
            "user_id": "user1",
            "name": "kamata",
            "age": 38,
            "tags": ["a", "b"],
            "address": {"city": "Tokyo"},
            "active": true,
            "nickname": null
        }));
        user.put(&kamata).unwrap();
        assert_eq!(user.get("user1").unwrap(), Some(kamata), "{name}");
    }
}

#[test]
fn identifier_not_duplicated_in_storage() {
    for (name, h) in TestHarness::all() {
        let group = h.dyna.entity("group").unwrap();
        group.put(&record(json!({"group_id": "g1", "name": "G"}))).unwrap();

        let raw = h
            .backend
            .get_item(TABLE, &encode_self_key("group", "g1"))
            .unwrap()
            .unwrap();
        assert_eq!(
            raw,
            record(json!({
                PARTITION_KEY_NAME: "group#g1",
                SORT_KEY_NAME: "__self",
                "name": "G"
            })),
            "{name}"
        );
    }
}

#[test]
fn get_absent() {
    for (name, h) in TestHarness::all() {
        let user = h.dyna.entity("user").unwrap();
        assert!(user.get("never-written").unwrap().is_none(), "{name}");
    }
}

#[test]
fn delete_then_get_absent() {
    for (name, h) in TestHarness::all() {
        let user = h.dyna.entity("user").unwrap();
        user.put(&record(json!({"user_id": "user6", "name": "kamata6", "age": 43})))
            .unwrap();
        user.del("user6").unwrap();
        assert!(user.get("user6").unwrap().is_none(), "{name}");
        // deleting again is a no-op
        user.del("user6").unwrap();
    }
}

#[test]
fn put_replaces_previous_record() {
    for (name, h) in TestHarness::all() {
        let user = h.dyna.entity("user").unwrap();
        user.put(&record(json!({"user_id": "u1", "name": "A", "age": 1})))
            .unwrap();
        user.put(&record(json!({"user_id": "u1", "email": "a@example.com"})))
            .unwrap();
        assert_eq!(
            user.get("u1").unwrap(),
            Some(record(json!({"user_id": "u1", "email": "a@example.com"}))),
            "{name}"
        );
    }
}

#[test]
fn same_id_in_different_entities_is_separate() {
    for (name, h) in TestHarness::all() {
        let user = h.dyna.entity("user").unwrap();
        let group = h.dyna.entity("group").unwrap();
        user.put(&record(json!({"user_id": "x", "kind": "user"}))).unwrap();
        group.put(&record(json!({"group_id": "x", "kind": "group"}))).unwrap();

        assert_eq!(user.get("x").unwrap().unwrap()["kind"], "user", "{name}");
        assert_eq!(group.get("x").unwrap().unwrap()["kind"], "group", "{name}");
        user.del("x").unwrap();
        assert!(group.get("x").unwrap().is_some(), "{name}");
    }
}

#[test]
fn accessor_rejection() {
    let h = TestHarness::sqlite();
    assert!(matches!(h.dyna.entity(""), Err(Error::InvalidArgument(_))));
    assert!(matches!(
        h.dyna.entity("widget"),
        Err(Error::UnknownEntity(name)) if name == "widget"
    ));

    // nothing was written
    let count = dyna_db::queries::items::count_items(&h.conn(), TABLE).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn record_without_identifier_rejected() {
    for (name, h) in TestHarness::all() {
        let user = h.dyna.entity("user").unwrap();
        let err = user.put(&record(json!({"name": "nobody"}))).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "{name}");
    }
}
