//! End-to-end tests for scrubbing dynamic `serde_json::Value` payloads.

use scrublog::{FieldSet, Scrubbable, Scrubber};
use serde_json::json;

fn scrub_json(payload: &serde_json::Value, names: &[&str]) -> serde_json::Value {
    Scrubber::new(FieldSet::new(names.iter().copied()))
        .scrub(&payload.to_scrub_value())
        .to_json()
}

#[test]
fn object_keys_are_scrubbed_by_name() {
    let payload = json!({
        "username": "bob",
        "password": "hunter2",
    });

    assert_eq!(
        scrub_json(&payload, &["password"]),
        json!({
            "username": "bob",
            "password": "***scrubbed***",
        })
    );
}

#[test]
fn nested_objects_and_arrays_are_walked() {
    let payload = json!({
        "password": "shouldbescrubbed",
        "username": "name",
        "mapOfFields": {
            "key": "value",
            "password": "shouldbescrubbed",
        },
        "list": [
            { "Password": "shouldbescrubbed", "Uname": "namenotbescrubbed" },
            { "1": { "key": true, "password": false } },
        ],
    });

    assert_eq!(
        scrub_json(&payload, &["password"]),
        json!({
            "password": "***scrubbed***",
            "username": "name",
            "mapOfFields": {
                "key": "value",
                "password": "***scrubbed***",
            },
            "list": [
                { "Password": "***scrubbed***", "Uname": "namenotbescrubbed" },
                { "1": { "key": true, "password": "***scrubbed***" } },
            ],
        })
    );
}

#[test]
fn null_stays_null() {
    let payload = json!({ "maybe": null });
    assert_eq!(scrub_json(&payload, &["password"]), payload);
}

#[test]
fn scalars_and_numbers_round_trip_unchanged() {
    let payload = json!({
        "int": -1,
        "big": u64::MAX,
        "float": 2.5,
        "flag": false,
        "text": "plain",
    });
    assert_eq!(scrub_json(&payload, &[]), payload);
}

#[test]
fn matched_subtree_is_replaced_wholesale() {
    let payload = json!({
        "credentials": {
            "user": "bob",
            "password": "x",
            "keys": ["a", "b"],
        },
    });

    assert_eq!(
        scrub_json(&payload, &["credentials"]),
        json!({ "credentials": "***scrubbed***" })
    );
}

#[test]
fn mixed_value_payload_in_fields() {
    use scrublog::fields;

    let dynamic = json!({ "token": "abc", "attempt": 1 });
    let payload = fields! {
        "request" => dynamic,
        "retries" => 2_u32,
    };

    let scrubbed = Scrubber::new(FieldSet::new(["token"])).scrub(&payload.into_value());
    assert_eq!(
        scrubbed.to_json(),
        json!({
            "request": { "token": "***scrubbed***", "attempt": 1 },
            "retries": 2,
        })
    );
}

#[test]
fn idempotence_holds_for_json_payloads() {
    let payload = json!({
        "password": { "nested": "structure" },
        "list": [ { "token": 1 } ],
    });
    let engine = Scrubber::new(FieldSet::new(["password", "token"]));

    let once = engine.scrub(&payload.to_scrub_value());
    let twice = engine.scrub(&once);

    assert_eq!(once, twice);
    assert_eq!(
        once.to_json(),
        json!({
            "password": "***scrubbed***",
            "list": [ { "token": "***scrubbed***" } ],
        })
    );
}
