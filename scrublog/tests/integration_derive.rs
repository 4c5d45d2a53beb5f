//! End-to-end tests for the `Scrubbable` derive macro.
//!
//! These tests exercise the integration of:
//! - derive-generated record conversion for structs and enums,
//! - `#[scrub(rename/skip/embedded)]` attribute handling, and
//! - scrubbing of the resulting trees.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use scrublog::{
    FieldSet, MapKey, SCRUBBED_PLACEHOLDER, Scrubbable, Scrubber, Value,
};

fn marker() -> Value {
    Value::scalar(SCRUBBED_PLACEHOLDER)
}

#[test]
fn named_struct_converts_to_a_record() {
    #[derive(Scrubbable)]
    struct Login {
        username: String,
        password: String,
    }

    let login = Login {
        username: "bob".into(),
        password: "hunter2".into(),
    };

    let scrubbed = Scrubber::new(FieldSet::new(["password"])).scrub(&login.to_scrub_value());

    assert_eq!(
        scrubbed,
        Value::Mapping(vec![
            ("username".into(), Value::scalar("bob")),
            ("password".into(), marker()),
        ])
    );
    // Conversion borrows; the original is untouched.
    assert_eq!(login.password, "hunter2");
}

#[test]
fn renamed_field_matches_by_its_alias_only() {
    #[derive(Scrubbable)]
    struct Credentials {
        #[scrub(rename = "pwd")]
        password: String,
    }

    let credentials = Credentials {
        password: "x".into(),
    };
    let tree = credentials.to_scrub_value();

    // The alias is what the encoder emits, so only it participates.
    let by_alias = Scrubber::new(FieldSet::new(["pwd"])).scrub(&tree);
    assert_eq!(by_alias, Value::Mapping(vec![("pwd".into(), marker())]));

    let by_declared_name = Scrubber::new(FieldSet::new(["password"])).scrub(&tree);
    assert_eq!(
        by_declared_name,
        Value::Mapping(vec![("pwd".into(), Value::scalar("x"))])
    );
}

#[test]
fn skipped_fields_need_no_scrubbable_impl_and_never_appear() {
    struct Opaque;

    #[derive(Scrubbable)]
    struct Request {
        id: u64,
        #[scrub(skip)]
        raw: Opaque,
    }

    let request = Request {
        id: 7,
        raw: Opaque,
    };

    let scrubbed = Scrubber::new(FieldSet::empty()).scrub(&request.to_scrub_value());
    assert_eq!(
        scrubbed,
        Value::Mapping(vec![("id".into(), Value::scalar(7_u64))])
    );
}

#[test]
fn embedded_members_are_omitted_from_output() {
    #[derive(Scrubbable)]
    struct Base {
        kind: String,
    }

    #[derive(Scrubbable)]
    struct Event {
        #[scrub(embedded)]
        base: Base,
        name: String,
    }

    let event = Event {
        base: Base {
            kind: "audit".into(),
        },
        name: "login".into(),
    };

    let scrubbed = Scrubber::new(FieldSet::empty()).scrub(&event.to_scrub_value());
    assert_eq!(
        scrubbed,
        Value::Mapping(vec![("name".into(), Value::scalar("login"))])
    );
}

#[test]
fn nested_structs_are_walked() {
    #[derive(Scrubbable)]
    struct Address {
        street: String,
        city: String,
    }

    #[derive(Scrubbable)]
    struct Person {
        name: String,
        address: Address,
    }

    let person = Person {
        name: "bob".into(),
        address: Address {
            street: "123 Main Street".into(),
            city: "Springfield".into(),
        },
    };

    let scrubbed = Scrubber::new(FieldSet::new(["street"])).scrub(&person.to_scrub_value());

    assert_eq!(
        scrubbed,
        Value::Mapping(vec![
            ("name".into(), Value::scalar("bob")),
            (
                "address".into(),
                Value::Mapping(vec![
                    ("street".into(), marker()),
                    ("city".into(), Value::scalar("Springfield")),
                ]),
            ),
        ])
    );
}

#[test]
fn container_fields_convert_through_the_standard_impls() {
    #[derive(Scrubbable)]
    struct Batch {
        ids: Vec<u32>,
        attributes: BTreeMap<String, String>,
        note: Option<String>,
    }

    let batch = Batch {
        ids: vec![1, 2],
        attributes: BTreeMap::from([("password".to_string(), "x".to_string())]),
        note: None,
    };

    let scrubbed = Scrubber::new(FieldSet::new(["password"])).scrub(&batch.to_scrub_value());

    assert_eq!(
        scrubbed,
        Value::Mapping(vec![
            (
                "ids".into(),
                Value::Sequence(vec![Value::scalar(1_u64), Value::scalar(2_u64)]),
            ),
            (
                "attributes".into(),
                Value::Mapping(vec![("password".into(), marker())]),
            ),
            ("note".into(), Value::none()),
        ])
    );
}

#[test]
fn newtype_struct_forwards_to_its_inner_value() {
    #[derive(Scrubbable)]
    struct UserId(u64);

    assert_eq!(UserId(9).to_scrub_value(), Value::scalar(9_u64));
}

#[test]
fn tuple_struct_converts_to_a_sequence() {
    #[derive(Scrubbable)]
    struct Pair(String, bool);

    assert_eq!(
        Pair("a".into(), true).to_scrub_value(),
        Value::Sequence(vec![Value::scalar("a"), Value::scalar(true)])
    );
}

#[test]
fn unit_struct_converts_to_an_empty_optional() {
    #[derive(Scrubbable)]
    struct Heartbeat;

    assert_eq!(Heartbeat.to_scrub_value(), Value::none());
}

#[test]
fn enums_use_external_tagging() {
    #[derive(Scrubbable)]
    enum Credential {
        Anonymous,
        ApiKey(String),
        Password { value: String, hint: String },
    }

    assert_eq!(
        Credential::Anonymous.to_scrub_value(),
        Value::scalar("Anonymous")
    );

    assert_eq!(
        Credential::ApiKey("sk_live".into()).to_scrub_value(),
        Value::Mapping(vec![(
            MapKey::from("ApiKey"),
            Value::scalar("sk_live"),
        )])
    );

    let password = Credential::Password {
        value: "x".into(),
        hint: "pet name".into(),
    };
    let scrubbed = Scrubber::new(FieldSet::new(["value"])).scrub(&password.to_scrub_value());
    assert_eq!(
        scrubbed,
        Value::Mapping(vec![(
            MapKey::from("Password"),
            Value::Mapping(vec![
                ("value".into(), marker()),
                ("hint".into(), Value::scalar("pet name")),
            ]),
        )])
    );
}

#[test]
fn variant_tags_participate_in_scrubbing() {
    #[derive(Scrubbable)]
    enum Secret {
        #[scrub(rename = "token")]
        Bearer(String),
    }

    let scrubbed = Scrubber::new(FieldSet::new(["token"]))
        .scrub(&Secret::Bearer("abc".into()).to_scrub_value());

    assert_eq!(
        scrubbed,
        Value::Mapping(vec![(MapKey::from("token"), marker())])
    );
}

#[test]
fn generic_parameters_get_scrubbable_bounds_only_when_walked() {
    #[derive(Scrubbable)]
    struct Tagged<T> {
        value: T,
        // T is not required to be Scrubbable through the marker.
        _phantom: PhantomData<T>,
    }

    #[derive(Scrubbable)]
    struct WithMarkerOnly<T> {
        id: String,
        #[scrub(skip)]
        handle: T,
    }

    let tagged = Tagged {
        value: 1_i32,
        _phantom: PhantomData,
    };
    assert_eq!(
        tagged.to_scrub_value(),
        Value::Record(vec![
            scrublog::Field::new("value", Value::scalar(1_i64)),
            scrublog::Field::new("_phantom", Value::none()),
        ])
    );

    struct NotScrubbable;
    let wrapped = WithMarkerOnly {
        id: "a".into(),
        handle: NotScrubbable,
    };
    let scrubbed = Scrubber::new(FieldSet::empty()).scrub(&wrapped.to_scrub_value());
    assert_eq!(
        scrubbed,
        Value::Mapping(vec![("id".into(), Value::scalar("a"))])
    );
}
