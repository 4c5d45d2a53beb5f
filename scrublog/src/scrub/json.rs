//! `serde_json::Value` support for the scrubbing tree.
//!
//! This is the bridge the encoder uses: [`Value::to_json`] renders a scrubbed
//! tree into the JSON the sink serializes, and the [`Scrubbable`] impl lets
//! callers log dynamic JSON payloads directly.
//!
//! The two directions agree on shape: a JSON `null` is an empty optional
//! slot, objects are mappings with string keys, and record members are
//! rendered under their output name with embedded and skipped members
//! omitted, which are the same rules the scrubber applies when matching
//! names.

use serde_json::{Map, Number, Value as JsonValue};

use super::convert::Scrubbable;
use super::value::{Scalar, Value};

impl Scrubbable for JsonValue {
    fn to_scrub_value(&self) -> Value {
        match self {
            JsonValue::Null => Value::none(),
            JsonValue::Bool(value) => Value::Scalar(Scalar::Bool(*value)),
            JsonValue::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Value::Scalar(Scalar::Int(value))
                } else if let Some(value) = number.as_u64() {
                    Value::Scalar(Scalar::UInt(value))
                } else {
                    Value::Scalar(Scalar::Float(number.as_f64().unwrap_or_default()))
                }
            }
            JsonValue::String(value) => Value::Scalar(Scalar::Str(value.clone())),
            JsonValue::Array(items) => {
                Value::Sequence(items.iter().map(Scrubbable::to_scrub_value).collect())
            }
            JsonValue::Object(entries) => Value::Mapping(
                entries
                    .iter()
                    .map(|(key, value)| (key.as_str().into(), value.to_scrub_value()))
                    .collect(),
            ),
        }
    }
}

impl Value {
    /// Renders the tree as a `serde_json::Value`.
    ///
    /// Record members are emitted under their output name, with embedded and
    /// skipped members omitted; mapping keys are rendered as strings the way
    /// JSON object keys require. Non-finite floats become `null`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Scalar(Scalar::Bool(value)) => JsonValue::Bool(*value),
            Self::Scalar(Scalar::Int(value)) => JsonValue::Number(Number::from(*value)),
            Self::Scalar(Scalar::UInt(value)) => JsonValue::Number(Number::from(*value)),
            Self::Scalar(Scalar::Float(value)) => {
                Number::from_f64(*value).map_or(JsonValue::Null, JsonValue::Number)
            }
            Self::Scalar(Scalar::Str(value)) => JsonValue::String(value.clone()),
            Self::Optional(None) => JsonValue::Null,
            Self::Optional(Some(inner)) => inner.to_json(),
            Self::Record(fields) => {
                let mut object = Map::with_capacity(fields.len());
                for field in fields {
                    if field.is_embedded() || field.is_skipped() {
                        continue;
                    }
                    object.insert(field.output_name().to_owned(), field.value().to_json());
                }
                JsonValue::Object(object)
            }
            Self::Sequence(items) => {
                JsonValue::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Mapping(entries) => {
                let mut object = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    object.insert(key.to_string(), value.to_json());
                }
                JsonValue::Object(object)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::scrub::value::Field;

    #[test]
    fn json_round_trips_through_the_tree() {
        let payload = json!({
            "user": "bob",
            "count": 3,
            "ratio": 0.5,
            "flags": [true, false],
            "missing": null,
        });
        assert_eq!(payload.to_scrub_value().to_json(), payload);
    }

    #[test]
    fn large_unsigned_numbers_survive() {
        let payload = json!({ "id": u64::MAX });
        assert_eq!(payload.to_scrub_value().to_json(), payload);
    }

    #[test]
    fn record_renders_like_the_encoder() {
        let record = Value::Record(vec![
            Field::new("password", Value::scalar("x")).with_alias("pwd"),
            Field::new("base", Value::scalar(1_i64)).embedded(),
            Field::skipped("internal"),
            Field::new("user", Value::scalar("bob")),
        ]);
        assert_eq!(record.to_json(), json!({ "pwd": "x", "user": "bob" }));
    }

    #[test]
    fn non_string_mapping_keys_render_as_strings() {
        let mapping = Value::Mapping(vec![
            (1_i64.into(), Value::scalar(true)),
            (true.into(), Value::scalar(false)),
        ]);
        assert_eq!(mapping.to_json(), json!({ "1": true, "true": false }));
    }

    #[test]
    fn non_finite_floats_become_null() {
        let value = Value::Scalar(Scalar::Float(f64::NAN));
        assert_eq!(value.to_json(), JsonValue::Null);
    }
}
