//! `Scrubbable` implementations for map containers and their keys.
//!
//! Maps convert to [`Value::Mapping`] in iteration order. `HashMap` iteration
//! order is arbitrary; callers must not depend on entry order beyond the
//! correctness of the key/value pairs.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use super::{ScrubKey, Scrubbable};
use crate::scrub::value::{MapKey, Value};

// =============================================================================
// Map implementations
// =============================================================================

fn mapping_of<'a, K, V, I>(entries: I) -> Value
where
    K: ScrubKey + 'a,
    V: Scrubbable + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    Value::Mapping(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_map_key(), value.to_scrub_value()))
            .collect(),
    )
}

impl<K: ScrubKey, V: Scrubbable, S> Scrubbable for HashMap<K, V, S> {
    fn to_scrub_value(&self) -> Value {
        mapping_of(self)
    }
}

impl<K: ScrubKey, V: Scrubbable> Scrubbable for BTreeMap<K, V> {
    fn to_scrub_value(&self) -> Value {
        mapping_of(self)
    }
}

// =============================================================================
// Key implementations
// =============================================================================

macro_rules! impl_scrub_key {
    ($ty:ty, |$key:ident| $body:expr) => {
        impl ScrubKey for $ty {
            fn to_map_key(&self) -> MapKey {
                let $key = self;
                $body
            }
        }
    };
}

// String-representable keys: these participate in field-name matching.
impl_scrub_key!(str, |k| MapKey::Str(k.to_owned()));
impl_scrub_key!(String, |k| MapKey::Str(k.clone()));
impl_scrub_key!(Cow<'_, str>, |k| MapKey::Str(k.as_ref().to_owned()));
impl_scrub_key!(char, |k| MapKey::Str(k.to_string()));

// Non-string keys: never matched, values still walked.
impl_scrub_key!(i8, |k| MapKey::Int(i64::from(*k)));
impl_scrub_key!(i16, |k| MapKey::Int(i64::from(*k)));
impl_scrub_key!(i32, |k| MapKey::Int(i64::from(*k)));
impl_scrub_key!(i64, |k| MapKey::Int(*k));
impl_scrub_key!(isize, |k| MapKey::Int(*k as i64));
impl_scrub_key!(u8, |k| MapKey::UInt(u64::from(*k)));
impl_scrub_key!(u16, |k| MapKey::UInt(u64::from(*k)));
impl_scrub_key!(u32, |k| MapKey::UInt(u64::from(*k)));
impl_scrub_key!(u64, |k| MapKey::UInt(*k));
impl_scrub_key!(usize, |k| MapKey::UInt(*k as u64));
impl_scrub_key!(bool, |k| MapKey::Bool(*k));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_keys_are_matchable() {
        assert_eq!("password".to_map_key().as_name(), Some("password"));
        assert_eq!(String::from("k").to_map_key(), MapKey::Str("k".into()));
    }

    #[test]
    fn numeric_keys_keep_their_identity() {
        assert_eq!(1_i32.to_map_key(), MapKey::Int(1));
        assert_eq!(1_u64.to_map_key(), MapKey::UInt(1));
        assert_eq!(1_i32.to_map_key().as_name(), None);
    }

    #[test]
    fn btreemap_converts_in_key_order() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), 2_i64);
        map.insert("a".to_string(), 1_i64);
        assert_eq!(
            map.to_scrub_value(),
            Value::Mapping(vec![
                (MapKey::Str("a".into()), Value::scalar(1_i64)),
                (MapKey::Str("b".into()), Value::scalar(2_i64)),
            ])
        );
    }

    #[test]
    fn nested_map_with_integer_keys() {
        let mut inner = BTreeMap::new();
        inner.insert("key".to_string(), true);
        let mut outer = BTreeMap::new();
        outer.insert(1_i64, inner);
        assert_eq!(
            outer.to_scrub_value(),
            Value::Mapping(vec![(
                MapKey::Int(1),
                Value::Mapping(vec![(MapKey::Str("key".into()), Value::scalar(true))]),
            )])
        );
    }
}
