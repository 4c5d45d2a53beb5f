//! The free-form payload attached to a log record.
//!
//! [`Fields`] is an ordered list of named values, the `context` of a log
//! record. Values are converted into the scrubbing tree at insertion time via
//! [`Scrubbable`], so the payload owns its data and the caller's originals
//! are never touched afterwards.

use super::convert::Scrubbable;
use super::value::Value;

/// An ordered collection of named log payload values.
///
/// ```
/// use scrublog::{Fields, fields};
///
/// let payload = Fields::new()
///     .with("user", &"bob")
///     .with("attempt", &2_u32);
///
/// // Equivalent, via the macro:
/// let payload = fields! { "user" => "bob", "attempt" => 2_u32 };
/// assert_eq!(payload.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    /// An empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a named value.
    pub fn insert<T: Scrubbable + ?Sized>(&mut self, key: impl Into<String>, value: &T) {
        self.0.push((key.into(), value.to_scrub_value()));
    }

    /// Appends a named value, builder-style.
    #[must_use]
    pub fn with<T: Scrubbable + ?Sized>(mut self, key: impl Into<String>, value: &T) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the payload entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Converts the payload into a mapping node for scrubbing.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Mapping(
            self.0
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        fields.into_value()
    }
}

/// Builds a [`Fields`] payload from `key => value` pairs.
///
/// Values may be any [`Scrubbable`] type; they are borrowed, converted, and
/// left untouched.
#[macro_export]
macro_rules! fields {
    () => { $crate::Fields::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(fields.insert($key, &$value);)+
        fields
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrub::value::MapKey;

    #[test]
    fn insertion_order_is_preserved() {
        let fields = fields! { "b" => 2_i64, "a" => 1_i64 };
        let keys: Vec<&str> = fields.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn into_value_builds_a_mapping() {
        let fields = fields! { "user" => "bob" };
        assert_eq!(
            fields.into_value(),
            Value::Mapping(vec![(MapKey::Str("user".into()), Value::scalar("bob"))])
        );
    }

    #[test]
    fn empty_macro_invocation() {
        let fields = fields! {};
        assert!(fields.is_empty());
    }
}
