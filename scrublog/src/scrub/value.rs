//! The closed variant tree over which scrubbing is defined.
//!
//! Arbitrary caller types are converted into [`Value`] before the scrubber
//! runs (see [`crate::Scrubbable`]). Keeping the tree closed means the
//! traversal is total: every node is one of five shapes, and the engine never
//! has to reason about live caller types.
//!
//! - [`Scalar`]: terminal values (numbers, strings, booleans).
//! - [`Value::Optional`]: a nilable slot, empty or wrapping one inner value.
//! - [`Value::Record`]: an ordered list of named members ([`Field`]), each
//!   carrying the serialization metadata the encoder would use.
//! - [`Value::Sequence`]: an ordered list of values.
//! - [`Value::Mapping`]: a list of key/value pairs; keys may or may not be
//!   string-representable ([`MapKey`]).

use std::fmt;

// =============================================================================
// Scalar - terminal values
// =============================================================================

/// A terminal value with no internal structure to traverse.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

// =============================================================================
// MapKey - mapping keys
// =============================================================================

/// A mapping key.
///
/// Scrubbing matches keys against the configured field-name set, which only
/// makes sense for keys that have a string representation. Non-string keys
/// ([`MapKey::Int`], [`MapKey::UInt`], [`MapKey::Bool`]) are never matched;
/// their values are still walked.
#[derive(Clone, Debug, PartialEq)]
pub enum MapKey {
    Str(String),
    Int(i64),
    UInt(u64),
    Bool(bool),
}

impl MapKey {
    /// Returns the key as a field name, if it is string-representable.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Str(name) => Some(name),
            Self::Int(_) | Self::UInt(_) | Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for MapKey {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for MapKey {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for MapKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for MapKey {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<bool> for MapKey {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

// =============================================================================
// Field - record members
// =============================================================================

/// A named member of a [`Value::Record`].
///
/// A field carries the metadata the encoder uses to decide how the member is
/// serialized: an optional alias that replaces the declared name on output,
/// an embedded flag for anonymous members, and a skipped flag for members
/// excluded from serialization. Embedded and skipped members never appear in
/// scrubbed output.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: String,
    alias: Option<String>,
    embedded: bool,
    skipped: bool,
    value: Value,
}

impl Field {
    /// Creates a regular member with the given declared name.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            alias: None,
            embedded: false,
            skipped: false,
            value,
        }
    }

    /// Creates a member that is excluded from serialization.
    ///
    /// Skipped members carry no value: their contents are never converted,
    /// never walked, and never emitted.
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            embedded: false,
            skipped: true,
            value: Value::none(),
        }
    }

    /// Sets the serialization alias used in place of the declared name.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Marks the member as anonymous/embedded.
    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// The declared member name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The serialization alias, if one is set.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The name the encoder emits: the alias if present, the declared name
    /// otherwise. This is also the name scrubbing matches against.
    #[must_use]
    pub fn output_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    /// The member's nested value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

// =============================================================================
// Value - the variant tree
// =============================================================================

/// A node in the scrubbing tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A terminal value, returned unchanged by scrubbing.
    Scalar(Scalar),
    /// A nilable slot: empty, or wrapping exactly one inner value.
    Optional(Option<Box<Value>>),
    /// An ordered list of named members. Always emitted as a [`Value::Mapping`]
    /// by the scrubber, so matched names line up with encoder output.
    Record(Vec<Field>),
    /// An ordered list of values. Never matched by name.
    Sequence(Vec<Value>),
    /// Key/value pairs. Entry order is preserved as given, though callers
    /// converting from unordered containers provide no particular order.
    Mapping(Vec<(MapKey, Value)>),
}

impl Value {
    /// Wraps a scalar.
    pub fn scalar(value: impl Into<Scalar>) -> Self {
        Self::Scalar(value.into())
    }

    /// An empty optional slot.
    #[must_use]
    pub fn none() -> Self {
        Self::Optional(None)
    }

    /// An occupied optional slot.
    #[must_use]
    pub fn some(inner: Value) -> Self {
        Self::Optional(Some(Box::new(inner)))
    }
}

// =============================================================================
// Tests
// =============================================================================
