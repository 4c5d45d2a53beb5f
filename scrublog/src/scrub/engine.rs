//! The scrubbing engine: field-name matching and tree traversal.
//!
//! [`Scrubber::scrub`] walks a [`Value`] tree and replaces the value of every
//! field or key whose name is in the configured [`FieldSet`] with the
//! [`SCRUBBED_PLACEHOLDER`] marker. The walk never mutates its input and
//! never surfaces an error to the caller: traversal faults are recovered at
//! the outermost boundary according to the configured [`FaultPolicy`].
//!
//! Matching rules:
//!
//! - Names are compared case-insensitively.
//! - A match replaces the field's entire subtree; nothing beneath a matched
//!   name is walked or partially kept.
//! - Records are emitted as mappings keyed by each member's output name, so
//!   the names matched here are exactly the names the encoder serializes.
//! - Embedded and skipped record members are omitted from the output.
//! - Mapping keys with no string representation are never matched; their
//!   values are still walked.

use std::collections::HashSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use super::value::{MapKey, Value};

/// The fixed marker substituted for a matched field's value.
pub const SCRUBBED_PLACEHOLDER: &str = "***scrubbed***";

/// Recursion ceiling for a single traversal.
///
/// Log payloads are shallow in practice; a tree deeper than this is treated
/// as malformed and recovered per the fault policy rather than risking the
/// thread's stack.
const MAX_DEPTH: usize = 128;

// =============================================================================
// FieldSet - the sensitive field names
// =============================================================================

/// An immutable, case-insensitive set of sensitive field names.
///
/// Built once at startup from an ordered sequence of names; membership checks
/// lowercase both sides. An empty set scrubs nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSet {
    names: HashSet<String>,
}

impl FieldSet {
    /// Builds a field set from the given names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.into().to_lowercase())
                .collect(),
        }
    }

    /// The empty set: scrub nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `name` matches the set, compared case-insensitively.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// =============================================================================
// FaultPolicy - what to do when traversal fails
// =============================================================================

/// How [`Scrubber::scrub`] recovers when traversal faults.
///
/// The scrub call itself is total either way; the policy only decides what
/// stands in for the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Return the pristine, unscrubbed input.
    ///
    /// This favors log availability over the scrubbing guarantee: a payload
    /// the engine cannot walk is logged as-is, sensitive fields included.
    #[default]
    FailOpen,
    /// Return a fixed-shape `{"scrub_error": <reason>}` mapping carrying
    /// none of the original payload.
    ///
    /// This favors the scrubbing guarantee over log fidelity: a payload the
    /// engine cannot walk is dropped from the record entirely.
    FailClosed,
}

// =============================================================================
// Scrubber - the engine
// =============================================================================

/// Internal traversal fault. Never surfaced to callers; converted into the
/// configured [`FaultPolicy`] outcome at the outer boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TraversalFault {
    DepthExceeded,
    Panicked,
}

impl fmt::Display for TraversalFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthExceeded => f.write_str("payload nesting exceeds the traversal depth limit"),
            Self::Panicked => f.write_str("traversal panicked"),
        }
    }
}

/// The scrubbing engine.
///
/// Stateless apart from the immutable field set and fault policy; every call
/// is independent, allocates a fresh output tree, and is safe to invoke from
/// any number of threads concurrently.
///
/// ```
/// use scrublog::{FieldSet, Scrubber, Value};
///
/// let scrubber = Scrubber::new(FieldSet::new(["password"]));
/// let payload = Value::Mapping(vec![
///     ("user".into(), Value::scalar("bob")),
///     ("password".into(), Value::scalar("hunter2")),
/// ]);
///
/// let scrubbed = scrubber.scrub(&payload);
/// assert_eq!(
///     scrubbed,
///     Value::Mapping(vec![
///         ("user".into(), Value::scalar("bob")),
///         ("password".into(), Value::scalar("***scrubbed***")),
///     ])
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scrubber {
    fields: FieldSet,
    fault_policy: FaultPolicy,
}

impl Scrubber {
    /// Creates a scrubber over the given field set, with the default
    /// fail-open fault policy.
    #[must_use]
    pub fn new(fields: FieldSet) -> Self {
        Self {
            fields,
            fault_policy: FaultPolicy::default(),
        }
    }

    /// Sets the fault policy.
    #[must_use]
    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }

    /// The configured field set.
    #[must_use]
    pub fn field_set(&self) -> &FieldSet {
        &self.fields
    }

    /// The configured fault policy.
    #[must_use]
    pub fn fault_policy(&self) -> FaultPolicy {
        self.fault_policy
    }

    /// Scrubs a value tree.
    ///
    /// Always returns a value and never mutates the input. Faults anywhere in
    /// the subtree abort the whole traversal and are recovered here, at the
    /// outermost boundary, per the configured [`FaultPolicy`].
    #[must_use]
    pub fn scrub(&self, value: &Value) -> Value {
        let walked = panic::catch_unwind(AssertUnwindSafe(|| self.walk(value, 0)))
            .unwrap_or(Err(TraversalFault::Panicked));

        match walked {
            Ok(scrubbed) => scrubbed,
            Err(fault) => self.recover(value, fault),
        }
    }

    fn recover(&self, original: &Value, fault: TraversalFault) -> Value {
        match self.fault_policy {
            FaultPolicy::FailOpen => original.clone(),
            FaultPolicy::FailClosed => Value::Mapping(vec![(
                MapKey::from("scrub_error"),
                Value::scalar(fault.to_string()),
            )]),
        }
    }

    fn walk(&self, value: &Value, depth: usize) -> Result<Value, TraversalFault> {
        if depth > MAX_DEPTH {
            return Err(TraversalFault::DepthExceeded);
        }

        match value {
            Value::Scalar(scalar) => Ok(Value::Scalar(scalar.clone())),
            Value::Optional(None) => Ok(Value::none()),
            Value::Optional(Some(inner)) => {
                Ok(Value::Optional(Some(Box::new(self.walk(inner, depth + 1)?))))
            }
            Value::Record(fields) => {
                let mut entries = Vec::with_capacity(fields.len());
                for field in fields {
                    if field.is_embedded() || field.is_skipped() {
                        continue;
                    }
                    let name = field.output_name();
                    let scrubbed = if self.fields.contains(name) {
                        Value::scalar(SCRUBBED_PLACEHOLDER)
                    } else {
                        self.walk(field.value(), depth + 1)?
                    };
                    entries.push((MapKey::from(name), scrubbed));
                }
                Ok(Value::Mapping(entries))
            }
            Value::Sequence(items) => {
                let mut walked = Vec::with_capacity(items.len());
                for item in items {
                    walked.push(self.walk(item, depth + 1)?);
                }
                Ok(Value::Sequence(walked))
            }
            Value::Mapping(entries) => {
                let mut walked = Vec::with_capacity(entries.len());
                for (key, entry) in entries {
                    let matched = key.as_name().is_some_and(|name| self.fields.contains(name));
                    let scrubbed = if matched {
                        Value::scalar(SCRUBBED_PLACEHOLDER)
                    } else {
                        self.walk(entry, depth + 1)?
                    };
                    walked.push((key.clone(), scrubbed));
                }
                Ok(Value::Mapping(walked))
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
